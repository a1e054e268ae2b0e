pub mod error;
pub mod identity;
pub mod metadata;
pub mod resource;

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

pub use error::Error;
pub use identity::{
    IdentityMap, IdentityUpdater, Labels, NumericIdentity, UpdateCompletion, UpdateDone,
};
pub use metadata::{
    EncryptKey, EndpointFlags, IpMetadata, MetadataValue, PrefixResource, RequestedIdentity,
    ResourceInfo, TunnelPeer,
};
pub use resource::{ResourceId, ResourceKind};

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) fn serialize_to_string<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
    T: ToString,
{
    value.to_string().serialize(serializer)
}

pub(crate) fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let buf = String::deserialize(deserializer)?;
    T::from_str(&buf).map_err(|e| serde::de::Error::custom(e.to_string()))
}
