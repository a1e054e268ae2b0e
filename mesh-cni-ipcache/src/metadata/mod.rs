mod encrypt;
mod flags;
mod identity;
mod tunnel;

use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::ResourceId;

pub use encrypt::EncryptKey;
pub use flags::EndpointFlags;
pub use identity::RequestedIdentity;
pub use tunnel::TunnelPeer;

/// A typed fact about a prefix. A value that is not valid is treated by the
/// cache the same as an absent one.
pub trait IpMetadata {
    fn is_valid(&self) -> bool;
}

/// Key the ipcache stores metadata under.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PrefixResource {
    pub prefix: IpNetwork,
    pub resource: ResourceId,
}

impl PrefixResource {
    pub fn new(prefix: IpNetwork, resource: ResourceId) -> Self {
        Self { prefix, resource }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MetadataValue {
    TunnelPeer(TunnelPeer),
    EncryptKey(EncryptKey),
    RequestedIdentity(RequestedIdentity),
    EndpointFlags(EndpointFlags),
}

impl IpMetadata for MetadataValue {
    fn is_valid(&self) -> bool {
        match self {
            MetadataValue::TunnelPeer(v) => v.is_valid(),
            MetadataValue::EncryptKey(v) => v.is_valid(),
            MetadataValue::RequestedIdentity(v) => v.is_valid(),
            MetadataValue::EndpointFlags(v) => v.is_valid(),
        }
    }
}

impl From<TunnelPeer> for MetadataValue {
    fn from(value: TunnelPeer) -> Self {
        MetadataValue::TunnelPeer(value)
    }
}

impl From<EncryptKey> for MetadataValue {
    fn from(value: EncryptKey) -> Self {
        MetadataValue::EncryptKey(value)
    }
}

impl From<RequestedIdentity> for MetadataValue {
    fn from(value: RequestedIdentity) -> Self {
        MetadataValue::RequestedIdentity(value)
    }
}

impl From<EndpointFlags> for MetadataValue {
    fn from(value: EndpointFlags) -> Self {
        MetadataValue::EndpointFlags(value)
    }
}

/// Metadata one resource contributed for one prefix. Holds at most one
/// value of each type; merging across resources is left to the cache.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ResourceInfo {
    pub tunnel_peer: Option<TunnelPeer>,
    pub encrypt_key: Option<EncryptKey>,
    pub requested_identity: Option<RequestedIdentity>,
    pub endpoint_flags: Option<EndpointFlags>,
}

impl ResourceInfo {
    /// Stores `value`, returning the previous value of the same type.
    pub fn insert(&mut self, value: impl Into<MetadataValue>) -> Option<MetadataValue> {
        let value = value.into();
        let previous = match value {
            MetadataValue::TunnelPeer(v) => self.tunnel_peer.replace(v).map(MetadataValue::from),
            MetadataValue::EncryptKey(v) => self.encrypt_key.replace(v).map(MetadataValue::from),
            MetadataValue::RequestedIdentity(v) => self
                .requested_identity
                .replace(v)
                .map(MetadataValue::from),
            MetadataValue::EndpointFlags(v) => {
                self.endpoint_flags.replace(v).map(MetadataValue::from)
            }
        };
        if let Some(previous) = previous
            && previous != value
        {
            trace!(?previous, ?value, "replaced prefix metadata");
        }
        previous
    }

    /// True when no valid value is stored.
    pub fn is_empty(&self) -> bool {
        self.values().next().is_none()
    }

    /// Valid values only.
    pub fn values(&self) -> impl Iterator<Item = MetadataValue> + use<> {
        [
            self.tunnel_peer.map(MetadataValue::from),
            self.encrypt_key.map(MetadataValue::from),
            self.requested_identity.map(MetadataValue::from),
            self.endpoint_flags.map(MetadataValue::from),
        ]
        .into_iter()
        .flatten()
        .filter(|value| value.is_valid())
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;
    use crate::{NumericIdentity, ResourceKind};

    #[test]
    fn test_insert_replaces_same_type() {
        let mut info = ResourceInfo::default();
        assert!(info.is_empty());

        assert_eq!(info.insert(EncryptKey::new(3)), None);
        let previous = info.insert(EncryptKey::new(4));
        assert_eq!(previous, Some(MetadataValue::EncryptKey(EncryptKey::new(3))));
        assert_eq!(info.encrypt_key, Some(EncryptKey::new(4)));

        info.insert(TunnelPeer::from(Ipv4Addr::new(192, 168, 0, 10)));
        assert_eq!(info.values().count(), 2);
    }

    #[test]
    fn test_invalid_values_count_as_absent() {
        let mut info = ResourceInfo::default();
        info.insert(EncryptKey::EMPTY);
        info.insert(RequestedIdentity::new(NumericIdentity::UNKNOWN));
        info.insert(EndpointFlags::default());
        info.insert(TunnelPeer::default());
        assert!(info.is_empty());

        let mut flags = EndpointFlags::default();
        flags.set_skip_tunnel(false);
        info.insert(flags);
        assert!(!info.is_empty());
        assert_eq!(info.values().collect::<Vec<_>>(), vec![MetadataValue::from(flags)]);
    }

    #[test]
    fn test_unspecified_tunnel_peer_is_present() {
        let mut info = ResourceInfo::default();
        info.insert(TunnelPeer::from(Ipv4Addr::UNSPECIFIED));
        assert!(!info.is_empty());
        assert_eq!(info.values().count(), 1);
    }

    #[test]
    fn test_prefix_resource_key() {
        let prefix: IpNetwork = "10.0.0.0/24".parse().expect("prefix");
        let a = PrefixResource::new(prefix, ResourceId::new(ResourceKind::Node, "", "node-a"));
        let b = PrefixResource::new(prefix, ResourceId::new(ResourceKind::Node, "", "node-b"));
        assert_ne!(a, b);

        let json = serde_json::to_string(&a).expect("serialize");
        let back: PrefixResource = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, a);
    }
}
