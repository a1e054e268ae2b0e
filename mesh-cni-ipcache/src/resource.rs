use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::{Error, Result, deserialize_from_str, serialize_to_string};

const DELIMITER: char = '/';

/// Source category of a [`ResourceId`]. Typically the short name of the
/// kubernetes resource that produced the ipcache data.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Ccnp,
    CidrGroup,
    Cnp,
    Daemon,
    Endpoint,
    File,
    Netpol,
    Node,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Ccnp,
        ResourceKind::CidrGroup,
        ResourceKind::Cnp,
        ResourceKind::Daemon,
        ResourceKind::Endpoint,
        ResourceKind::File,
        ResourceKind::Netpol,
        ResourceKind::Node,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Ccnp => "ccnp",
            ResourceKind::CidrGroup => "cidrgroup",
            ResourceKind::Cnp => "cnp",
            ResourceKind::Daemon => "daemon",
            ResourceKind::Endpoint => "ep",
            ResourceKind::File => "file",
            ResourceKind::Netpol => "netpol",
            ResourceKind::Node => "node",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownResourceKind(s.to_owned()))
    }
}

impl Serialize for ResourceKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_to_string(self, serializer)
    }
}

impl<'de> Deserialize<'de> for ResourceKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_from_str(deserializer)
    }
}

/// Identifies a unique copy of a resource that provides a source for
/// information tied to an IP address in the ipcache.
///
/// Encoded as `<kind>/<namespace>/<name>`. Namespace and name may be empty
/// but both delimiters are always present. The encoding shows up in logs and
/// derived keys, so it must stay stable.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(kind: ResourceKind, namespace: &str, name: &str) -> Self {
        let kind = kind.as_str();
        let mut id = String::with_capacity(kind.len() + 1 + namespace.len() + 1 + name.len());
        id.push_str(kind);
        id.push(DELIMITER);
        id.push_str(namespace);
        id.push(DELIMITER);
        id.push_str(name);
        Self(id)
    }

    /// Wraps an already encoded id without validating it. Accessors on the
    /// result degrade to empty values when the encoding is malformed.
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Strict parse, requiring a known kind and both delimiters.
    pub fn parse(id: &str) -> Result<Self> {
        let mut parts = id.splitn(3, DELIMITER);
        let kind = parts.next().unwrap_or_default();
        if parts.next().is_none() || parts.next().is_none() {
            return Err(Error::MalformedResourceId(id.to_owned()));
        }
        kind.parse::<ResourceKind>()?;
        Ok(Self(id.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> Option<ResourceKind> {
        let (kind, _) = self.0.split_once(DELIMITER)?;
        kind.parse().ok()
    }

    /// Returns the namespace segment, or an empty string when the id has
    /// fewer than two segments. An empty result is therefore ambiguous between
    /// a cluster scoped resource and a malformed id; use
    /// [`ResourceId::try_namespace`] to tell them apart.
    pub fn namespace(&self) -> &str {
        match self.try_namespace() {
            Ok(namespace) => namespace,
            Err(e) => {
                debug!(%e, "resource id has no namespace segment");
                ""
            }
        }
    }

    pub fn try_namespace(&self) -> Result<&str> {
        self.0
            .splitn(3, DELIMITER)
            .nth(1)
            .ok_or_else(|| Error::MalformedResourceId(self.0.clone()))
    }

    /// Everything after the second delimiter. May itself contain `/`.
    pub fn name(&self) -> &str {
        self.0.splitn(3, DELIMITER).nth(2).unwrap_or_default()
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ResourceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ResourceId::parse(s)
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ResourceId> for String {
    fn from(value: ResourceId) -> Self {
        value.0
    }
}

impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_to_string(self, serializer)
    }
}

// Kept opaque on the way in, the same as on the way out. Use `parse` when the
// encoding has to be checked.
impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(ResourceId::new_unchecked)
    }
}
