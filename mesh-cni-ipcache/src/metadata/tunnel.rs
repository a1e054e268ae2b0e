use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};

use super::IpMetadata;

/// Address of the host that owns a prefix. Used to set up the overlay tunnel
/// towards that host, or as the peer for encryption.
///
/// Unset by default. An explicit unspecified address (`0.0.0.0`, `::`) is
/// still a set value; what it means is up to the cache.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TunnelPeer(Option<IpAddr>);

impl TunnelPeer {
    pub const fn new(ip: IpAddr) -> Self {
        Self(Some(ip))
    }

    pub const fn ip(&self) -> Option<IpAddr> {
        self.0
    }
}

impl IpMetadata for TunnelPeer {
    fn is_valid(&self) -> bool {
        self.0.is_some()
    }
}

impl From<IpAddr> for TunnelPeer {
    fn from(value: IpAddr) -> Self {
        Self::new(value)
    }
}

impl From<Ipv4Addr> for TunnelPeer {
    fn from(value: Ipv4Addr) -> Self {
        Self::new(IpAddr::V4(value))
    }
}

impl From<Ipv6Addr> for TunnelPeer {
    fn from(value: Ipv6Addr) -> Self {
        Self::new(IpAddr::V6(value))
    }
}

impl Display for TunnelPeer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(ip) => ip.fmt(f),
            None => f.write_str("invalid IP"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_returns_wrapped_address() {
        let v4 = TunnelPeer::from(Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(v4.ip(), Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))));
        assert!(v4.is_valid());

        let v6 = TunnelPeer::from(Ipv6Addr::new(0xfd00, 0, 0, 0, 0, 0, 0, 1));
        assert_eq!(v6.to_string(), "fd00::1");
        assert!(v6.is_valid());
    }

    #[test]
    fn test_unset_peer() {
        let peer = TunnelPeer::default();
        assert_eq!(peer.ip(), None);
        assert!(!peer.is_valid());
        assert_eq!(peer.to_string(), "invalid IP");
    }

    #[test]
    fn test_explicit_unspecified_peer_is_set() {
        let v4 = TunnelPeer::from(Ipv4Addr::UNSPECIFIED);
        assert!(v4.is_valid());
        assert_eq!(v4.ip(), Some(IpAddr::V4(Ipv4Addr::UNSPECIFIED)));
        assert_ne!(v4, TunnelPeer::default());

        let v6 = TunnelPeer::from(Ipv6Addr::UNSPECIFIED);
        assert!(v6.is_valid());
        assert_eq!(v6.to_string(), "::");
    }
}
