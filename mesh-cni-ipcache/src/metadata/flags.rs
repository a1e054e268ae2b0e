use mesh_cni_ebpf_common::ipcache::EndpointFlagBits;
use tracing::trace;

use super::IpMetadata;

/// Flags attached to an endpoint in the ipcache.
///
/// `None` until a setter runs, so an endpoint that never had flags set can be
/// told apart from one explicitly set to all clear. There is no way back to
/// the unset state.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct EndpointFlags {
    bits: Option<EndpointFlagBits>,
}

impl EndpointFlags {
    /// Packets to an endpoint with skip tunnel set are not forwarded through
    /// the overlay, regardless of the tunnel configuration.
    pub fn set_skip_tunnel(&mut self, skip: bool) {
        let bits = self.bits.get_or_insert_with(EndpointFlagBits::empty);
        bits.set(EndpointFlagBits::SKIP_TUNNEL, skip);
        trace!(skip, bits = bits.bits(), "set endpoint skip tunnel flag");
    }

    pub fn skip_tunnel(&self) -> bool {
        self.bits
            .is_some_and(|bits| bits.contains(EndpointFlagBits::SKIP_TUNNEL))
    }

    pub fn bits(&self) -> Option<EndpointFlagBits> {
        self.bits
    }

    /// Byte layout written to the ipcache map. Uninitialized flags encode as 0.
    pub fn uint8(&self) -> u8 {
        self.bits.map(EndpointFlagBits::bits).unwrap_or_default()
    }
}

impl IpMetadata for EndpointFlags {
    fn is_valid(&self) -> bool {
        self.bits.is_some()
    }
}

impl From<EndpointFlagBits> for EndpointFlags {
    fn from(value: EndpointFlagBits) -> Self {
        Self { bits: Some(value) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_flags_are_unset() {
        let flags = EndpointFlags::default();
        assert!(!flags.is_valid());
        assert_eq!(flags.uint8(), 0);
        assert!(!flags.skip_tunnel());
        assert_eq!(flags.bits(), None);
    }

    #[test]
    fn test_set_skip_tunnel() {
        let mut flags = EndpointFlags::default();
        flags.set_skip_tunnel(true);
        assert!(flags.is_valid());
        assert!(flags.skip_tunnel());
        assert_eq!(flags.uint8(), 1);
    }

    #[test]
    fn test_clear_skip_tunnel_stays_initialized() {
        let mut flags = EndpointFlags::default();
        flags.set_skip_tunnel(false);
        assert!(flags.is_valid());
        assert_eq!(flags.uint8(), 0);
        assert_ne!(flags, EndpointFlags::default());

        flags.set_skip_tunnel(true);
        flags.set_skip_tunnel(false);
        assert!(flags.is_valid());
        assert_eq!(flags.uint8(), 0);
    }

    #[test]
    fn test_uint8_matches_kernel_layout() {
        let mut flags = EndpointFlags::default();
        flags.set_skip_tunnel(true);
        assert_eq!(flags.uint8(), EndpointFlagBits::SKIP_TUNNEL.bits());
        assert_eq!(flags.bits(), Some(EndpointFlagBits::SKIP_TUNNEL));
    }
}
