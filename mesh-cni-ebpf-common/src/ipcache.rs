/// Flag byte carried in every ipcache record.
///
/// The kernel programs read this byte directly, so bit assignments are
/// fixed: a new flag takes the next unused bit and existing bits never move.
///
/// | bit | flag |
/// |-----|------|
/// | 0 | skip tunnel |
/// | 1-7 | reserved, always zero |
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct EndpointFlagBits(u8);

#[cfg(feature = "user")]
unsafe impl aya::Pod for EndpointFlagBits {}

impl EndpointFlagBits {
    /// Traffic to the endpoint bypasses overlay encapsulation.
    pub const SKIP_TUNNEL: Self = Self(1 << 0);

    const KNOWN: u8 = Self::SKIP_TUNNEL.0;

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Builds flags from a raw byte, dropping reserved bits.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::KNOWN)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn set(&mut self, other: Self, value: bool) {
        if value {
            self.0 |= other.0;
        } else {
            self.0 &= !other.0;
        }
    }
}
