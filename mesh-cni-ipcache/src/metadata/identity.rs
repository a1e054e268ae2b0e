use serde::{Deserialize, Serialize};

use super::IpMetadata;
use crate::NumericIdentity;

/// Numeric identity a prefix asks the local allocator for the next time it is
/// injected.
///
/// The allocator only honors the request when the prefix has no identity yet
/// (or its labels changed) and the number is free. Callers should withhold the
/// number in the allocator before attaching it to a prefix, otherwise another
/// label set may claim it first.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestedIdentity(NumericIdentity);

impl RequestedIdentity {
    pub const fn new(id: NumericIdentity) -> Self {
        Self(id)
    }

    pub const fn id(self) -> NumericIdentity {
        self.0
    }
}

impl IpMetadata for RequestedIdentity {
    fn is_valid(&self) -> bool {
        self.0 != NumericIdentity::UNKNOWN
    }
}

impl From<NumericIdentity> for RequestedIdentity {
    fn from(value: NumericIdentity) -> Self {
        Self(value)
    }
}

impl From<u32> for RequestedIdentity {
    fn from(value: u32) -> Self {
        Self(NumericIdentity::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_no_request() {
        let id = RequestedIdentity::from(0u32);
        assert!(!id.is_valid());
        assert_eq!(id.id(), NumericIdentity::UNKNOWN);
    }

    #[test]
    fn test_non_zero_request() {
        for v in [1, 128, 16777217, u32::MAX] {
            let id = RequestedIdentity::from(v);
            assert!(id.is_valid());
            assert_eq!(id.id(), NumericIdentity::new(v));
        }
    }
}
