use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::IpMetadata;

/// Encryption key slot used for traffic to a prefix.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptKey(u8);

impl EncryptKey {
    pub const EMPTY: EncryptKey = EncryptKey(0);

    pub const fn new(key: u8) -> Self {
        Self(key)
    }

    pub const fn uint8(self) -> u8 {
        self.0
    }
}

impl IpMetadata for EncryptKey {
    fn is_valid(&self) -> bool {
        *self != EncryptKey::EMPTY
    }
}

impl From<u8> for EncryptKey {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl Display for EncryptKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
