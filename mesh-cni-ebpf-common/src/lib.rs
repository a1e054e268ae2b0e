#![no_std]

pub mod ipcache;

/// Numeric identity as stored in the ipcache maps.
pub type IdentityId = u32;

/// Identities below this value are reserved for cluster specific items.
pub const RESERVED_IDENTITY_MAX: IdentityId = 128;
