//! Request and response shapes exchanged with the provider.
//!
//! Every value is transient: built per inbound call, serialized once, then dropped.

pub mod money;
pub mod otp;
pub mod party;
pub mod payment;
pub mod public_key;
pub mod qrcode;

pub use money::*;
pub use otp::*;
pub use party::*;
pub use payment::*;
pub use public_key::*;
pub use qrcode::*;

/// Largest number of metadata entries the provider accepts.
pub const MAX_METADATA_ENTRIES: usize = 10;
