//! Credential material handled by the gateway.

pub mod secret;

pub use secret::*;
