//! Payloads handed to the host's notification and delegated-call channels.

pub mod payloads;

pub use payloads::*;
