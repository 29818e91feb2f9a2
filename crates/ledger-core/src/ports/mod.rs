//! Ports: the narrow interfaces the core consumes from its host.

pub mod host;
pub mod store;

pub use host::*;
pub use store::*;
