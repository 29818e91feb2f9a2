//! Domain layer: value objects, records, and pure accounting rules.
//!
//! Nothing in this module performs I/O or touches a port. All functions
//! are deterministic; the only inputs are arguments and record values.

pub mod entities;
pub mod errors;
pub mod inflation;
pub mod policy;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use inflation::*;
pub use policy::*;
pub use value_objects::*;
