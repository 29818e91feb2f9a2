//! In-memory adapters for the core's ports, used by tests and local
//! development. Production hosts supply their own implementations.

pub mod memory_store;
pub mod script_host;

pub use memory_store::InMemoryLedgerStore;
pub use script_host::ScriptedHost;
