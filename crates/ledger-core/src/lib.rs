//! # ledger-core
//!
//! Fungible-token ledger accounting core.
//!
//! ## Role in System
//!
//! - **Single Source of Truth**: authoritative supply and balance records
//!   for every token symbol managed by one owning authority
//! - **Invariant Enforcement**: `0 <= supply <= max_supply` per symbol and
//!   `sum(balances) == supply` across the whole store
//! - **Bounded Issuance**: issuance is gated by decaying-average inflation
//!   ceilings (daily and yearly windows)
//!
//! ## Architecture
//!
//! Hexagonal layout: pure domain logic, narrow ports, in-memory adapters.
//!
//! ```text
//! [Host Environment] ──require_auth/now/notify──→ [ports::HostEnv]
//!                                                      │
//!                                                      ↓
//!                    [service::Ledger] ──find/put/erase──→ [ports::LedgerStore]
//! ```
//!
//! The host transport (authentication, persistence, notification delivery)
//! is an external collaborator. The core never holds state across an
//! operation: each call resolves records by key, validates fully, then
//! writes back. Any error aborts before the first write.

pub mod adapters;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

pub use adapters::*;
pub use domain::*;
pub use events::*;
pub use ports::*;
pub use service::Ledger;
