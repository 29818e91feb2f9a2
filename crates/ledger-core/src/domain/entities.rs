//! # Domain Entities
//!
//! The two record kinds owned by the ledger: one supply record per token
//! symbol, one balance record per (account, symbol code) pair.

use serde::{Deserialize, Serialize};

use super::errors::LedgerError;
use super::value_objects::{AccountName, Amount, Symbol};

/// Maximum memo length accepted by issue/retire/transfer, in bytes.
pub const MAX_MEMO_BYTES: usize = 256;

/// Default inflation-rate ceiling, in parts-per-million-scaled units.
/// Effectively unbounded; `update` can only ratchet it downward.
pub const DEFAULT_INF_RATE_LIMIT_PPM: u64 = 10_000_000_000_000_000_000;

/// Validates a memo string against [`MAX_MEMO_BYTES`].
pub fn check_memo(memo: &str) -> Result<(), LedgerError> {
    if memo.len() > MAX_MEMO_BYTES {
        return Err(LedgerError::MemoTooLong {
            max: MAX_MEMO_BYTES,
            actual: memo.len(),
        });
    }
    Ok(())
}

/// Per-symbol supply record, keyed by symbol code.
///
/// Created once by [`create`](crate::service::Ledger::create), mutated by
/// issue/update/retire, never deleted.
///
/// ## Invariants
///
/// - `0 <= supply.amount <= max_supply.amount`
/// - `issuer` and `max_supply` are immutable after creation
/// - `authorizer.is_some()` implies `authorize`
/// - the three inflation ceilings and the two policy flags only ever move
///   toward stricter values
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyRecord {
    /// The only account allowed to issue, retire, and update policy.
    pub issuer: AccountName,
    /// Current circulating supply. Starts at zero.
    pub supply: Amount,
    /// Issuance ceiling, fixed at creation.
    pub max_supply: Amount,
    /// Decaying average of issuance over a one-day window.
    pub avg_daily_inflation: Amount,
    /// Decaying average of issuance over a one-year window.
    pub avg_yearly_inflation: Amount,
    /// Timestamp (seconds) of the last issuance-average recompute.
    pub last_update: u64,
    /// Whether the issuer may still recall tokens. One-way: true -> false.
    pub recall: bool,
    /// Whether transfers require the authorizer's approval. One-way.
    pub authorize: bool,
    /// Account consulted on transfer when `authorize` is set.
    pub authorizer: Option<AccountName>,
    /// Daily inflation-rate ceiling, ppm-scaled. Ratchets downward only.
    pub daily_inf_per_limit: u64,
    /// Yearly inflation-rate ceiling, ppm-scaled. Ratchets downward only.
    pub yearly_inf_per_limit: u64,
    /// Absolute ceiling on the daily issuance average. Ratchets downward.
    pub allowed_daily_inflation: Amount,
}

impl SupplyRecord {
    /// Initial record for a freshly created token: zero supply, zeroed
    /// averages, permissive policy, rate limits at the unbounded default.
    #[must_use]
    pub fn create(issuer: AccountName, max_supply: Amount, now: u64) -> Self {
        let symbol = max_supply.symbol.clone();
        Self {
            issuer,
            supply: Amount::zero(symbol.clone()),
            max_supply: max_supply.clone(),
            avg_daily_inflation: Amount::zero(symbol.clone()),
            avg_yearly_inflation: Amount::zero(symbol),
            last_update: now,
            recall: true,
            authorize: true,
            authorizer: None,
            daily_inf_per_limit: DEFAULT_INF_RATE_LIMIT_PPM,
            yearly_inf_per_limit: DEFAULT_INF_RATE_LIMIT_PPM,
            allowed_daily_inflation: max_supply,
        }
    }

    /// The symbol this record governs (code and precision).
    #[must_use]
    pub fn symbol(&self) -> &Symbol {
        &self.supply.symbol
    }

    /// Issuance headroom left under `max_supply`.
    #[must_use]
    pub fn available_supply(&self) -> i64 {
        self.max_supply.amount - self.supply.amount
    }
}

/// Per-(account, symbol) balance record.
///
/// Created on first credit or explicit `open`; deleted only via `close`
/// when the balance is exactly zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRecord {
    /// Spendable balance. Never negative.
    pub balance: Amount,
}

impl BalanceRecord {
    #[must_use]
    pub fn new(balance: Amount) -> Self {
        Self { balance }
    }

    /// An empty record, as created by `open`.
    #[must_use]
    pub fn zero(symbol: Symbol) -> Self {
        Self {
            balance: Amount::zero(symbol),
        }
    }
}
