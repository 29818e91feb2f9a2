use crate::domain::{AccountName, BalanceRecord, LedgerError, SupplyRecord, SymbolCode};

/// Keyed record store abstraction.
///
/// Supply records are keyed by symbol code; balance records by
/// (owner, symbol code). Records move by value: the core never holds a
/// reference into the store across an operation boundary. Every write
/// attributes its storage cost to a named payer.
pub trait LedgerStore: Send + Sync {
    fn find_supply(&self, code: &SymbolCode) -> Result<Option<SupplyRecord>, LedgerError>;

    /// Inserts or replaces the supply record for `record.symbol().code()`.
    fn put_supply(&self, record: SupplyRecord, payer: &AccountName) -> Result<(), LedgerError>;

    fn find_balance(
        &self,
        owner: &AccountName,
        code: &SymbolCode,
    ) -> Result<Option<BalanceRecord>, LedgerError>;

    /// Inserts or replaces the balance record for `(owner, code)`. The
    /// payer is only charged when the write creates a new row.
    fn put_balance(
        &self,
        owner: &AccountName,
        record: BalanceRecord,
        payer: &AccountName,
    ) -> Result<(), LedgerError>;

    /// Deletes a balance record, releasing its storage allocation.
    fn erase_balance(&self, owner: &AccountName, code: &SymbolCode) -> Result<(), LedgerError>;
}
