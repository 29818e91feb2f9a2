use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::{AccountName, BalanceRecord, LedgerError, SupplyRecord, SymbolCode};
use crate::ports::LedgerStore;

/// A stored row plus the account charged for its storage footprint.
#[derive(Clone, Debug)]
struct Row<T> {
    record: T,
    payer: AccountName,
}

/// In-memory implementation of [`LedgerStore`] for testing.
///
/// Mirrors the host's attribution rule: the payer is fixed when a row is
/// created and untouched by later modifications.
pub struct InMemoryLedgerStore {
    supplies: RwLock<HashMap<SymbolCode, Row<SupplyRecord>>>,
    balances: RwLock<HashMap<(AccountName, SymbolCode), Row<BalanceRecord>>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self {
            supplies: RwLock::new(HashMap::new()),
            balances: RwLock::new(HashMap::new()),
        }
    }

    /// Sum of all balance rows for a symbol, in raw units. Test support
    /// for the conservation invariant `sum(balances) == supply`.
    pub fn total_balance(&self, code: &SymbolCode) -> Result<i64, LedgerError> {
        let balances = self.balances.read().map_err(|_| LedgerError::LockPoisoned)?;
        Ok(balances
            .iter()
            .filter(|((_, c), _)| c == code)
            .map(|(_, row)| row.record.balance.amount)
            .sum())
    }

    /// The account charged for a balance row, if the row exists.
    pub fn balance_payer(
        &self,
        owner: &AccountName,
        code: &SymbolCode,
    ) -> Result<Option<AccountName>, LedgerError> {
        let balances = self.balances.read().map_err(|_| LedgerError::LockPoisoned)?;
        Ok(balances
            .get(&(owner.clone(), code.clone()))
            .map(|row| row.payer.clone()))
    }
}

impl Default for InMemoryLedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn find_supply(&self, code: &SymbolCode) -> Result<Option<SupplyRecord>, LedgerError> {
        let supplies = self.supplies.read().map_err(|_| LedgerError::LockPoisoned)?;
        Ok(supplies.get(code).map(|row| row.record.clone()))
    }

    fn put_supply(&self, record: SupplyRecord, payer: &AccountName) -> Result<(), LedgerError> {
        let mut supplies = self.supplies.write().map_err(|_| LedgerError::LockPoisoned)?;
        let code = record.symbol().code().clone();
        match supplies.get_mut(&code) {
            Some(row) => row.record = record,
            None => {
                supplies.insert(
                    code,
                    Row {
                        record,
                        payer: payer.clone(),
                    },
                );
            }
        }
        Ok(())
    }

    fn find_balance(
        &self,
        owner: &AccountName,
        code: &SymbolCode,
    ) -> Result<Option<BalanceRecord>, LedgerError> {
        let balances = self.balances.read().map_err(|_| LedgerError::LockPoisoned)?;
        Ok(balances
            .get(&(owner.clone(), code.clone()))
            .map(|row| row.record.clone()))
    }

    fn put_balance(
        &self,
        owner: &AccountName,
        record: BalanceRecord,
        payer: &AccountName,
    ) -> Result<(), LedgerError> {
        let mut balances = self.balances.write().map_err(|_| LedgerError::LockPoisoned)?;
        let key = (owner.clone(), record.balance.symbol.code().clone());
        match balances.get_mut(&key) {
            Some(row) => row.record = record,
            None => {
                balances.insert(
                    key,
                    Row {
                        record,
                        payer: payer.clone(),
                    },
                );
            }
        }
        Ok(())
    }

    fn erase_balance(&self, owner: &AccountName, code: &SymbolCode) -> Result<(), LedgerError> {
        let mut balances = self.balances.write().map_err(|_| LedgerError::LockPoisoned)?;
        balances.remove(&(owner.clone(), code.clone()));
        Ok(())
    }
}
