//! # Ledger Service
//!
//! Orchestrates every ledger operation over the two ports. Each method is
//! one atomic unit: all validation runs first, then the (already staged)
//! record writes. The host serializes operations, so no locking happens
//! here.
//!
//! ## Security
//!
//! - `create` requires the ledger's own authority
//! - `issue`/`update`/`retire` require the symbol's issuer
//! - `transfer` requires the sender, `open` the payer, `close` the owner
//! - authorization outcomes come exclusively from `HostEnv::require_auth`

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{
    check_memo, decayed_average, ppm_ratio, AccountName, Amount, BalanceRecord, LedgerError,
    PolicyUpdate, SupplyRecord, Symbol, SECONDS_PER_DAY, SECONDS_PER_YEAR,
};
use crate::events::{AuthorizeRequestPayload, TransferNoticePayload, AUTHORIZE_ACTION};
use crate::ports::{HostEnv, LedgerStore};

/// The fungible-token ledger for a single owning authority.
///
/// The authority identity is explicit configuration rather than ambient
/// state: it authorizes `create`, pays for supply-record storage, and
/// backs the delegated authorizer call during transfer.
pub struct Ledger {
    store: Arc<dyn LedgerStore>,
    host: Arc<dyn HostEnv>,
    authority: AccountName,
}

impl Ledger {
    pub fn new(store: Arc<dyn LedgerStore>, host: Arc<dyn HostEnv>, authority: AccountName) -> Self {
        Self {
            store,
            host,
            authority,
        }
    }

    /// The ledger's own identity.
    #[must_use]
    pub fn authority(&self) -> &AccountName {
        &self.authority
    }

    // =========================================================================
    // SUPPLY LEDGER
    // =========================================================================

    /// Registers a new token symbol with its issuer and supply ceiling.
    ///
    /// Authority-only. Fails if a supply record already exists for the
    /// symbol code, or if `max_supply` is invalid or non-positive.
    pub fn create(&self, issuer: &AccountName, max_supply: &Amount) -> Result<(), LedgerError> {
        self.host.require_auth(&self.authority)?;

        max_supply.validate()?;
        if !max_supply.is_positive() {
            return Err(LedgerError::NonPositiveQuantity);
        }

        let code = max_supply.symbol.code().clone();
        if self.store.find_supply(&code)?.is_some() {
            return Err(LedgerError::SupplyAlreadyExists { code });
        }

        let record = SupplyRecord::create(issuer.clone(), max_supply.clone(), self.host.now());
        self.store.put_supply(record, &self.authority)?;

        info!(symbol = %max_supply.symbol, %issuer, max_supply = %max_supply, "token created");
        Ok(())
    }

    /// Issues `quantity` new tokens to the issuer account.
    ///
    /// Issuance is gated twice: the absolute supply ceiling, and the
    /// decaying-average inflation limits. The ratio limits only engage
    /// when the new daily average exceeds `allowed_daily_inflation`, and
    /// are skipped when the prior supply is zero (there is no rate to
    /// measure against, and the absolute gate has already had its say).
    pub fn issue(
        &self,
        to: &AccountName,
        quantity: &Amount,
        memo: &str,
    ) -> Result<(), LedgerError> {
        check_memo(memo)?;

        let code = quantity.symbol.code().clone();
        let mut record = self
            .store
            .find_supply(&code)?
            .ok_or(LedgerError::SupplyNotFound { code })?;
        if *to != record.issuer {
            return Err(LedgerError::IssueToNonIssuer);
        }
        self.host.require_auth(&record.issuer)?;

        quantity.validate()?;
        if !quantity.is_positive() {
            return Err(LedgerError::NonPositiveQuantity);
        }
        record.supply.require_same_symbol(quantity)?;

        if quantity.amount > record.available_supply() {
            return Err(LedgerError::SupplyCeilingExceeded {
                available: Amount::new(record.available_supply(), record.symbol().clone())?,
                requested: quantity.clone(),
            });
        }

        let now = self.host.now();
        let delta = now.saturating_sub(record.last_update);
        let new_day_avg =
            decayed_average(delta, SECONDS_PER_DAY, &record.avg_daily_inflation, quantity)?;
        let new_year_avg = decayed_average(
            delta,
            SECONDS_PER_YEAR,
            &record.avg_yearly_inflation,
            quantity,
        )?;

        let old_supply = record.supply.amount;
        if new_day_avg.amount > record.allowed_daily_inflation.amount && old_supply > 0 {
            let daily_ppm = ppm_ratio(new_day_avg.amount, old_supply);
            if daily_ppm >= record.daily_inf_per_limit {
                return Err(LedgerError::DailyInflationReached {
                    limit_ppm: record.daily_inf_per_limit,
                    actual_ppm: daily_ppm,
                });
            }
            let yearly_ppm = ppm_ratio(new_year_avg.amount, old_supply);
            if yearly_ppm >= record.yearly_inf_per_limit {
                return Err(LedgerError::YearlyInflationReached {
                    limit_ppm: record.yearly_inf_per_limit,
                    actual_ppm: yearly_ppm,
                });
            }
        }

        record.supply = record.supply.checked_add(quantity)?;
        record.last_update = now;
        record.avg_daily_inflation = new_day_avg;
        record.avg_yearly_inflation = new_year_avg;

        let issuer = record.issuer.clone();
        let credited = self.credited_balance(&issuer, quantity)?;
        let new_supply = record.supply.clone();

        self.store.put_supply(record, &self.authority)?;
        self.store.put_balance(&issuer, credited, &issuer)?;

        info!(%issuer, quantity = %quantity, supply = %new_supply, "tokens issued");
        Ok(())
    }

    /// Atomically replaces a symbol's policy fields, enforcing every
    /// one-way ratchet. Issuer-only.
    pub fn update(&self, sym: &Symbol, update: &PolicyUpdate) -> Result<(), LedgerError> {
        let code = sym.code().clone();
        let mut record = self
            .store
            .find_supply(&code)?
            .ok_or(LedgerError::SupplyNotFound { code })?;
        self.host.require_auth(&record.issuer)?;

        update.validate_against(&record)?;
        if update.authorize {
            if let Some(authorizer) = &update.authorizer {
                if !self.host.is_account(authorizer) {
                    return Err(LedgerError::AccountNotFound {
                        name: authorizer.clone(),
                    });
                }
            }
        }

        update.apply_to(&mut record);
        self.store.put_supply(record, &self.authority)?;

        debug!(symbol = %sym, "token policy updated");
        Ok(())
    }

    /// Retires `quantity` tokens from circulation, debited from the
    /// issuer's own balance. Issuer-only.
    pub fn retire(&self, quantity: &Amount, memo: &str) -> Result<(), LedgerError> {
        check_memo(memo)?;

        let code = quantity.symbol.code().clone();
        let mut record = self
            .store
            .find_supply(&code)?
            .ok_or(LedgerError::SupplyNotFound { code })?;
        self.host.require_auth(&record.issuer)?;

        quantity.validate()?;
        if !quantity.is_positive() {
            return Err(LedgerError::NonPositiveQuantity);
        }
        record.supply.require_same_symbol(quantity)?;

        // Sufficiency comes from the issuer-balance debit: the issuer can
        // never hold more than the circulating supply.
        let issuer = record.issuer.clone();
        let debited = self.debited_balance(&issuer, quantity)?;
        record.supply = record.supply.checked_sub(quantity)?;
        let new_supply = record.supply.clone();

        self.store.put_supply(record, &self.authority)?;
        self.store.put_balance(&issuer, debited, &issuer)?;

        info!(%issuer, quantity = %quantity, supply = %new_supply, "tokens retired");
        Ok(())
    }

    // =========================================================================
    // TRANSFER ORCHESTRATION
    // =========================================================================

    /// Moves `quantity` from one account to another.
    ///
    /// Side effects, in order: notify both parties, consult the optional
    /// transfer authorizer (synchronous; rejection fails the transfer),
    /// debit the sender, credit the recipient. A new recipient row is
    /// paid for by the recipient when it has authorized the acting
    /// context, otherwise by the sender.
    pub fn transfer(
        &self,
        from: &AccountName,
        to: &AccountName,
        quantity: &Amount,
        memo: &str,
    ) -> Result<(), LedgerError> {
        if from == to {
            return Err(LedgerError::SelfTransfer);
        }
        self.host.require_auth(from)?;
        if !self.host.is_account(to) {
            return Err(LedgerError::AccountNotFound { name: to.clone() });
        }

        let code = quantity.symbol.code().clone();
        let record = self
            .store
            .find_supply(&code)?
            .ok_or(LedgerError::SupplyNotFound { code })?;

        quantity.validate()?;
        if !quantity.is_positive() {
            return Err(LedgerError::NonPositiveQuantity);
        }
        record.supply.require_same_symbol(quantity)?;
        check_memo(memo)?;

        let notice = TransferNoticePayload {
            from: from.clone(),
            to: to.clone(),
            quantity: quantity.clone(),
            memo: memo.to_string(),
        };
        let notice_bytes = bincode::serialize(&notice)
            .map_err(|e| LedgerError::SerializationError(e.to_string()))?;
        self.host.notify(from, &notice_bytes);
        self.host.notify(to, &notice_bytes);

        if record.authorize {
            if let Some(authorizer) = &record.authorizer {
                let request = AuthorizeRequestPayload {
                    from: from.clone(),
                    to: to.clone(),
                    quantity: quantity.clone(),
                    memo: memo.to_string(),
                };
                let args = bincode::serialize(&request)
                    .map_err(|e| LedgerError::SerializationError(e.to_string()))?;
                self.host
                    .delegate(authorizer, AUTHORIZE_ACTION, &args, &self.authority)?;
                debug!(%authorizer, "transfer approved by authorizer");
            }
        }

        let payer = if self.host.has_authorized(to) { to } else { from };

        // Stage both sides before the first write.
        let debited = self.debited_balance(from, quantity)?;
        let credited = self.credited_balance(to, quantity)?;
        self.store.put_balance(from, debited, from)?;
        self.store.put_balance(to, credited, payer)?;

        info!(%from, %to, quantity = %quantity, "tokens transferred");
        Ok(())
    }

    // =========================================================================
    // BALANCE STORE
    // =========================================================================

    /// Creates an empty balance record for `(owner, symbol)`, charged to
    /// `storage_payer`. Idempotent: an existing record is left untouched.
    pub fn open(
        &self,
        owner: &AccountName,
        symbol: &Symbol,
        storage_payer: &AccountName,
    ) -> Result<(), LedgerError> {
        self.host.require_auth(storage_payer)?;
        if !self.host.is_account(owner) {
            return Err(LedgerError::AccountNotFound {
                name: owner.clone(),
            });
        }

        let code = symbol.code().clone();
        let record = self
            .store
            .find_supply(&code)?
            .ok_or(LedgerError::SupplyNotFound { code: code.clone() })?;
        if record.supply.symbol != *symbol {
            return Err(LedgerError::SymbolMismatch {
                expected: record.supply.symbol.clone(),
                actual: symbol.clone(),
            });
        }

        if self.store.find_balance(owner, &code)?.is_none() {
            self.store
                .put_balance(owner, BalanceRecord::zero(symbol.clone()), storage_payer)?;
            debug!(%owner, symbol = %symbol, payer = %storage_payer, "balance opened");
        }
        Ok(())
    }

    /// Deletes the `(owner, symbol)` balance record. Owner-only, and the
    /// balance must be exactly zero.
    pub fn close(&self, owner: &AccountName, symbol: &Symbol) -> Result<(), LedgerError> {
        self.host.require_auth(owner)?;

        let code = symbol.code().clone();
        let record = self
            .store
            .find_balance(owner, &code)?
            .ok_or(LedgerError::BalanceNotFound {
                owner: owner.clone(),
                code: code.clone(),
            })?;
        if record.balance.amount != 0 {
            return Err(LedgerError::NonZeroBalance {
                balance: record.balance,
            });
        }

        self.store.erase_balance(owner, &code)?;
        debug!(%owner, symbol = %symbol, "balance closed");
        Ok(())
    }

    // =========================================================================
    // INTERNAL: STAGED BALANCE MUTATIONS
    // =========================================================================

    /// Computes the post-credit record for `(owner, value.symbol)`. A
    /// missing record becomes a new one holding `value`.
    fn credited_balance(
        &self,
        owner: &AccountName,
        value: &Amount,
    ) -> Result<BalanceRecord, LedgerError> {
        match self.store.find_balance(owner, value.symbol.code())? {
            Some(record) => Ok(BalanceRecord::new(record.balance.checked_add(value)?)),
            None => Ok(BalanceRecord::new(value.clone())),
        }
    }

    /// Computes the post-debit record for `(owner, value.symbol)`. The
    /// record must exist and cover `value`.
    fn debited_balance(
        &self,
        owner: &AccountName,
        value: &Amount,
    ) -> Result<BalanceRecord, LedgerError> {
        let record = self
            .store
            .find_balance(owner, value.symbol.code())?
            .ok_or_else(|| LedgerError::BalanceNotFound {
                owner: owner.clone(),
                code: value.symbol.code().clone(),
            })?;
        if record.balance.amount < value.amount {
            return Err(LedgerError::InsufficientBalance {
                available: record.balance,
                required: value.clone(),
            });
        }
        Ok(BalanceRecord::new(record.balance.checked_sub(value)?))
    }
}
