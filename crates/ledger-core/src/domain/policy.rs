//! # Issuance Policy
//!
//! The ratchet-only policy surface of a supply record. `update` accepts a
//! whole [`PolicyUpdate`] and applies it atomically; validation enforces
//! the one-way "relaxable to stricter" rules in one place instead of
//! scattering inline comparisons.

use serde::{Deserialize, Serialize};

use super::entities::SupplyRecord;
use super::errors::LedgerError;
use super::value_objects::{AccountName, Amount};

/// Requested replacement for every policy field of a supply record.
///
/// A ratchet field may keep its current value or tighten; any attempt to
/// relax one fails validation and leaves the record untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyUpdate {
    /// Requested recall flag. Once false, can never return to true.
    pub recall: bool,
    /// Requested authorize flag. Same one-way rule as `recall`.
    pub authorize: bool,
    /// Transfer authorizer. Must be empty when `authorize` is false.
    pub authorizer: Option<AccountName>,
    /// New daily inflation-rate ceiling, ppm-scaled. `new <= old`.
    pub daily_inf_per_limit: u64,
    /// New yearly inflation-rate ceiling, ppm-scaled. `new <= old`.
    pub yearly_inf_per_limit: u64,
    /// New absolute daily issuance ceiling. `new.amount <= old.amount`.
    pub allowed_daily_inflation: Amount,
}

impl PolicyUpdate {
    /// Checks every ratchet rule against the record's current policy.
    ///
    /// Authorizer account existence is a host concern and is checked by
    /// the service, not here.
    pub fn validate_against(&self, current: &SupplyRecord) -> Result<(), LedgerError> {
        if self.recall && !current.recall {
            return Err(LedgerError::RecallRatchet);
        }
        if self.authorize {
            if !current.authorize {
                return Err(LedgerError::AuthorizeRatchet);
            }
        } else if self.authorizer.is_some() {
            return Err(LedgerError::AuthorizerNotEmpty);
        }
        if self.daily_inf_per_limit > current.daily_inf_per_limit {
            return Err(LedgerError::PolicyCeilingRaised {
                field: "daily inflation percent limit",
            });
        }
        if self.yearly_inf_per_limit > current.yearly_inf_per_limit {
            return Err(LedgerError::PolicyCeilingRaised {
                field: "yearly inflation percent limit",
            });
        }
        current
            .allowed_daily_inflation
            .require_same_symbol(&self.allowed_daily_inflation)?;
        if self.allowed_daily_inflation.amount > current.allowed_daily_inflation.amount {
            return Err(LedgerError::PolicyCeilingRaised {
                field: "absolute daily inflation limit",
            });
        }
        Ok(())
    }

    /// Overwrites the record's policy fields. Callers validate first.
    pub fn apply_to(&self, record: &mut SupplyRecord) {
        record.recall = self.recall;
        record.authorize = self.authorize;
        record.authorizer = self.authorizer.clone();
        record.daily_inf_per_limit = self.daily_inf_per_limit;
        record.yearly_inf_per_limit = self.yearly_inf_per_limit;
        record.allowed_daily_inflation = self.allowed_daily_inflation.clone();
    }

    /// A no-op update mirroring the record's current policy. Useful as a
    /// starting point for tightening a single field.
    #[must_use]
    pub fn keep_current(record: &SupplyRecord) -> Self {
        Self {
            recall: record.recall,
            authorize: record.authorize,
            authorizer: record.authorizer.clone(),
            daily_inf_per_limit: record.daily_inf_per_limit,
            yearly_inf_per_limit: record.yearly_inf_per_limit,
            allowed_daily_inflation: record.allowed_daily_inflation.clone(),
        }
    }
}
