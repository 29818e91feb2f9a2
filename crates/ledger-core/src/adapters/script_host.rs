use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::domain::{AccountName, LedgerError};
use crate::ports::HostEnv;

/// Scripted host environment for testing and development.
///
/// Accounts, granted authorizations, the clock, and authorizer verdicts
/// are all set explicitly by the test; notifications and delegated calls
/// are recorded for inspection. In production, the host transport
/// implements [`HostEnv`] directly.
pub struct ScriptedHost {
    accounts: RwLock<HashSet<AccountName>>,
    authorized: RwLock<HashSet<AccountName>>,
    rejecting: RwLock<HashSet<AccountName>>,
    now: AtomicU64,
    notifications: RwLock<Vec<(AccountName, Vec<u8>)>>,
    delegated: RwLock<Vec<(AccountName, String, Vec<u8>)>>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashSet::new()),
            authorized: RwLock::new(HashSet::new()),
            rejecting: RwLock::new(HashSet::new()),
            now: AtomicU64::new(0),
            notifications: RwLock::new(Vec::new()),
            delegated: RwLock::new(Vec::new()),
        }
    }

    /// Registers an existing account.
    pub fn add_account(&self, account: &AccountName) {
        if let Ok(mut accounts) = self.accounts.write() {
            accounts.insert(account.clone());
        }
    }

    /// Registers an account and marks its authorization as present in the
    /// acting context.
    pub fn grant_auth(&self, account: &AccountName) {
        self.add_account(account);
        if let Ok(mut authorized) = self.authorized.write() {
            authorized.insert(account.clone());
        }
    }

    /// Withdraws an account's authorization from the acting context.
    pub fn revoke_auth(&self, account: &AccountName) {
        if let Ok(mut authorized) = self.authorized.write() {
            authorized.remove(account);
        }
    }

    /// Scripts `target` to reject any delegated call.
    pub fn reject_delegated_calls(&self, target: &AccountName) {
        if let Ok(mut rejecting) = self.rejecting.write() {
            rejecting.insert(target.clone());
        }
    }

    pub fn set_now(&self, secs: u64) {
        self.now.store(secs, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }

    /// All notifications delivered so far, in order.
    pub fn notifications(&self) -> Vec<(AccountName, Vec<u8>)> {
        self.notifications
            .read()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    /// All delegated calls attempted so far, in order.
    pub fn delegated_calls(&self) -> Vec<(AccountName, String, Vec<u8>)> {
        self.delegated.read().map(|d| d.clone()).unwrap_or_default()
    }
}

impl Default for ScriptedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostEnv for ScriptedHost {
    fn require_auth(&self, account: &AccountName) -> Result<(), LedgerError> {
        let authorized = self
            .authorized
            .read()
            .map_err(|_| LedgerError::LockPoisoned)?;
        if authorized.contains(account) {
            Ok(())
        } else {
            Err(LedgerError::MissingAuthority {
                name: account.clone(),
            })
        }
    }

    fn is_account(&self, account: &AccountName) -> bool {
        self.accounts
            .read()
            .map(|accounts| accounts.contains(account))
            .unwrap_or(false)
    }

    fn has_authorized(&self, account: &AccountName) -> bool {
        self.authorized
            .read()
            .map(|authorized| authorized.contains(account))
            .unwrap_or(false)
    }

    fn now(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }

    fn notify(&self, account: &AccountName, payload: &[u8]) {
        if let Ok(mut notifications) = self.notifications.write() {
            notifications.push((account.clone(), payload.to_vec()));
        }
    }

    fn delegate(
        &self,
        target: &AccountName,
        action: &str,
        args: &[u8],
        _authority: &AccountName,
    ) -> Result<(), LedgerError> {
        if let Ok(mut delegated) = self.delegated.write() {
            delegated.push((target.clone(), action.to_string(), args.to_vec()));
        }
        let rejecting = self.rejecting.read().map_err(|_| LedgerError::LockPoisoned)?;
        if rejecting.contains(target) {
            return Err(LedgerError::AuthorizerRejected {
                authorizer: target.clone(),
            });
        }
        Ok(())
    }
}
