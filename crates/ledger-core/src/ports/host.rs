use crate::domain::{AccountName, LedgerError};

/// Host environment collaborator.
///
/// The host delivers authenticated calls, so the core only ever consumes
/// pass/fail outcomes: it never sees credentials, signatures, or the
/// transport. Blocking calls (`delegate`) are synchronous from the core's
/// perspective; their failure unwinds the whole operation.
pub trait HostEnv: Send + Sync {
    /// Fails the operation unless the active caller carries `account`'s
    /// authorization.
    fn require_auth(&self, account: &AccountName) -> Result<(), LedgerError>;

    /// Whether `account` exists on the host.
    fn is_account(&self, account: &AccountName) -> bool;

    /// Whether `account` has granted authorization to the acting context.
    /// Used only to pick a storage payer during transfer.
    fn has_authorized(&self, account: &AccountName) -> bool;

    /// Current time in seconds.
    fn now(&self) -> u64;

    /// Fire-and-forget notification of an account's linked handlers.
    /// Delivery semantics are host-defined; the core ignores the outcome.
    fn notify(&self, account: &AccountName, payload: &[u8]);

    /// Synchronous delegated call to `target`, carrying `authority`'s
    /// permission. Must succeed for the calling operation to commit.
    fn delegate(
        &self,
        target: &AccountName,
        action: &str,
        args: &[u8],
        authority: &AccountName,
    ) -> Result<(), LedgerError>;
}
