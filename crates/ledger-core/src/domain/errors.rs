use super::value_objects::{AccountName, Amount, Symbol, SymbolCode};
use thiserror::Error;

/// Errors produced by the ledger core.
///
/// Every failure is fatal to the operation that raised it: no partial
/// state is ever written, and no retry happens inside the core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    // --- Malformed input ---
    #[error("invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("invalid account name: {0}")]
    InvalidAccountName(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("amount out of range")]
    AmountOverflow,

    #[error("symbol mismatch: expected {expected}, got {actual}")]
    SymbolMismatch { expected: Symbol, actual: Symbol },

    #[error("quantity must be positive")]
    NonPositiveQuantity,

    #[error("memo has {actual} bytes, limit is {max}")]
    MemoTooLong { max: usize, actual: usize },

    // --- Precondition violations ---
    #[error("token with symbol {code} does not exist")]
    SupplyNotFound { code: SymbolCode },

    #[error("token with symbol {code} already exists")]
    SupplyAlreadyExists { code: SymbolCode },

    #[error("tokens can only be issued to the issuer account")]
    IssueToNonIssuer,

    #[error("no balance record for {owner} / {code}")]
    BalanceNotFound { owner: AccountName, code: SymbolCode },

    #[error("insufficient balance: available {available}, required {required}")]
    InsufficientBalance { available: Amount, required: Amount },

    #[error("quantity exceeds available supply: {available} available, {requested} requested")]
    SupplyCeilingExceeded { available: Amount, requested: Amount },

    #[error("daily inflation limit reached: {actual_ppm} ppm, limit {limit_ppm} ppm")]
    DailyInflationReached { limit_ppm: u64, actual_ppm: u64 },

    #[error("yearly inflation limit reached: {actual_ppm} ppm, limit {limit_ppm} ppm")]
    YearlyInflationReached { limit_ppm: u64, actual_ppm: u64 },

    #[error("cannot enable recall once disabled")]
    RecallRatchet,

    #[error("cannot enable transfer authorization once disabled")]
    AuthorizeRatchet,

    #[error("cannot raise {field}")]
    PolicyCeilingRaised { field: &'static str },

    #[error("authorizer must be empty when authorization is disabled")]
    AuthorizerNotEmpty,

    #[error("cannot transfer to self")]
    SelfTransfer,

    #[error("balance is not zero: {balance}")]
    NonZeroBalance { balance: Amount },

    // --- External rejections ---
    #[error("missing authority of {name}")]
    MissingAuthority { name: AccountName },

    #[error("account does not exist: {name}")]
    AccountNotFound { name: AccountName },

    #[error("transfer rejected by authorizer {authorizer}")]
    AuthorizerRejected { authorizer: AccountName },

    // --- Host / infrastructure ---
    #[error("storage error: {0}")]
    StorageError(String),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("lock poisoned")]
    LockPoisoned,
}
