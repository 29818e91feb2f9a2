use serde::{Deserialize, Serialize};

use crate::domain::{AccountName, Amount};

/// Action name of the delegated authorizer call issued during transfer.
pub const AUTHORIZE_ACTION: &str = "authorize";

/// Sent to both parties of a transfer via `HostEnv::notify`.
/// Fire-and-forget: delivery failures never abort the transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferNoticePayload {
    pub from: AccountName,
    pub to: AccountName,
    pub quantity: Amount,
    pub memo: String,
}

/// Arguments of the synchronous authorizer call. Rejection by the
/// authorizer fails the whole transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizeRequestPayload {
    pub from: AccountName,
    pub to: AccountName,
    pub quantity: Amount,
    pub memo: String,
}
