//! Error types for the Request List
//!
//! `BoardError` is what callers of the controller see. `GatewayError` is the
//! outbound port's error; adapters convert their transport errors into it.

use shared_types::{Address, RequestKind, TxHash};
use thiserror::Error;

/// All errors that can surface from the request list controller
#[derive(Debug, Error)]
pub enum BoardError {
    /// No wallet session or signer is available
    #[error("Wallet not connected")]
    NotConnected,

    /// Status change attempted from an account that does not own the contract
    #[error("Unauthorized: wallet {} is not the contract owner {owner}", display_wallet(.wallet))]
    Unauthorized {
        wallet: Option<Address>,
        owner: Address,
    },

    /// Contract call, submission or confirmation failed
    #[error("Gateway failure: {0}")]
    Gateway(#[from] GatewayError),

    /// Row id did not reduce to a numeric index
    #[error("Malformed {kind} id: {raw:?}")]
    MalformedId { kind: RequestKind, raw: String },

    /// Status code outside the six defined codes
    #[error("Undefined status code: {0}")]
    UndefinedStatus(u8),

    /// Action key not recognized
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// New request is missing a title or description
    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),

    /// Rows-per-page outside the supported sizes
    #[error("Invalid page size: {0} (expected 10, 15 or 20)")]
    InvalidPageSize(usize),

    /// A contract row could not be decoded
    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),
}

fn display_wallet(wallet: &Option<Address>) -> String {
    wallet
        .map(|w| w.to_checksum())
        .unwrap_or_else(|| "<none>".to_string())
}

/// Failure turning a contract row into a [`crate::Request`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Request index does not fit in 64 bits: {0}")]
    IndexOverflow(String),
}

/// Outbound port error for contract and wallet operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("No signer available")]
    NoSigner,

    #[error("RPC failure: {0}")]
    Rpc(String),

    #[error("Transaction reverted: {reason}")]
    Reverted { reason: String },

    #[error("Transaction not confirmed after {attempts} receipt polls")]
    Timeout { attempts: u32 },

    #[error("Failed to decode contract response: {0}")]
    Decode(String),

    #[error("Unknown transaction: {0}")]
    UnknownTransaction(TxHash),

    #[error("Injected failure: {0}")]
    Injected(String),
}
