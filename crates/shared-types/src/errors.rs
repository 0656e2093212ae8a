//! # Error Types
//!
//! Parsing errors for the shared primitives.

use thiserror::Error;

/// Errors produced while parsing an [`crate::Address`] or [`crate::TxHash`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Input contained non-hex characters.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded byte length does not match the expected width.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Error produced when a request kind name cannot be recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown request kind: {0}")]
pub struct UnknownKind(pub String);
