//! Core entities for the Request List
//!
//! A [`Request`] is one decoded contract row. Its [`RequestId`] pairs the
//! kind with the on-chain index and renders as `IR-3` / `PR-3`.

use std::fmt;

use serde::{Deserialize, Serialize};
use shared_types::{Address, RawRecord, RequestKind, RequestStatus, U256};

use crate::domain::errors::{BoardError, DecodeError};

/// External identifier of a request: kind plus on-chain index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId {
    pub kind: RequestKind,
    pub index: u64,
}

impl RequestId {
    pub fn new(kind: RequestKind, index: u64) -> Self {
        Self { kind, index }
    }

    /// Reduce a row id to the numeric contract index.
    ///
    /// Accepts the kind-prefixed form (`IR-7`) or a bare decimal (`7`).
    /// Anything else, including the other kind's prefix, is rejected.
    pub fn parse_index(kind: RequestKind, raw: &str) -> Result<u64, BoardError> {
        let malformed = || BoardError::MalformedId {
            kind,
            raw: raw.to_string(),
        };

        let digits = raw.strip_prefix(kind.id_prefix()).unwrap_or(raw);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        digits.parse::<u64>().map_err(|_| malformed())
    }

    /// Parse a row id into a typed [`RequestId`].
    pub fn parse(kind: RequestKind, raw: &str) -> Result<Self, BoardError> {
        Self::parse_index(kind, raw).map(|index| Self::new(kind, index))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.id_prefix(), self.index)
    }
}

/// One integration request or problem report.
///
/// Records are never mutated in place; a changed status or vote count is
/// only observed through a fresh list fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub id: RequestId,
    pub title: String,
    pub description: String,
    pub status: RequestStatus,
    pub votes: U256,
    pub raised_by: Address,
}

impl Request {
    /// Decode a typed contract row.
    ///
    /// Fails only when the on-chain id exceeds `u64`. Status codes outside
    /// the defined set decode to [`RequestStatus::Unknown`].
    pub fn from_raw(kind: RequestKind, raw: RawRecord) -> Result<Self, DecodeError> {
        if raw.id > U256::from(u64::MAX) {
            return Err(DecodeError::IndexOverflow(raw.id.to_string()));
        }
        let status = if raw.status > U256::from(u64::MAX) {
            RequestStatus::Unknown(u8::MAX)
        } else {
            RequestStatus::from_code(raw.status.low_u64())
        };

        Ok(Self {
            id: RequestId::new(kind, raw.id.low_u64()),
            title: raw.title,
            description: raw.description,
            status,
            votes: raw.votes,
            raised_by: raw.raised_by,
        })
    }
}
