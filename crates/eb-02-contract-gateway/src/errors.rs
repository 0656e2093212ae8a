//! Adapter-level errors and their mapping onto the port's [`GatewayError`].

use eb_01_request_list::GatewayError;
use thiserror::Error;

use crate::abi;

/// Malformed call or return data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    #[error("Read past end of data at offset {offset} (data length {len})")]
    OutOfBounds { offset: usize, len: usize },

    #[error("Invalid UTF-8 string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("Value does not fit its type: {0}")]
    ValueOverflow(String),

    #[error("Array declares {declared} elements but only {available} fit")]
    LengthMismatch { declared: usize, available: usize },

    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}

/// Errors that can occur when talking to the JSON-RPC endpoint.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("RPC error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
        data: Option<String>,
    },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Connection failed: {0}")]
    Connection(String),
}

impl From<AbiError> for GatewayError {
    fn from(err: AbiError) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

impl From<RpcError> for GatewayError {
    fn from(err: RpcError) -> Self {
        match err {
            RpcError::Rpc {
                ref message,
                ref data,
                ..
            } if message.contains("revert") => {
                let reason = data
                    .as_deref()
                    .and_then(|d| abi::from_hex(d).ok())
                    .and_then(|bytes| abi::decode_revert_reason(&bytes))
                    .unwrap_or_else(|| message.clone());
                GatewayError::Reverted { reason }
            }
            RpcError::Parse(msg) => GatewayError::Decode(msg),
            other => GatewayError::Rpc(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revert_data_is_decoded() {
        let err = RpcError::Rpc {
            code: 3,
            message: "execution reverted".into(),
            data: Some(abi::to_hex(&abi::encode_revert_reason("Only owner"))),
        };
        assert_eq!(
            GatewayError::from(err),
            GatewayError::Reverted {
                reason: "Only owner".into()
            }
        );
    }

    #[test]
    fn test_revert_without_data_keeps_message() {
        let err = RpcError::Rpc {
            code: -32000,
            message: "execution reverted".into(),
            data: None,
        };
        assert_eq!(
            GatewayError::from(err),
            GatewayError::Reverted {
                reason: "execution reverted".into()
            }
        );
    }

    #[test]
    fn test_other_rpc_errors() {
        let err = RpcError::Rpc {
            code: -32601,
            message: "method not found".into(),
            data: None,
        };
        assert!(matches!(GatewayError::from(err), GatewayError::Rpc(_)));
        assert!(matches!(
            GatewayError::from(RpcError::Parse("bad".into())),
            GatewayError::Decode(_)
        ));
        assert!(matches!(
            GatewayError::from(AbiError::InvalidHex("zz".into())),
            GatewayError::Decode(_)
        ));
    }
}
