//! Gateway configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shared_types::Address;
use thiserror::Error;

/// Board deployment on the BTTC testnet.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0xf4b6085ae33f073ee7D20ab4F6b79158C8F7889E";
pub const DEFAULT_RPC_URL: &str = "https://pre-rpc.bt.io/";
pub const DEFAULT_CHAIN_ID: u64 = 1029;

/// Where the contract lives and how to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// JSON-RPC endpoint
    pub rpc_url: String,
    /// Board contract deployment
    pub contract_address: Address,
    /// Expected chain id (informational)
    pub chain_id: u64,
    /// Delay between receipt polls
    pub receipt_poll_interval_ms: u64,
    /// Receipt polls before giving up
    pub receipt_max_attempts: u32,
    /// Per-request HTTP timeout
    pub http_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            contract_address: Address::from_str(DEFAULT_CONTRACT_ADDRESS).unwrap_or_default(),
            chain_id: DEFAULT_CHAIN_ID,
            receipt_poll_interval_ms: 1500,
            receipt_max_attempts: 80,
            http_timeout_secs: 10,
        }
    }
}

impl GatewayConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `EB_RPC_URL`: JSON-RPC endpoint (default: https://pre-rpc.bt.io/)
    /// - `CONTRACT_ADDRESS`: board contract (default: the BTTC testnet deployment)
    /// - `EB_CHAIN_ID`: chain id (default: 1029)
    /// - `EB_RECEIPT_POLL_MS`: receipt poll interval (default: 1500)
    /// - `EB_RECEIPT_MAX_ATTEMPTS`: receipt polls before timing out (default: 80)
    /// - `EB_HTTP_TIMEOUT_SECS`: HTTP timeout (default: 10)
    ///
    /// Unparseable values fail here instead of silently falling back.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let number = |name: &'static str, default: u64| parse_var(&lookup, name, default);
        Ok(Self {
            rpc_url: lookup("EB_RPC_URL").unwrap_or(defaults.rpc_url),
            contract_address: match lookup("CONTRACT_ADDRESS") {
                Some(raw) => Address::from_str(&raw)
                    .map_err(|e| ConfigError::InvalidAddress(format!("{raw}: {e}")))?,
                None => defaults.contract_address,
            },
            chain_id: number("EB_CHAIN_ID", defaults.chain_id)?,
            receipt_poll_interval_ms: number(
                "EB_RECEIPT_POLL_MS",
                defaults.receipt_poll_interval_ms,
            )?,
            receipt_max_attempts: parse_var(
                &lookup,
                "EB_RECEIPT_MAX_ATTEMPTS",
                defaults.receipt_max_attempts,
            )?,
            http_timeout_secs: number("EB_HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rpc_url.starts_with("http://") || self.rpc_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(self.rpc_url.clone()));
        }
        if self.contract_address == Address::ZERO {
            return Err(ConfigError::InvalidAddress(
                "contract address is zero".to_string(),
            ));
        }
        if self.receipt_poll_interval_ms == 0 {
            return Err(ConfigError::ZeroValue("receipt_poll_interval_ms"));
        }
        if self.receipt_max_attempts == 0 {
            return Err(ConfigError::ZeroValue("receipt_max_attempts"));
        }
        if self.http_timeout_secs == 0 {
            return Err(ConfigError::ZeroValue("http_timeout_secs"));
        }
        Ok(())
    }

    pub fn receipt_poll_interval(&self) -> Duration {
        Duration::from_millis(self.receipt_poll_interval_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn parse_var<T: FromStr>(
    lookup: impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value: raw }),
        None => Ok(default),
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("RPC URL must be http(s): {0}")]
    InvalidUrl(String),

    #[error("Invalid contract address: {0}")]
    InvalidAddress(String),

    #[error("{name} is not a valid number: {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),
}
