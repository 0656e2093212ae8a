//! # Runtime Configuration
//!
//! Environment first, command-line flags on top.

use std::env;

use eb_01_request_list::{ConfigError as ListConfigError, RequestListConfig};
use eb_02_contract_gateway::{ConfigError as GatewayConfigError, GatewayConfig};
use eb_telemetry::TelemetryConfig;
use serde::{Deserialize, Serialize};
use shared_types::Address;
use thiserror::Error;

use crate::cli::{Args, Command};

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub telemetry: TelemetryConfig,
    pub gateway: GatewayConfig,
    pub request_list: RequestListConfig,
    /// Account to act as, if fixed
    pub from: Option<Address>,
    /// In-memory contract instead of a node
    pub demo: bool,
}

impl RuntimeConfig {
    /// Read the environment, then apply CLI overrides.
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        Self::load_from(args, |name| env::var(name).ok())
    }

    /// Same as [`Self::load`] over an arbitrary variable source.
    ///
    /// Demo mode never reads gateway variables, so a malformed
    /// `CONTRACT_ADDRESS` cannot break it.
    pub fn load_from(
        args: &Args,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let gateway = if args.demo {
            GatewayConfig::default()
        } else {
            GatewayConfig::from_lookup(&lookup)?
        };
        let mut config = Self {
            telemetry: TelemetryConfig::from_lookup(&lookup),
            gateway,
            ..Default::default()
        };
        config.apply_args(args);
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(url) = &args.rpc_url {
            self.gateway.rpc_url = url.clone();
        }
        if let Some(contract) = args.contract {
            self.gateway.contract_address = contract;
        }
        if let Some(level) = &args.log_level {
            self.telemetry.log_level = level.clone();
        }
        self.telemetry.json_logs |= args.json_logs;
        self.request_list.enforce_owner_for_status |= args.enforce_owner;
        self.from = args.from.or(self.from);
        self.demo |= args.demo;

        if let Command::List(list) = &args.command {
            if let Some(rows) = list.rows {
                self.request_list.rows_per_page = rows;
            }
            if let Some(sort) = list.sort {
                self.request_list.default_sort = sort;
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.request_list.validate()?;
        // Demo mode never touches the network.
        if !self.demo {
            self.gateway.validate()?;
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Gateway configuration: {0}")]
    Gateway(#[from] GatewayConfigError),

    #[error("Request list configuration: {0}")]
    RequestList(#[from] ListConfigError),
}
