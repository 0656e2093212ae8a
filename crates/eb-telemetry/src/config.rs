//! Telemetry configuration from environment variables.

use std::env;

use serde::{Deserialize, Serialize};

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Service name attached to the startup log line
    pub service_name: String,

    /// Filter directive (trace, debug, info, warn, error, or full
    /// `EnvFilter` syntax such as `eb_01_request_list=debug`)
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output
    pub json_logs: bool,

    /// Include the module target in each line
    pub log_targets: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "ecosystem-board".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            log_targets: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `EB_SERVICE_NAME`: Service name (default: ecosystem-board)
    /// - `EB_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `EB_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `EB_LOG_TARGETS`: Show module targets (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            service_name: lookup("EB_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: lookup("EB_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: lookup("EB_JSON_LOGS")
                .map(|v| is_truthy(&v))
                .unwrap_or(defaults.json_logs),

            log_targets: lookup("EB_LOG_TARGETS")
                .map(|v| is_truthy(&v))
                .unwrap_or(defaults.log_targets),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}
