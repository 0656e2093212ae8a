//! # Ecosystem Board Telemetry
//!
//! Logging bootstrap shared by the `board` binary and anything else that
//! embeds the request lists.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use eb_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `EB_SERVICE_NAME` | `ecosystem-board` | Service name |
//! | `EB_LOG_LEVEL` / `RUST_LOG` | `info` | Filter directive |
//! | `EB_JSON_LOGS` | `false` | JSON lines output |
//! | `EB_LOG_TARGETS` | `false` | Show module targets |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("A global subscriber is already installed: {0}")]
    AlreadyInitialized(String),
}
