//! # Provider Telemetry
//!
//! Structured logging for applications embedding the signature provider
//! engine. The engine itself only emits `tracing` events; this crate installs
//! the subscriber that renders them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use provider_telemetry::{init_tracing, TelemetryConfig};
//!
//! fn main() {
//!     init_tracing(&TelemetryConfig::from_env()).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SP_SERVICE_NAME` | `signature-provider` | Service name in log output |
//! | `SP_LOG_LEVEL` | `RUST_LOG`, then `info` | Log level filter |
//! | `SP_JSON_LOGS` | `false` | JSON formatted logs |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::{TelemetryConfig, DEFAULT_SERVICE_NAME};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    /// A global subscriber is already installed.
    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized,

    /// The log level is not a valid filter directive.
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),
}

/// Install the global tracing subscriber described by `config`.
///
/// Can succeed at most once per process; later calls return
/// `TelemetryError::AlreadyInitialized` and leave the first subscriber in
/// place.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    logging::init_subscriber(config)
}
