//! # Domain Layer
//!
//! Pure protocol logic with no I/O dependencies: codec, classifier, request
//! construction, configuration and error types.

pub mod classifier;
pub mod codec;
pub mod config;
pub mod correlation;
pub mod error;
pub mod requests;

// Re-exports for convenience
pub use config::{ConfigError, ProviderConfig, AUTH_TRANSPORT_PROTOCOL_VERSION};
pub use correlation::CorrelationId;
pub use error::{CodecError, ProviderResult};
pub use requests::{BinaryAbi, PushTransactionArgs, SignParams};
