//! Engine-local error types and the fixed rejection reasons.
//!
//! Every failure an operation surfaces to its caller is an [`ErrorResponse`].
//! The engine synthesizes only the reasons listed in [`reasons`]; any other
//! error is a pass-through copy of what the provider sent.

use shared_types::{ErrorCode, ErrorResponse};
use thiserror::Error;

/// Fixed reasons for rejections the engine raises itself.
pub mod reasons {
    /// A newer request superseded the pending one.
    pub const NEW_REQUEST: &str = "A new request was received.";
    /// The caller cancelled the pending request.
    pub const MANUAL_CANCEL: &str = "Transaction was manually rejected.";
    /// The response carried no known variant.
    pub const UNKNOWN_RESPONSE: &str = "The signature provider responded with an unknown response.";
    /// The pending record's channel closed without an outcome.
    pub const PENDING_DROPPED: &str = "The pending request was dropped without a response.";
}

/// Result type for engine operations
pub type ProviderResult<T> = Result<T, ErrorResponse>;

/// Codec failures. Codec functions report these instead of panicking.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Hex input has an odd number of digits
    #[error("hex string has odd length {0}")]
    OddLength(usize),

    /// Hex input contains a character outside `[0-9a-fA-F]`
    #[error("invalid hex character {character:?} at index {index}")]
    InvalidHexCharacter { character: char, index: usize },

    /// Any other hex decoding failure
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded bytes are not UTF-8 text
    #[error("decoded bytes are not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// JSON (de)serialization of an envelope failed
    #[error("envelope JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<hex::FromHexError> for CodecError {
    fn from(e: hex::FromHexError) -> Self {
        match e {
            hex::FromHexError::InvalidHexCharacter { c, index } => {
                CodecError::InvalidHexCharacter { character: c, index }
            }
            other => CodecError::InvalidHex(other.to_string()),
        }
    }
}

impl From<CodecError> for ErrorResponse {
    fn from(e: CodecError) -> Self {
        ErrorResponse::new(ErrorCode::ParsingError, e.to_string())
    }
}

/// Rejection for a request superseded by a newer one.
pub fn superseded() -> ErrorResponse {
    ErrorResponse::unexpected(reasons::NEW_REQUEST)
}

/// Rejection for a manually cancelled request.
pub fn manually_cancelled() -> ErrorResponse {
    ErrorResponse::unexpected(reasons::MANUAL_CANCEL)
}

/// Rejection for a response with no recognised variant.
pub fn unknown_response() -> ErrorResponse {
    ErrorResponse::unexpected(reasons::UNKNOWN_RESPONSE)
}

/// Outcome for a pending record whose channel closed without a value.
pub fn pending_dropped() -> ErrorResponse {
    ErrorResponse::unexpected(reasons::PENDING_DROPPED)
}
