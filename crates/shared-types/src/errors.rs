//! # Error Types
//!
//! The closed error taxonomy shared by signature providers and their callers.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Domain failure categories a signature provider can report.
///
/// Serialized as the ordinal integer, which is how providers put it on the
/// wire (`0` = `BiometricsDisabled` ... `12` = `UnexpectedError`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum ErrorCode {
    BiometricsDisabled = 0,
    KeychainError = 1,
    ManifestError = 2,
    MetadataError = 3,
    NetworkError = 4,
    ParsingError = 5,
    ResourceIntegrityError = 6,
    ResourceRetrievalError = 7,
    SigningError = 8,
    TransactionError = 9,
    VaultError = 10,
    WhitelistingError = 11,
    UnexpectedError = 12,
}

impl ErrorCode {
    /// Every code, in ordinal order.
    pub const ALL: [ErrorCode; 13] = [
        Self::BiometricsDisabled,
        Self::KeychainError,
        Self::ManifestError,
        Self::MetadataError,
        Self::NetworkError,
        Self::ParsingError,
        Self::ResourceIntegrityError,
        Self::ResourceRetrievalError,
        Self::SigningError,
        Self::TransactionError,
        Self::VaultError,
        Self::WhitelistingError,
        Self::UnexpectedError,
    ];

    /// The protocol name of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BiometricsDisabled => "biometricsDisabled",
            Self::KeychainError => "keychainError",
            Self::ManifestError => "manifestError",
            Self::MetadataError => "metadataError",
            Self::NetworkError => "networkError",
            Self::ParsingError => "parsingError",
            Self::ResourceIntegrityError => "resourceIntegrityError",
            Self::ResourceRetrievalError => "resourceRetrievalError",
            Self::SigningError => "signingError",
            Self::TransactionError => "transactionError",
            Self::VaultError => "vaultError",
            Self::WhitelistingError => "whitelistingError",
            Self::UnexpectedError => "unexpectedError",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordinal that does not name any [`ErrorCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unknown error code: {0}")]
pub struct UnknownErrorCode(pub u8);

impl TryFrom<u8> for ErrorCode {
    type Error = UnknownErrorCode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(UnknownErrorCode(value))
    }
}

impl From<ErrorCode> for u8 {
    fn from(code: ErrorCode) -> Self {
        code as u8
    }
}

/// A failure reported by (or on behalf of) a signature provider.
///
/// This is the value every rejected operation surfaces to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{error_code}: {reason}")]
pub struct ErrorResponse {
    /// Failure category.
    pub error_code: ErrorCode,
    /// Human readable reason.
    #[serde(default)]
    pub reason: String,
    /// Free-form context supplied by the reporter (may be empty or absent).
    #[serde(default)]
    pub contextual_info: String,
}

impl ErrorResponse {
    /// Create an error with empty contextual info.
    pub fn new(error_code: ErrorCode, reason: impl Into<String>) -> Self {
        Self {
            error_code,
            reason: reason.into(),
            contextual_info: String::new(),
        }
    }

    /// Attach contextual info.
    #[must_use]
    pub fn with_context(mut self, contextual_info: impl Into<String>) -> Self {
        self.contextual_info = contextual_info.into();
        self
    }

    /// Shorthand for an `UnexpectedError`.
    pub fn unexpected(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnexpectedError, reason)
    }

    /// Shorthand for a `ParsingError`.
    pub fn parsing(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::ParsingError, reason)
    }
}
