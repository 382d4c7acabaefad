//! Engine configuration with validation.
//!
//! The values here are fixed for the lifetime of an engine and written into
//! every request envelope it builds.

use crate::domain::classifier;
use serde::{Deserialize, Serialize};
use shared_types::{AppManifest, SecurityExclusions};
use std::env;
use thiserror::Error;

/// Transport protocol version written into every request envelope.
pub const AUTH_TRANSPORT_PROTOCOL_VERSION: &str = "0.0.1";

/// Identity and routing metadata for a signature provider engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProviderConfig {
    /// Domain the application claims to be served from
    pub declared_domain: String,
    /// Where the provider returns control after responding
    pub return_url: String,
    /// Callback the provider may invoke (empty when unused)
    pub callback_url: String,
    /// Provider-side checks to skip; omitted from envelopes when `None`
    pub security_exclusions: Option<SecurityExclusions>,
    /// Application manifest; signing requests carry its entry for their chain
    pub manifest: Option<AppManifest>,
}

impl ProviderConfig {
    /// Create a configuration with the two mandatory fields.
    pub fn new(declared_domain: impl Into<String>, return_url: impl Into<String>) -> Self {
        Self {
            declared_domain: declared_domain.into(),
            return_url: return_url.into(),
            ..Default::default()
        }
    }

    /// Set the callback URL.
    #[must_use]
    pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
        self.callback_url = callback_url.into();
        self
    }

    /// Set the security exclusions.
    #[must_use]
    pub fn with_security_exclusions(mut self, exclusions: SecurityExclusions) -> Self {
        self.security_exclusions = Some(exclusions);
        self
    }

    /// Attach an application manifest.
    #[must_use]
    pub fn with_manifest(mut self, manifest: AppManifest) -> Self {
        self.manifest = Some(manifest);
        self
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SP_DECLARED_DOMAIN`: Declared domain (default: empty, fails validation)
    /// - `SP_RETURN_URL`: Return URL (default: empty)
    /// - `SP_CALLBACK_URL`: Callback URL (default: empty)
    pub fn from_env() -> Self {
        Self {
            declared_domain: env::var("SP_DECLARED_DOMAIN").unwrap_or_default(),
            return_url: env::var("SP_RETURN_URL").unwrap_or_default(),
            callback_url: env::var("SP_CALLBACK_URL").unwrap_or_default(),
            security_exclusions: None,
            manifest: None,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.declared_domain.trim().is_empty() {
            return Err(ConfigError::MissingDeclaredDomain);
        }

        if let Some(manifest) = &self.manifest {
            let value = serde_json::to_value(manifest)
                .map_err(|e| ConfigError::InvalidManifest(e.to_string()))?;
            if !classifier::is_app_manifest(&value) {
                return Err(ConfigError::InvalidManifest(
                    "manifests and every whitelist must be non-empty".into(),
                ));
            }
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No declared domain configured
    #[error("declared domain is required")]
    MissingDeclaredDomain,
    /// Manifest does not have the published shape
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),
}
