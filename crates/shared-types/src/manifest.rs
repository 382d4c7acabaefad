//! # Application Manifest & Metadata
//!
//! Data contracts an application publishes so a provider can decide whether
//! to trust it. They are validated structurally by the classifier and never
//! mutated by the engine.
//!
//! Keys follow the published file format: `spec_version` is snake_case, the
//! rest is camelCase.

use serde::{Deserialize, Serialize};

/// A contract action the application is allowed to request signatures for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAction {
    pub contract: String,
    pub action: String,
}

/// Per-chain manifest content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub account: String,
    pub domain: String,
    /// Location (and integrity hash) of the application metadata.
    pub appmeta: String,
    pub whitelist: Vec<ContractAction>,
}

/// A manifest bound to one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainManifest {
    pub chain_id: String,
    pub manifest: Manifest,
}

/// The application manifest file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppManifest {
    pub spec_version: String,
    pub manifests: Vec<ChainManifest>,
}

impl AppManifest {
    /// The manifest declared for `chain_id`, if any.
    #[must_use]
    pub fn for_chain(&self, chain_id: &str) -> Option<&Manifest> {
        self.manifests
            .iter()
            .find(|m| m.chain_id == chain_id)
            .map(|m| &m.manifest)
    }
}

/// Display information for one chain the application runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub chain_id: String,
    pub chain_name: String,
    pub icon: String,
}

/// The application metadata file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    pub spec_version: String,
    pub name: String,
    pub shortname: String,
    pub scope: String,
    pub apphome: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sslfingerprint: Option<String>,
    pub chains: Vec<ChainInfo>,
}
