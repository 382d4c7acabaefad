//! # Core Protocol Entities
//!
//! Leaf types embedded in request and response envelopes.
//!
//! ## Clusters
//!
//! - **Chain**: `Transaction`, `HexAbi`
//! - **Disclosure**: `Authorizer`, `SelectiveDisclosureType`
//! - **Routing**: `EnvelopeDataType`

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CLUSTER A: THE CHAIN
// =============================================================================

/// A transaction as it travels inside an envelope.
///
/// All binary content is hex encoded. On the request side `signatures` is
/// empty; on the response side it holds the signatures produced by the
/// provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Signatures over the packed transaction.
    pub signatures: Vec<String>,
    /// Compression flag (0 = none).
    pub compression: u32,
    /// Hex encoded context-free data.
    pub packed_context_free_data: String,
    /// Hex encoded serialized transaction.
    pub packed_trx: String,
}

/// A contract ABI keyed by its account, hex encoded for the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HexAbi {
    pub account_name: String,
    pub abi: String,
}

// =============================================================================
// CLUSTER B: DISCLOSURE
// =============================================================================

/// A key the provider is willing to sign with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorizer {
    pub public_key: String,
}

/// What a selective disclosure request asks the provider to reveal.
///
/// The protocol documentation also mentions `availableKeys`, but providers in
/// the field answer to `authorizers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectiveDisclosureType {
    Authorizers,
}

// =============================================================================
// CLUSTER C: ROUTING
// =============================================================================

/// The variant key carried by an envelope payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnvelopeDataType {
    SelectiveDisclosure,
    TransactionSignature,
}

impl EnvelopeDataType {
    /// The JSON key under which this variant appears.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::SelectiveDisclosure => "selectiveDisclosure",
            Self::TransactionSignature => "transactionSignature",
        }
    }

    /// All variant keys, in the order they are checked when classifying.
    pub const ALL: [EnvelopeDataType; 2] = [Self::SelectiveDisclosure, Self::TransactionSignature];
}

impl fmt::Display for EnvelopeDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
