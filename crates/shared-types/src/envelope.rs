//! # Request & Response Envelopes
//!
//! The unit of wire exchange between an application and a signature provider.
//!
//! ## Protocol Properties
//!
//! - **Versioning**: Every request carries the transport protocol `version`.
//! - **Correlation**: A request mints a fresh `id`; the response echoes it.
//! - **Single Variant**: `request` / `response` hold exactly one populated
//!   variant key. Both variant slots are optional in the type so that a
//!   malformed payload can still be represented and rejected by the engine.

use crate::entities::{Authorizer, EnvelopeDataType, HexAbi, SelectiveDisclosureType, Transaction};
use crate::errors::ErrorResponse;
use crate::manifest::Manifest;
use crate::security::SecurityExclusions;
use serde::{Deserialize, Serialize};

// =============================================================================
// REQUEST SIDE
// =============================================================================

/// One item a selective disclosure request asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disclosure {
    #[serde(rename = "type")]
    pub kind: SelectiveDisclosureType,
}

/// Body of a selective disclosure request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectiveDisclosureRequest {
    pub disclosures: Vec<Disclosure>,
}

/// Body of a transaction signature request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSignatureRequest {
    pub chain_id: String,
    /// Public keys whose private counterparts must sign.
    pub public_keys: Vec<String>,
    /// ABIs for every contract with an action in the transaction.
    pub abis: Vec<HexAbi>,
    pub transaction: Transaction,
}

/// The request payload: a union over the request variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selective_disclosure: Option<SelectiveDisclosureRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_signature: Option<TransactionSignatureRequest>,
}

impl ProviderRequest {
    /// A request carrying only a selective disclosure.
    #[must_use]
    pub fn selective_disclosure(body: SelectiveDisclosureRequest) -> Self {
        Self {
            selective_disclosure: Some(body),
            transaction_signature: None,
        }
    }

    /// A request carrying only a transaction signature.
    #[must_use]
    pub fn transaction_signature(body: TransactionSignatureRequest) -> Self {
        Self {
            selective_disclosure: None,
            transaction_signature: Some(body),
        }
    }

    /// The populated variant. Selective disclosure wins if both are set.
    #[must_use]
    pub fn data_type(&self) -> Option<EnvelopeDataType> {
        if self.selective_disclosure.is_some() {
            Some(EnvelopeDataType::SelectiveDisclosure)
        } else if self.transaction_signature.is_some() {
            Some(EnvelopeDataType::TransactionSignature)
        } else {
            None
        }
    }
}

/// The envelope an application hands to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    /// Transport protocol version.
    pub version: String,
    /// Correlation token, unique per request.
    pub id: String,
    /// Domain the application claims to be served from.
    pub declared_domain: String,
    /// Where the provider returns control after responding.
    pub return_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    /// Key the provider may use to encrypt its response. Carried, never read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_exclusions: Option<SecurityExclusions>,
    /// Manifest entry for the chain a transaction targets: the per-chain
    /// `{account, domain, appmeta, whitelist}` content, not the whole file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<Manifest>,
    pub request: ProviderRequest,
}

// =============================================================================
// RESPONSE SIDE
// =============================================================================

/// Body of a selective disclosure response: authorizers or an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SelectiveDisclosureResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorizers: Option<Vec<Authorizer>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

/// Body of a transaction signature response: the signed transaction or an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSignatureResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_transaction: Option<Transaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

/// The response payload: a union over the response variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selective_disclosure: Option<SelectiveDisclosureResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_signature: Option<TransactionSignatureResponse>,
}

impl ProviderResponse {
    /// A response carrying only a selective disclosure body.
    #[must_use]
    pub fn selective_disclosure(body: SelectiveDisclosureResponse) -> Self {
        Self {
            selective_disclosure: Some(body),
            transaction_signature: None,
        }
    }

    /// A response carrying only a transaction signature body.
    #[must_use]
    pub fn transaction_signature(body: TransactionSignatureResponse) -> Self {
        Self {
            selective_disclosure: None,
            transaction_signature: Some(body),
        }
    }

    /// The populated variant. Selective disclosure wins if both are set.
    #[must_use]
    pub fn data_type(&self) -> Option<EnvelopeDataType> {
        if self.selective_disclosure.is_some() {
            Some(EnvelopeDataType::SelectiveDisclosure)
        } else if self.transaction_signature.is_some() {
            Some(EnvelopeDataType::TransactionSignature)
        } else {
            None
        }
    }
}

/// The envelope a provider sends back through the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// Must equal the `id` of the request being answered.
    pub id: String,
    /// Provider device identity. Carried, never read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_key: Option<String>,
    pub response: ProviderResponse,
}

/// Either kind of envelope, as found on the wire.
///
/// Requests are tried first; a response never carries `declaredDomain` so it
/// cannot be mistaken for one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignatureProviderEnvelope {
    Request(RequestEnvelope),
    Response(ResponseEnvelope),
}

impl From<RequestEnvelope> for SignatureProviderEnvelope {
    fn from(envelope: RequestEnvelope) -> Self {
        Self::Request(envelope)
    }
}

impl From<ResponseEnvelope> for SignatureProviderEnvelope {
    fn from(envelope: ResponseEnvelope) -> Self {
        Self::Response(envelope)
    }
}
