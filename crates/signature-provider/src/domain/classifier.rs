//! # Variant Classifier
//!
//! Structural predicates that decide which protocol variant an untyped JSON
//! value conforms to.
//!
//! ## Validation Policy
//!
//! The classifier proves shape, not content. A required key is satisfied by
//! its mere presence on the object: an empty string or `null` value counts.
//! Value types are never checked. Non-object input (including arrays) never
//! satisfies a predicate.
//!
//! The per-variant predicates (`is_selective_disclosure_*`,
//! `is_transaction_signature_*`) are plain membership tests and are not
//! mutually exclusive: an object carrying both keys passes both, and a body
//! holding only `error` still passes. Callers branch on `error` themselves.
//!
//! The `classify_*` functions return the matched body by reference so callers
//! do not look the key up twice.

use serde_json::{Map, Value};
use shared_types::EnvelopeDataType;

const SELECTIVE_DISCLOSURE: &str = EnvelopeDataType::SelectiveDisclosure.key();
const TRANSACTION_SIGNATURE: &str = EnvelopeDataType::TransactionSignature.key();

const REQUEST_ENVELOPE_KEYS: [&str; 4] = ["id", "declaredDomain", "returnUrl", "request"];
const RESPONSE_ENVELOPE_KEYS: [&str; 2] = ["id", "response"];
const APP_MANIFEST_KEYS: [&str; 2] = ["spec_version", "manifests"];
const CHAIN_MANIFEST_KEYS: [&str; 2] = ["chainId", "manifest"];
const MANIFEST_KEYS: [&str; 4] = ["account", "domain", "appmeta", "whitelist"];
const CONTRACT_ACTION_KEYS: [&str; 2] = ["contract", "action"];
const APP_METADATA_KEYS: [&str; 7] = [
    "spec_version",
    "name",
    "shortname",
    "scope",
    "apphome",
    "icon",
    "chains",
];
const CHAIN_INFO_KEYS: [&str; 3] = ["chainId", "chainName", "icon"];

// =============================================================================
// TAGGED RESULTS
// =============================================================================

/// A request payload narrowed to its variant body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RequestVariant<'a> {
    SelectiveDisclosure(&'a Value),
    TransactionSignature(&'a Value),
}

/// A response payload narrowed to its variant body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseVariant<'a> {
    SelectiveDisclosure(&'a Value),
    TransactionSignature(&'a Value),
}

impl ResponseVariant<'_> {
    /// Which variant matched.
    #[must_use]
    pub fn data_type(&self) -> EnvelopeDataType {
        match self {
            Self::SelectiveDisclosure(_) => EnvelopeDataType::SelectiveDisclosure,
            Self::TransactionSignature(_) => EnvelopeDataType::TransactionSignature,
        }
    }
}

// =============================================================================
// ENVELOPES
// =============================================================================

/// True for an object with `id`, `declaredDomain`, `returnUrl` and `request`,
/// whose `request` carries at least one variant key.
pub fn is_request_envelope(value: &Value) -> bool {
    has_required_keys(value, &REQUEST_ENVELOPE_KEYS)
        && has_at_least_one_key(&value["request"], &[SELECTIVE_DISCLOSURE, TRANSACTION_SIGNATURE])
}

/// True for an object with `id` and `response`, whose `response` carries at
/// least one variant key.
pub fn is_response_envelope(value: &Value) -> bool {
    has_required_keys(value, &RESPONSE_ENVELOPE_KEYS)
        && has_at_least_one_key(&value["response"], &[SELECTIVE_DISCLOSURE, TRANSACTION_SIGNATURE])
}

/// True if the request payload has a `selectiveDisclosure` key.
pub fn is_selective_disclosure_request(request: &Value) -> bool {
    has_key(request, SELECTIVE_DISCLOSURE)
}

/// True if the request payload has a `transactionSignature` key.
pub fn is_transaction_signature_request(request: &Value) -> bool {
    has_key(request, TRANSACTION_SIGNATURE)
}

/// True if the response payload has a `selectiveDisclosure` key.
pub fn is_selective_disclosure_response(response: &Value) -> bool {
    has_key(response, SELECTIVE_DISCLOSURE)
}

/// True if the response payload has a `transactionSignature` key.
pub fn is_transaction_signature_response(response: &Value) -> bool {
    has_key(response, TRANSACTION_SIGNATURE)
}

/// Narrow a request payload. Selective disclosure is checked first.
pub fn classify_request(request: &Value) -> Option<RequestVariant<'_>> {
    let object = request.as_object()?;
    if let Some(body) = object.get(SELECTIVE_DISCLOSURE) {
        Some(RequestVariant::SelectiveDisclosure(body))
    } else {
        object
            .get(TRANSACTION_SIGNATURE)
            .map(RequestVariant::TransactionSignature)
    }
}

/// Narrow a response payload. Selective disclosure is checked first.
pub fn classify_response(response: &Value) -> Option<ResponseVariant<'_>> {
    let object = response.as_object()?;
    if let Some(body) = object.get(SELECTIVE_DISCLOSURE) {
        Some(ResponseVariant::SelectiveDisclosure(body))
    } else {
        object
            .get(TRANSACTION_SIGNATURE)
            .map(ResponseVariant::TransactionSignature)
    }
}

/// The variant carried by a request or response envelope, if `value` is one.
pub fn envelope_data_type(value: &Value) -> Option<EnvelopeDataType> {
    let payload = if is_request_envelope(value) {
        &value["request"]
    } else if is_response_envelope(value) {
        &value["response"]
    } else {
        return None;
    };

    EnvelopeDataType::ALL
        .into_iter()
        .find(|kind| has_key(payload, kind.key()))
}

// =============================================================================
// MANIFEST & METADATA
// =============================================================================

/// True for an application manifest whose `manifests` is a non-empty array
/// of valid chain manifests.
pub fn is_app_manifest(value: &Value) -> bool {
    has_required_keys(value, &APP_MANIFEST_KEYS)
        && every_in_non_empty_array(&value["manifests"], is_chain_manifest)
}

/// True for `{ chainId, manifest }` with a valid manifest body.
pub fn is_chain_manifest(value: &Value) -> bool {
    has_required_keys(value, &CHAIN_MANIFEST_KEYS) && is_manifest(&value["manifest"])
}

/// True for manifest content whose `whitelist` is a non-empty array of
/// `{ contract, action }` entries.
pub fn is_manifest(value: &Value) -> bool {
    has_required_keys(value, &MANIFEST_KEYS)
        && every_in_non_empty_array(&value["whitelist"], is_contract_action)
}

/// True for application metadata whose `chains` is a non-empty array of
/// `{ chainId, chainName, icon }` entries.
pub fn is_app_metadata(value: &Value) -> bool {
    has_required_keys(value, &APP_METADATA_KEYS)
        && every_in_non_empty_array(&value["chains"], is_chain_info)
}

fn is_chain_info(value: &Value) -> bool {
    has_required_keys(value, &CHAIN_INFO_KEYS)
}

fn is_contract_action(value: &Value) -> bool {
    has_required_keys(value, &CONTRACT_ACTION_KEYS)
}

// =============================================================================
// HELPERS
// =============================================================================

fn object(value: &Value) -> Option<&Map<String, Value>> {
    value.as_object()
}

fn has_key(value: &Value, key: &str) -> bool {
    object(value).is_some_and(|o| o.contains_key(key))
}

fn has_required_keys(value: &Value, keys: &[&str]) -> bool {
    object(value).is_some_and(|o| keys.iter().all(|key| o.contains_key(*key)))
}

fn has_at_least_one_key(value: &Value, keys: &[&str]) -> bool {
    object(value).is_some_and(|o| keys.iter().any(|key| o.contains_key(*key)))
}

fn every_in_non_empty_array(value: &Value, predicate: fn(&Value) -> bool) -> bool {
    match value.as_array() {
        Some(items) if !items.is_empty() => items.iter().all(predicate),
        _ => false,
    }
}
