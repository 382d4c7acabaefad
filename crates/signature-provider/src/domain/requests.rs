//! # Request Construction & Response Extraction
//!
//! Pure translation between caller-facing values (raw bytes) and the wire
//! variants (hex strings). No I/O, no state.

use crate::domain::codec;
use crate::domain::config::{ProviderConfig, AUTH_TRANSPORT_PROTOCOL_VERSION};
use crate::domain::correlation::CorrelationId;
use crate::domain::error::CodecError;
use shared_types::{
    Authorizer, Disclosure, HexAbi, ProviderRequest, RequestEnvelope, SelectiveDisclosureRequest,
    SelectiveDisclosureType, Transaction, TransactionSignatureRequest,
};

/// A contract ABI in binary form, as the caller holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryAbi {
    pub account_name: String,
    pub abi: Vec<u8>,
}

/// Parameters of a signing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignParams {
    /// Chain the transaction is for
    pub chain_id: String,
    /// Public keys of the private keys needed to sign the transaction
    pub required_keys: Vec<String>,
    /// Transaction to sign
    pub serialized_transaction: Vec<u8>,
    /// ABIs for all contracts with actions included in the transaction
    pub abis: Vec<BinaryAbi>,
}

/// Result of a successful signing operation, ready to push to a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushTransactionArgs {
    pub signatures: Vec<String>,
    pub serialized_transaction: Vec<u8>,
}

/// Build a selective disclosure request for the given disclosure types.
pub fn selective_disclosure_request(disclosures: &[SelectiveDisclosureType]) -> ProviderRequest {
    ProviderRequest::selective_disclosure(SelectiveDisclosureRequest {
        disclosures: disclosures
            .iter()
            .map(|kind| Disclosure { kind: *kind })
            .collect(),
    })
}

/// Build a transaction signature request. Binary fields become hex; the
/// transaction starts unsigned and uncompressed.
pub fn transaction_signature_request(params: &SignParams) -> ProviderRequest {
    let abis = params
        .abis
        .iter()
        .map(|abi| HexAbi {
            account_name: abi.account_name.clone(),
            abi: codec::array_to_hex(&abi.abi),
        })
        .collect();

    ProviderRequest::transaction_signature(TransactionSignatureRequest {
        chain_id: params.chain_id.clone(),
        public_keys: params.required_keys.clone(),
        abis,
        transaction: Transaction {
            signatures: Vec::new(),
            compression: 0,
            packed_context_free_data: String::new(),
            packed_trx: codec::array_to_hex(&params.serialized_transaction),
        },
    })
}

/// Wrap a request payload in an envelope stamped with `id` and the
/// configured identity. The callback URL is always present. Security
/// exclusions appear only when at least one is set. A transaction signature
/// request carries the configured manifest entry for its chain, if any.
pub fn request_envelope(
    config: &ProviderConfig,
    id: CorrelationId,
    request: ProviderRequest,
) -> RequestEnvelope {
    let manifest = request
        .transaction_signature
        .as_ref()
        .zip(config.manifest.as_ref())
        .and_then(|(body, manifest)| manifest.for_chain(&body.chain_id))
        .cloned();

    RequestEnvelope {
        version: AUTH_TRANSPORT_PROTOCOL_VERSION.to_string(),
        id: id.to_string(),
        declared_domain: config.declared_domain.clone(),
        return_url: config.return_url.clone(),
        callback_url: Some(config.callback_url.clone()),
        response_key: None,
        security_exclusions: config
            .security_exclusions
            .clone()
            .filter(|exclusions| !exclusions.is_empty()),
        manifest,
        request,
    }
}

/// Flatten authorizers into their public keys, preserving order and
/// duplicates.
pub fn keys_from_authorizers(authorizers: Vec<Authorizer>) -> Vec<String> {
    authorizers.into_iter().map(|a| a.public_key).collect()
}

/// Turn a signed transaction back into caller form.
pub fn push_transaction_args(signed: Transaction) -> Result<PushTransactionArgs, CodecError> {
    Ok(PushTransactionArgs {
        serialized_transaction: codec::hex_to_array(&signed.packed_trx)?,
        signatures: signed.signatures,
    })
}
