//! # Simulated Signature Provider
//!
//! Sits on the receiving end of a `ChannelTransport` and answers requests the
//! way a wallet would: it decodes the packed envelope, looks at which variant
//! was asked for and replies with a packed response carrying the same `id`.

use parking_lot::Mutex;
use serde_json::Value;
use shared_types::{
    Authorizer, ErrorResponse, ProviderResponse, RequestEnvelope, ResponseEnvelope,
    SelectiveDisclosureResponse, Transaction, TransactionSignatureResponse,
};
use signature_provider::domain::codec;
use signature_provider::{classify_request, OutboundRequest, RequestVariant};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// How the provider reacts to the next request.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Disclose keys / sign the transaction
    Approve,
    /// Answer with the given error in the requested variant
    Decline(ErrorResponse),
    /// Keep the request without answering
    Ignore,
    /// Answer with a string that is not a packed envelope
    Garbage,
}

/// A provider holding a fixed set of keys.
pub struct SimulatedProvider {
    keys: Vec<String>,
    signature: String,
    behavior: Mutex<Behavior>,
    received: Mutex<Vec<Value>>,
    held: Mutex<Vec<OutboundRequest>>,
    seen: mpsc::UnboundedSender<String>,
}

impl SimulatedProvider {
    /// Create a provider; the receiver yields the `id` of every request once
    /// it has been handled.
    pub fn new(keys: &[&str], signature: &str) -> (Arc<Self>, mpsc::UnboundedReceiver<String>) {
        let (seen, seen_rx) = mpsc::unbounded_channel();
        let provider = Arc::new(Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            signature: signature.to_string(),
            behavior: Mutex::new(Behavior::Approve),
            received: Mutex::new(Vec::new()),
            held: Mutex::new(Vec::new()),
            seen,
        });
        (provider, seen_rx)
    }

    /// Change how the next requests are answered.
    pub fn set_behavior(&self, behavior: Behavior) {
        *self.behavior.lock() = behavior;
    }

    /// Decoded request envelopes, in arrival order.
    pub fn received(&self) -> Vec<Value> {
        self.received.lock().clone()
    }

    /// Requests kept under `Behavior::Ignore`.
    pub fn take_held(&self) -> Vec<OutboundRequest> {
        std::mem::take(&mut *self.held.lock())
    }

    /// Serve requests until the transport is cleaned up.
    pub fn spawn(
        self: &Arc<Self>,
        mut requests: mpsc::UnboundedReceiver<OutboundRequest>,
    ) -> JoinHandle<usize> {
        let provider = self.clone();
        tokio::spawn(async move {
            let mut served = 0;
            while let Some(request) = requests.recv().await {
                let id = request.id.clone();
                provider.answer(request);
                served += 1;
                let _ = provider.seen.send(id);
            }
            debug!(served, "Simulated provider stopped");
            served
        })
    }

    fn answer(&self, request: OutboundRequest) {
        let value: Value = match codec::unpack_envelope(&request.packed) {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, "Simulated provider got an undecodable request");
                return;
            }
        };
        self.received.lock().push(value.clone());

        let behavior = self.behavior.lock().clone();
        let response = match behavior {
            Behavior::Ignore => {
                self.held.lock().push(request);
                return;
            }
            Behavior::Garbage => {
                request.respond_packed("zz");
                return;
            }
            Behavior::Approve => self.approve(&value["request"], &request),
            Behavior::Decline(error) => decline(&value["request"], error),
        };

        if let Some(response) = response {
            request.respond(&ResponseEnvelope {
                id: request.id.clone(),
                device_key: Some("simulated-device".into()),
                response,
            });
        }
    }

    fn approve(&self, payload: &Value, request: &OutboundRequest) -> Option<ProviderResponse> {
        match classify_request(payload)? {
            RequestVariant::SelectiveDisclosure(_) => Some(ProviderResponse::selective_disclosure(
                SelectiveDisclosureResponse {
                    authorizers: Some(
                        self.keys
                            .iter()
                            .map(|k| Authorizer {
                                public_key: k.clone(),
                            })
                            .collect(),
                    ),
                    error: None,
                },
            )),
            RequestVariant::TransactionSignature(_) => {
                let envelope: RequestEnvelope = request.envelope().ok()?;
                let transaction = envelope.request.transaction_signature?.transaction;
                Some(ProviderResponse::transaction_signature(TransactionSignatureResponse {
                    signed_transaction: Some(Transaction {
                        signatures: vec![self.signature.clone()],
                        ..transaction
                    }),
                    error: None,
                }))
            }
        }
    }
}

fn decline(payload: &Value, error: ErrorResponse) -> Option<ProviderResponse> {
    match classify_request(payload)? {
        RequestVariant::SelectiveDisclosure(_) => Some(ProviderResponse::selective_disclosure(
            SelectiveDisclosureResponse {
                authorizers: None,
                error: Some(error),
            },
        )),
        RequestVariant::TransactionSignature(_) => Some(ProviderResponse::transaction_signature(
            TransactionSignatureResponse {
                signed_transaction: None,
                error: Some(error),
            },
        )),
    }
}
