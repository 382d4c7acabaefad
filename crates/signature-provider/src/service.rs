//! # Signature Provider Service
//!
//! The correlation engine: builds request envelopes, tracks the single
//! in-flight request and resolves it from the provider's response.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`SignatureProviderApi`)
//! - Uses the outbound ports (`RequestTransport`, `KeyCache`) injected at
//!   construction
//! - Delegates envelope construction and response classification to the
//!   domain layer
//!
//! ## Request Lifecycle
//!
//! ```text
//! NONE ──send──▶ PENDING ──┬── response (any shape) ──▶ NONE
//!                          ├── superseded by new request ─▶ NONE
//!                          └── cancel_request ────────────▶ NONE
//! ```
//!
//! There is no timeout and no retry. A request pends until one of the above
//! happens; retrying means calling the operation again, which supersedes the
//! previous attempt.

use crate::adapters::pending::{PendingSlot, PendingStats, ProviderReply, ResponseHandler};
use crate::domain::config::{ConfigError, ProviderConfig};
use crate::domain::correlation::CorrelationId;
use crate::domain::error::{self, ProviderResult};
use crate::domain::requests::{self, PushTransactionArgs, SignParams};
use crate::ports::inbound::SignatureProviderApi;
use crate::ports::outbound::{KeyCache, RequestTransport};
use async_trait::async_trait;
use shared_types::{EnvelopeDataType, ErrorResponse, ProviderRequest, SelectiveDisclosureType};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Signature Provider Service.
///
/// One instance is one independent correlation context; several instances
/// can run side by side in the same process.
pub struct SignatureProviderService<T: RequestTransport, C: KeyCache> {
    config: ProviderConfig,
    transport: T,
    cache: C,
    pending: Arc<PendingSlot>,
}

impl<T: RequestTransport, C: KeyCache> SignatureProviderService<T, C> {
    /// Create a new service.
    ///
    /// # Arguments
    /// * `config` - Identity and routing metadata written into every envelope
    /// * `transport` - Delivers envelopes to the provider
    /// * `cache` - Stores disclosed keys
    ///
    /// # Errors
    /// * `ConfigError` - The configuration failed validation
    pub fn new(config: ProviderConfig, transport: T, cache: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            transport,
            cache,
            pending: Arc::new(PendingSlot::new()),
        })
    }

    /// The configuration this service stamps on requests.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Whether a request is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending.is_pending()
    }

    /// Correlation ID of the in-flight request, if any.
    pub fn pending_id(&self) -> Option<CorrelationId> {
        self.pending.pending_id()
    }

    /// Pending-slot statistics.
    pub fn stats(&self) -> &PendingStats {
        self.pending.stats()
    }

    /// A response handler bound to this service, for transports that receive
    /// responses outside of a `send_request` call (e.g. a URL callback).
    pub fn response_handler(&self) -> ResponseHandler {
        ResponseHandler::new(self.pending.clone())
    }

    /// Hand a request to the transport and wait for its outcome.
    ///
    /// Any request still pending is rejected first: single flight.
    async fn handle_request(
        &self,
        request: ProviderRequest,
        data_type: EnvelopeDataType,
    ) -> ProviderResult<ProviderReply> {
        let correlation_id = CorrelationId::new();
        let envelope = requests::request_envelope(&self.config, correlation_id, request);

        let (previous, reply) = self.pending.install(correlation_id, data_type);
        if let Some(previous) = previous {
            self.pending.supersede(previous);
        }

        debug!(
            correlation_id = %correlation_id,
            data_type = %data_type,
            "Sending request to signature provider"
        );
        self.transport.send_request(envelope, self.response_handler());

        match reply.await {
            Ok(outcome) => outcome,
            Err(_) => Err(error::pending_dropped()),
        }
    }
}

/// A reply of the other variant than the one requested.
fn mismatched_reply(expected: EnvelopeDataType, reply: &ProviderReply) -> ErrorResponse {
    warn!(
        expected = %expected,
        reply = ?reply,
        "Signature provider answered with a different variant than requested"
    );
    error::unknown_response()
}

#[async_trait]
impl<T: RequestTransport, C: KeyCache> SignatureProviderApi for SignatureProviderService<T, C> {
    async fn get_available_keys(&self) -> ProviderResult<Vec<String>> {
        if let Some(keys) = self.cache.get_cached_keys().filter(|keys| !keys.is_empty()) {
            debug!(count = keys.len(), "Serving available keys from cache");
            return Ok(keys);
        }

        let request = requests::selective_disclosure_request(&[SelectiveDisclosureType::Authorizers]);
        let keys = match self
            .handle_request(request, EnvelopeDataType::SelectiveDisclosure)
            .await?
        {
            ProviderReply::Keys(keys) => keys,
            other => {
                return Err(mismatched_reply(EnvelopeDataType::SelectiveDisclosure, &other));
            }
        };

        self.cache.set_cached_keys(&keys);
        Ok(keys)
    }

    async fn sign(&self, params: SignParams) -> ProviderResult<PushTransactionArgs> {
        let request = requests::transaction_signature_request(&params);
        match self
            .handle_request(request, EnvelopeDataType::TransactionSignature)
            .await?
        {
            ProviderReply::Signed(args) => Ok(args),
            other => Err(mismatched_reply(EnvelopeDataType::TransactionSignature, &other)),
        }
    }

    fn cancel_request(&self) {
        if self.pending.cancel(error::manually_cancelled()) {
            info!("Pending request manually cancelled");
        }
    }

    fn clear_cached_keys(&self) {
        self.cache.clear_cached_keys();
    }

    fn clean_up(&self) {
        self.transport.clean_up();
    }
}
