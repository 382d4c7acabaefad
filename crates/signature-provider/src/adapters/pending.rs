//! Pending Request Slot - single-flight async bridge for provider responses.
//!
//! Holds the continuation of the one request currently awaiting a response,
//! and routes whatever the transport delivers into it.
//!
//! Flow:
//! 1. The engine mints a `CorrelationId` and calls `install()`, which swaps in
//!    a fresh record and hands back whatever was pending before
//! 2. The engine rejects the superseded record and sends the envelope, giving
//!    the transport a `ResponseHandler`
//! 3. The transport calls the handler; the handler takes the record out of the
//!    slot, classifies the response and completes the record exactly once
//! 4. The engine awaits the oneshot receiver returned by `install()`

use crate::domain::classifier::{self, ResponseVariant};
use crate::domain::codec;
use crate::domain::correlation::CorrelationId;
use crate::domain::error::{self, ProviderResult};
use crate::domain::requests::{self, PushTransactionArgs};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use shared_types::{Authorizer, EnvelopeDataType, ErrorResponse, ResponseEnvelope, Transaction};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::oneshot;
use tracing::{debug, warn};

const SELECTIVE_DISCLOSURE: &str = EnvelopeDataType::SelectiveDisclosure.key();
const TRANSACTION_SIGNATURE: &str = EnvelopeDataType::TransactionSignature.key();

/// A successful provider reply, before it is matched to the caller's operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderReply {
    /// Public keys from a selective disclosure
    Keys(Vec<String>),
    /// A signed transaction
    Signed(PushTransactionArgs),
}

/// Receiver the engine awaits for the outcome of one request.
pub type ReplyReceiver = oneshot::Receiver<ProviderResult<ProviderReply>>;

/// The request currently awaiting a response
pub struct PendingRequest {
    /// Correlation ID stamped on the outgoing envelope
    correlation_id: CorrelationId,
    /// Variant that was requested (for logging)
    data_type: EnvelopeDataType,
    /// Channel to deliver the outcome
    sender: oneshot::Sender<ProviderResult<ProviderReply>>,
    /// When the request was installed
    created_at: Instant,
}

impl PendingRequest {
    /// Correlation ID of this request
    pub fn correlation_id(&self) -> CorrelationId {
        self.correlation_id
    }

    /// Deliver the outcome. Returns false if the caller stopped waiting.
    fn complete(self, outcome: ProviderResult<ProviderReply>) -> bool {
        let delivered = self.sender.send(outcome).is_ok();
        debug!(
            correlation_id = %self.correlation_id,
            data_type = %self.data_type,
            elapsed_ms = self.created_at.elapsed().as_millis() as u64,
            delivered,
            "Completed pending request"
        );
        delivered
    }
}

/// Statistics for the pending slot
#[derive(Debug, Default)]
pub struct PendingStats {
    /// Total requests installed
    pub total_registered: AtomicU64,
    /// Total requests completed by a response (resolved or rejected)
    pub total_completed: AtomicU64,
    /// Total requests rejected because a newer request replaced them
    pub total_superseded: AtomicU64,
    /// Total requests cancelled by the caller
    pub total_cancelled: AtomicU64,
    /// Total responses that arrived with nothing pending
    pub total_unmatched: AtomicU64,
}

/// The single pending-request slot of one engine.
///
/// Guarded by a mutex so the swap on handoff is atomic; records are always
/// completed after the lock is released.
#[derive(Default)]
pub struct PendingSlot {
    slot: Mutex<Option<PendingRequest>>,
    stats: PendingStats,
}

impl PendingSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a fresh record for `correlation_id`.
    ///
    /// Returns the record it replaced (if any) and the receiver for the new
    /// record's outcome. The caller is responsible for rejecting the replaced
    /// record.
    pub fn install(
        &self,
        correlation_id: CorrelationId,
        data_type: EnvelopeDataType,
    ) -> (Option<PendingRequest>, ReplyReceiver) {
        let (tx, rx) = oneshot::channel();
        let request = PendingRequest {
            correlation_id,
            data_type,
            sender: tx,
            created_at: Instant::now(),
        };

        let previous = self.slot.lock().replace(request);
        self.stats.total_registered.fetch_add(1, Ordering::Relaxed);

        debug!(
            correlation_id = %correlation_id,
            data_type = %data_type,
            "Registered pending request"
        );

        (previous, rx)
    }

    /// Reject whatever is pending with `reason`. Returns true if something was.
    pub fn cancel(&self, reason: ErrorResponse) -> bool {
        match self.take() {
            Some(pending) => {
                self.stats.total_cancelled.fetch_add(1, Ordering::Relaxed);
                pending.complete(Err(reason));
                true
            }
            None => false,
        }
    }

    /// Reject a request that a newer one replaced.
    pub fn supersede(&self, previous: PendingRequest) {
        warn!(
            correlation_id = %previous.correlation_id,
            "Pending request superseded by a new request"
        );
        self.stats.total_superseded.fetch_add(1, Ordering::Relaxed);
        previous.complete(Err(error::superseded()));
    }

    /// Check whether a request is pending
    pub fn is_pending(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Correlation ID of the pending request, if any
    pub fn pending_id(&self) -> Option<CorrelationId> {
        self.slot.lock().as_ref().map(|p| p.correlation_id)
    }

    /// Get statistics
    pub fn stats(&self) -> &PendingStats {
        &self.stats
    }

    fn take(&self) -> Option<PendingRequest> {
        self.slot.lock().take()
    }
}

/// Callback the transport invokes with the provider's response.
///
/// Cheap to clone. Every delivery terminates the current pending request
/// exactly once, whatever its shape. The response `id` is not used for
/// routing: the slot holds a single request and any response is applied to
/// it. A mismatched `id` is only logged.
#[derive(Clone)]
pub struct ResponseHandler {
    slot: Arc<PendingSlot>,
}

impl ResponseHandler {
    pub(crate) fn new(slot: Arc<PendingSlot>) -> Self {
        Self { slot }
    }

    /// Handle a typed response envelope.
    pub fn handle_response(&self, envelope: ResponseEnvelope) -> bool {
        match serde_json::to_value(&envelope) {
            Ok(value) => self.handle_value(value),
            Err(e) => self.reject(ErrorResponse::parsing(e.to_string())),
        }
    }

    /// Handle a hex-packed response envelope as received over a string
    /// transport. An unpackable string rejects the pending request.
    pub fn handle_packed(&self, packed: &str) -> bool {
        match codec::unpack_envelope::<Value>(packed) {
            Ok(value) => self.handle_value(value),
            Err(e) => {
                warn!(error = %e, "Failed to unpack response envelope");
                self.reject(e.into())
            }
        }
    }

    /// Handle an untyped response envelope.
    ///
    /// Returns true if a pending request was completed.
    pub fn handle_value(&self, envelope: Value) -> bool {
        let Some(pending) = self.take_pending() else {
            return false;
        };

        let response_id = envelope.get("id").and_then(Value::as_str).unwrap_or_default();
        if !pending.correlation_id.matches(response_id) {
            warn!(
                correlation_id = %pending.correlation_id,
                response_id,
                "Response id does not match pending request; applying anyway"
            );
        }

        let outcome = resolve_response(&envelope["response"]);
        self.slot.stats.total_completed.fetch_add(1, Ordering::Relaxed);
        pending.complete(outcome);
        true
    }

    /// Reject the pending request with `error`, e.g. when the transport
    /// cannot deliver. Returns true if a request was pending.
    pub fn reject(&self, error: ErrorResponse) -> bool {
        match self.take_pending() {
            Some(pending) => {
                self.slot.stats.total_completed.fetch_add(1, Ordering::Relaxed);
                pending.complete(Err(error));
                true
            }
            None => false,
        }
    }

    fn take_pending(&self) -> Option<PendingRequest> {
        let pending = self.slot.take();
        if pending.is_none() {
            self.slot.stats.total_unmatched.fetch_add(1, Ordering::Relaxed);
            warn!("Response received with no pending request; dropping");
        }
        pending
    }
}

/// Map a response payload to the outcome of the pending request.
///
/// A provider `error` inside the matched variant wins over everything else
/// in the body and is passed through as-is.
fn resolve_response(response: &Value) -> ProviderResult<ProviderReply> {
    match classifier::classify_response(response) {
        Some(ResponseVariant::SelectiveDisclosure(body)) => {
            debug!("Routing selective disclosure response");
            provider_error(body, SELECTIVE_DISCLOSURE)?;
            let authorizers: Vec<Authorizer> =
                required_field(body, "authorizers", SELECTIVE_DISCLOSURE)?;
            Ok(ProviderReply::Keys(requests::keys_from_authorizers(authorizers)))
        }
        Some(ResponseVariant::TransactionSignature(body)) => {
            debug!("Routing transaction signature response");
            provider_error(body, TRANSACTION_SIGNATURE)?;
            let signed: Transaction =
                required_field(body, "signedTransaction", TRANSACTION_SIGNATURE)?;
            requests::push_transaction_args(signed)
                .map(ProviderReply::Signed)
                .map_err(|e| ErrorResponse::parsing(format!("invalid packedTrx: {e}")))
        }
        None => {
            warn!("Signature provider responded with an unknown response");
            Err(error::unknown_response())
        }
    }
}

/// Reject with the provider's error if the variant body carries one.
fn provider_error(body: &Value, variant: &str) -> ProviderResult<()> {
    match body.get("error") {
        None | Some(Value::Null) => Ok(()),
        Some(raw) => {
            let error = ErrorResponse::deserialize(raw).map_err(|e| {
                ErrorResponse::parsing(format!("malformed {variant} error: {e}"))
            })?;
            debug!(error_code = %error.error_code, "Signature provider reported an error");
            Err(error)
        }
    }
}

/// Deserialize the success payload `field` of a variant body.
fn required_field<T: DeserializeOwned>(
    body: &Value,
    field: &str,
    variant: &str,
) -> ProviderResult<T> {
    let raw = body.get(field).filter(|raw| !raw.is_null()).ok_or_else(|| {
        ErrorResponse::parsing(format!("{variant} response has neither {field} nor error"))
    })?;
    T::deserialize(raw)
        .map_err(|e| ErrorResponse::parsing(format!("malformed {variant} {field}: {e}")))
}
