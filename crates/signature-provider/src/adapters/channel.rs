//! In-process Channel Transport
//!
//! Implements the `RequestTransport` port over a tokio channel. Envelopes are
//! hex-packed before they leave, the way a string-only transport (deep link,
//! window message) would carry them, and the consumer answers through the
//! `OutboundRequest` it receives.
//!
//! Suitable for wiring an application to an in-process provider and for
//! tests; real deployments plug their own transport into the same port.

use crate::adapters::pending::ResponseHandler;
use crate::domain::codec;
use crate::ports::outbound::RequestTransport;
use parking_lot::Mutex;
use shared_types::{ErrorCode, ErrorResponse, RequestEnvelope, ResponseEnvelope};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// A packed request on its way to the provider, with the means to answer it.
pub struct OutboundRequest {
    /// Correlation token of the request
    pub id: String,
    /// Hex-packed request envelope
    pub packed: String,
    handler: ResponseHandler,
}

impl OutboundRequest {
    /// Decode the request envelope.
    pub fn envelope(&self) -> Result<RequestEnvelope, crate::domain::CodecError> {
        codec::unpack_envelope(&self.packed)
    }

    /// Answer with a hex-packed response envelope.
    pub fn respond_packed(&self, packed: &str) -> bool {
        self.handler.handle_packed(packed)
    }

    /// Answer with a typed response envelope (packed on the way back).
    pub fn respond(&self, envelope: &ResponseEnvelope) -> bool {
        match codec::pack_envelope(envelope) {
            Ok(packed) => self.respond_packed(&packed),
            Err(e) => {
                warn!(error = %e, "Failed to pack response envelope");
                self.handler.reject(e.into())
            }
        }
    }
}

/// Transport that forwards packed envelopes to an unbounded channel.
pub struct ChannelTransport {
    sender: Mutex<Option<mpsc::UnboundedSender<OutboundRequest>>>,
}

impl ChannelTransport {
    /// Create a transport and the receiving end the provider side reads.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<OutboundRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                sender: Mutex::new(Some(tx)),
            },
            rx,
        )
    }

    /// True until `clean_up` runs or the receiver is dropped.
    pub fn is_open(&self) -> bool {
        self.sender
            .lock()
            .as_ref()
            .is_some_and(|tx| !tx.is_closed())
    }
}

impl RequestTransport for ChannelTransport {
    fn send_request(&self, envelope: RequestEnvelope, handler: ResponseHandler) {
        let packed = match codec::pack_envelope(&envelope) {
            Ok(packed) => packed,
            Err(e) => {
                handler.reject(e.into());
                return;
            }
        };

        let request = OutboundRequest {
            id: envelope.id,
            packed,
            handler,
        };

        let result = match self.sender.lock().as_ref() {
            Some(tx) => tx.send(request).map_err(|e| e.0),
            None => Err(request),
        };

        match result {
            Ok(()) => debug!("Request handed to channel transport"),
            Err(request) => {
                warn!(id = %request.id, "Channel transport closed; rejecting request");
                request.handler.reject(ErrorResponse::new(
                    ErrorCode::NetworkError,
                    "The transport to the signature provider is closed.",
                ));
            }
        }
    }

    fn clean_up(&self) {
        if self.sender.lock().take().is_some() {
            debug!("Channel transport closed");
        }
    }
}
