//! # Signature Provider
//!
//! Client side of the signature provider protocol: asks an external provider
//! (wallet, authenticator app, hardware device) for the public keys it holds
//! and for transaction signatures, over any transport that can carry a string.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Envelope codec, structural classifier,
//!   request construction and configuration. No I/O.
//! - **Ports Layer** (`ports/`): The application-facing API and the transport
//!   and key cache capabilities the engine is built with
//! - **Adapters Layer** (`adapters/`): The pending-request slot, an in-process
//!   channel transport and key caches
//! - **Service Layer** (`service.rs`): The correlation engine wiring the above
//!
//! ```text
//!   application
//!       │ get_available_keys / sign / cancel_request
//!       ▼
//!   SignatureProviderService ──install──▶ PendingSlot
//!       │ RequestEnvelope                      ▲
//!       ▼                                      │ complete (exactly once)
//!   RequestTransport ──packed hex──▶ provider  │
//!       ▲                               │      │
//!       └──────── ResponseHandler ◀─────┘──────┘
//! ```
//!
//! ## Wire Format
//!
//! Envelopes are JSON documents. String transports carry them "packed": the
//! UTF-8 bytes of the JSON text, rendered as lowercase hex.
//!
//! ## Concurrency
//!
//! One request is in flight per service instance. Starting a new operation
//! rejects the pending one; responses are never routed by id.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::{
    ChannelTransport, InMemoryKeyCache, NoopKeyCache, OutboundRequest, PendingStats,
    ProviderReply, ResponseHandler,
};
pub use domain::classifier::{
    classify_request, classify_response, envelope_data_type, RequestVariant, ResponseVariant,
};
pub use domain::codec::{
    array_to_hex, hex_decode, hex_encode, hex_to_array, pack_envelope, unpack_envelope,
};
pub use domain::{
    BinaryAbi, CodecError, ConfigError, CorrelationId, ProviderConfig, ProviderResult,
    PushTransactionArgs, SignParams, AUTH_TRANSPORT_PROTOCOL_VERSION,
};
pub use ports::inbound::SignatureProviderApi;
pub use ports::outbound::{KeyCache, RequestTransport};
pub use service::SignatureProviderService;
