//! # Shared Types Crate
//!
//! This crate contains the wire data model of the signature provider transport
//! protocol: the request/response envelopes, their variants, the error taxonomy
//! and the application manifest/metadata contracts.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Every type that crosses the transport boundary
//!   is defined here.
//! - **No Raw Binary on the Wire**: Serialized transactions and ABIs travel as
//!   hex strings; conversion happens before a value enters an envelope.
//! - **Exactly One Variant**: A request or response payload carries exactly one
//!   populated variant key (`selectiveDisclosure` or `transactionSignature`).
//!   Absent variants are omitted from the JSON, never written as `null`.

pub mod entities;
pub mod envelope;
pub mod errors;
pub mod manifest;
pub mod security;

pub use entities::*;
pub use envelope::*;
pub use errors::*;
pub use manifest::*;
pub use security::SecurityExclusions;
