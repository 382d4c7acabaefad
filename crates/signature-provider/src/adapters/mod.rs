//! Adapters for the signature provider engine.
//!
//! The pending-request bridge plus in-process implementations of the
//! outbound ports.

pub mod cache;
pub mod channel;
pub mod pending;

pub use cache::{InMemoryKeyCache, NoopKeyCache};
pub use channel::{ChannelTransport, OutboundRequest};
pub use pending::{PendingSlot, PendingStats, ProviderReply, ResponseHandler};
