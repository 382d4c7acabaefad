//! # Inbound Ports (Driving Ports / API)
//!
//! The operations an application performs against a signature provider.

use crate::domain::error::ProviderResult;
use crate::domain::requests::{PushTransactionArgs, SignParams};
use async_trait::async_trait;

/// Primary Signature Provider API.
///
/// At most one operation is in flight per implementation instance: starting
/// a new one rejects the previous one if it has not completed.
#[async_trait]
pub trait SignatureProviderApi: Send + Sync {
    /// Public keys the provider can sign with.
    ///
    /// Served from the key cache when it holds a non-empty list; otherwise
    /// asks the provider and caches the answer.
    async fn get_available_keys(&self) -> ProviderResult<Vec<String>>;

    /// Ask the provider to sign a serialized transaction.
    async fn sign(&self, params: SignParams) -> ProviderResult<PushTransactionArgs>;

    /// Reject the in-flight operation, if any.
    fn cancel_request(&self);

    /// Forget cached keys.
    fn clear_cached_keys(&self);

    /// Release transport resources. Call when discarding the provider.
    fn clean_up(&self);
}
