//! # Outbound Ports (Driven Ports / SPI)
//!
//! Capabilities the engine is constructed with. The transport and the key
//! cache are external collaborators; the engine only relies on the contracts
//! below.

use crate::adapters::pending::ResponseHandler;
use shared_types::RequestEnvelope;
use std::sync::Arc;

/// Delivers request envelopes to the signature provider.
///
/// Implementations must eventually call one of the `handler` methods with the
/// provider's response, or never call it (the request then pends until it is
/// superseded or cancelled). Calling the handler from inside `send_request`
/// is allowed.
pub trait RequestTransport: Send + Sync {
    /// Hand `envelope` to the provider.
    fn send_request(&self, envelope: RequestEnvelope, handler: ResponseHandler);

    /// Release transport resources (listeners, sockets) when the engine is
    /// discarded.
    fn clean_up(&self);
}

/// Stores the public keys disclosed by the provider.
///
/// If caching is not desired, return `None` from `get_cached_keys` and make
/// the other methods no-ops.
pub trait KeyCache: Send + Sync {
    /// Previously cached keys. `None` or an empty list means "ask the provider".
    fn get_cached_keys(&self) -> Option<Vec<String>>;

    /// Remember keys returned by the provider.
    fn set_cached_keys(&self, keys: &[String]);

    /// Forget cached keys.
    fn clear_cached_keys(&self);
}

impl<T: RequestTransport + ?Sized> RequestTransport for Arc<T> {
    fn send_request(&self, envelope: RequestEnvelope, handler: ResponseHandler) {
        (**self).send_request(envelope, handler)
    }

    fn clean_up(&self) {
        (**self).clean_up()
    }
}

impl<T: KeyCache + ?Sized> KeyCache for Arc<T> {
    fn get_cached_keys(&self) -> Option<Vec<String>> {
        (**self).get_cached_keys()
    }

    fn set_cached_keys(&self, keys: &[String]) {
        (**self).set_cached_keys(keys)
    }

    fn clear_cached_keys(&self) {
        (**self).clear_cached_keys()
    }
}
