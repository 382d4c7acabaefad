//! Key Cache Adapters
//!
//! Implements the `KeyCache` port. Persistent caches (keychains, local
//! storage) live with the application; these cover the in-process cases.

use crate::ports::outbound::KeyCache;
use parking_lot::RwLock;
use tracing::debug;

/// Process-local key cache.
#[derive(Debug, Default)]
pub struct InMemoryKeyCache {
    keys: RwLock<Option<Vec<String>>>,
}

impl InMemoryKeyCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache pre-populated with `keys`.
    pub fn with_keys(keys: Vec<String>) -> Self {
        Self {
            keys: RwLock::new(Some(keys)),
        }
    }
}

impl KeyCache for InMemoryKeyCache {
    fn get_cached_keys(&self) -> Option<Vec<String>> {
        self.keys.read().clone()
    }

    fn set_cached_keys(&self, keys: &[String]) {
        debug!(count = keys.len(), "Caching available keys");
        *self.keys.write() = Some(keys.to_vec());
    }

    fn clear_cached_keys(&self) {
        self.keys.write().take();
    }
}

/// Cache for applications that do not want caching: never holds anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopKeyCache;

impl KeyCache for NoopKeyCache {
    fn get_cached_keys(&self) -> Option<Vec<String>> {
        None
    }

    fn set_cached_keys(&self, _keys: &[String]) {}

    fn clear_cached_keys(&self) {}
}
