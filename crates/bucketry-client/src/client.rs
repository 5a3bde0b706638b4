//! The object-storage client.
//!
//! [`ObjectClient`] owns an injected backend handle and the client
//! configuration. Individual operations are implemented in the
//! [`crate::ops`] submodules and grouped by concern: listing, transfers,
//! bucket lifecycle, and inventory configuration.

use std::sync::Arc;

use crate::backend::StorageBackend;
use crate::config::ClientConfig;

/// Client over an object-storage backend.
///
/// Both fields are `Arc`-wrapped: the client is cheap to clone and safe to
/// share across tasks, and no call holds mutable state between invocations.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use bucketry_client::{InMemoryBackend, ObjectClient};
///
/// let client = ObjectClient::new(Arc::new(InMemoryBackend::new()));
/// assert_eq!(client.config().transfer_chunk_size, 1024);
/// ```
#[derive(Debug, Clone)]
pub struct ObjectClient {
    /// The injected, already authenticated backend handle.
    backend: Arc<dyn StorageBackend>,
    /// Client tuning knobs.
    config: Arc<ClientConfig>,
}

impl ObjectClient {
    /// Create a client over `backend` with the default configuration.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self::with_config(backend, ClientConfig::default())
    }

    /// Create a client over `backend` with an explicit configuration.
    #[must_use]
    pub fn with_config(backend: Arc<dyn StorageBackend>, config: ClientConfig) -> Self {
        Self {
            backend,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the backend handle.
    #[must_use]
    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    /// Returns a reference to the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
