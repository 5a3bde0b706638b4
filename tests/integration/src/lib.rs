//! End-to-end tests for the bucketry client.
//!
//! These suites drive [`ObjectClient`] against the in-process
//! [`InMemoryBackend`], so they run under a plain `cargo test` with no
//! server or credentials. Each test creates its own uniquely named bucket.

use std::sync::{Arc, Once};

use bytes::Bytes;
use tokio::io::AsyncReadExt;

use bucketry_client::{ClientConfig, InMemoryBackend, ObjectClient, StorageBackend};
use bucketry_model::{EncryptionFields, ObjectMetadata};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Client over a fresh in-memory backend; returns the backend handle too
/// so tests can seed and inspect stored state directly.
#[must_use]
pub fn memory_client() -> (ObjectClient, Arc<InMemoryBackend>) {
    memory_client_with(InMemoryBackend::new(), ClientConfig::default())
}

/// Client over the given backend and configuration.
#[must_use]
pub fn memory_client_with(
    backend: InMemoryBackend,
    config: ClientConfig,
) -> (ObjectClient, Arc<InMemoryBackend>) {
    init_tracing();
    let backend = Arc::new(backend);
    let client = ObjectClient::with_config(backend.clone(), config);
    (client, backend)
}

/// Generate a unique bucket name for a test.
#[must_use]
pub fn test_bucket_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// Create a uniquely named bucket and return its name.
pub async fn create_test_bucket(client: &ObjectClient, prefix: &str) -> String {
    let name = test_bucket_name(prefix);
    client
        .create_bucket(&name)
        .await
        .unwrap_or_else(|e| panic!("failed to create bucket {name}: {e}"));
    name
}

/// Store `data` under `bucket`/`key` directly through the backend.
pub async fn put_bytes(backend: &InMemoryBackend, bucket: &str, key: &str, data: &[u8]) {
    let metadata = ObjectMetadata {
        user_metadata: std::collections::HashMap::new(),
        content_length: data.len() as u64,
        encryption: EncryptionFields::default(),
    };
    backend
        .put_object(bucket, key, Bytes::copy_from_slice(data), metadata)
        .await
        .unwrap_or_else(|e| panic!("failed to seed {bucket}/{key}: {e}"));
}

/// Read an object's full body back through the backend.
pub async fn get_bytes(backend: &InMemoryBackend, bucket: &str, key: &str) -> Vec<u8> {
    let mut reader = backend
        .get_object(bucket, key)
        .await
        .unwrap_or_else(|e| panic!("failed to open {bucket}/{key}: {e}"));
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .await
        .unwrap_or_else(|e| panic!("failed to read {bucket}/{key}: {e}"));
    data
}

mod test_inventory;
mod test_lifecycle;
mod test_list;
mod test_transfer;
