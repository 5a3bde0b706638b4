//! The storage backend seam.
//!
//! [`StorageBackend`] is the object-safe trait the client core drives. It
//! covers the storage protocol the client consumes: one listing page at a
//! time, object get/put/delete, bucket lifecycle, and inventory
//! configuration reads and writes. The trait uses `#[async_trait]` because it must be
//! object-safe for dynamic dispatch (`Arc<dyn StorageBackend>`).
//!
//! Implementations are expected to be already authenticated; credential
//! resolution happens before a backend handle is injected into
//! [`ObjectClient`](crate::ObjectClient).

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::AsyncRead;

use bucketry_model::{
    BucketHandle, InventoryConfiguration, ListPrefixesRequest, ObjectMetadata, PrefixPage,
};

use crate::error::ClientError;

/// Streaming read handle over an object body.
pub type ObjectReader = Pin<Box<dyn AsyncRead + Send>>;

/// Storage backend protocol consumed by the client.
///
/// A backend handle is long-lived, shared read-only across all calls, and
/// must be safe for concurrent use. The client never mutates it.
#[async_trait]
pub trait StorageBackend: Send + Sync + std::fmt::Debug {
    /// Fetch one page of common prefixes for the given listing request.
    async fn list_prefixes_page(
        &self,
        request: ListPrefixesRequest,
    ) -> Result<PrefixPage, ClientError>;

    /// Open a read stream over the body of an object.
    ///
    /// Fails with [`ClientError::SourceNotFound`] when the key does not
    /// exist.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectReader, ClientError>;

    /// Write an object body and its metadata in one request.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        metadata: ObjectMetadata,
    ) -> Result<(), ClientError>;

    /// Delete an object. Deleting a nonexistent object is not an error.
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), ClientError>;

    /// Whether the bucket exists.
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, ClientError>;

    /// Create a bucket.
    async fn create_bucket(&self, bucket: &str) -> Result<BucketHandle, ClientError>;

    /// Delete a bucket. Deleting a nonexistent bucket is not an error.
    async fn delete_bucket(&self, bucket: &str) -> Result<(), ClientError>;

    /// Write an inventory configuration.
    ///
    /// One idempotent PUT: writing a configuration whose id already exists
    /// overwrites the prior configuration.
    async fn put_inventory_configuration(
        &self,
        bucket: &str,
        configuration: InventoryConfiguration,
    ) -> Result<(), ClientError>;

    /// Read back the inventory configuration stored under `inventory_id`,
    /// or `None` when no configuration with that id exists.
    async fn get_inventory_configuration(
        &self,
        bucket: &str,
        inventory_id: &str,
    ) -> Result<Option<InventoryConfiguration>, ClientError>;
}
