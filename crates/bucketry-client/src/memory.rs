//! In-memory storage backend.
//!
//! [`InMemoryBackend`] implements [`StorageBackend`] entirely in process:
//! a [`DashMap`] of buckets, each holding an ordered keystore behind a
//! [`parking_lot::RwLock`]. Listing groups keys into common prefixes with
//! the request delimiter and pages through them with base64 continuation
//! tokens. Used by the test suites and as a local stub backend.

use std::collections::{BTreeMap, HashMap};
use std::io::Cursor;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use bytes::Bytes;
use dashmap::DashMap;
use parking_lot::RwLock;
use tokio::io::AsyncReadExt;

use bucketry_model::{
    BucketHandle, InventoryConfiguration, ListPrefixesRequest, ObjectMetadata, PrefixPage,
};

use crate::backend::{ObjectReader, StorageBackend};
use crate::error::ClientError;

/// Default maximum number of common prefixes returned per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// An in-process storage backend.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use bucketry_client::{InMemoryBackend, ObjectClient};
///
/// let client = ObjectClient::new(Arc::new(InMemoryBackend::new()));
/// ```
#[derive(Debug)]
pub struct InMemoryBackend {
    /// Bucket name to bucket state.
    buckets: DashMap<String, BucketState>,
    /// Maximum common prefixes per listing page.
    page_size: usize,
}

#[derive(Debug, Default)]
struct BucketState {
    /// Ordered object store; iteration order is key order.
    objects: RwLock<BTreeMap<String, StoredObject>>,
    /// Inventory configurations by id; insert overwrites.
    inventory_configurations: RwLock<HashMap<String, InventoryConfiguration>>,
}

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    metadata: ObjectMetadata,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBackend {
    /// Create an empty backend with the default page size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Create an empty backend paging at most `page_size` prefixes per
    /// listing response.
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            buckets: DashMap::new(),
            page_size: page_size.max(1),
        }
    }

    /// Returns the stored metadata for an object, if present.
    ///
    /// Lets tests and stub consumers assert what an upload recorded.
    #[must_use]
    pub fn object_metadata(&self, bucket: &str, key: &str) -> Option<ObjectMetadata> {
        let state = self.buckets.get(bucket)?;
        let objects = state.objects.read();
        objects.get(key).map(|o| o.metadata.clone())
    }

    fn bucket(&self, bucket: &str) -> Result<dashmap::mapref::one::Ref<'_, String, BucketState>, ClientError> {
        self.buckets
            .get(bucket)
            .ok_or_else(|| ClientError::BackendRejected {
                code: "NoSuchBucket".to_owned(),
                message: format!("the specified bucket does not exist: {bucket}"),
            })
    }
}

/// Group the keys of an ordered store into common prefixes.
///
/// Mirrors the delimiter semantics of the listing protocol: a key
/// contributes the segment between `prefix` and the first delimiter after
/// it, inclusive of the delimiter; keys without a further delimiter are
/// leaves and contribute nothing. Output order follows key order.
fn common_prefixes<'a>(
    keys: impl Iterator<Item = &'a String>,
    prefix: &str,
    delimiter: &str,
) -> Vec<String> {
    let mut prefixes = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for key in keys {
        if !prefix.is_empty() && !key.starts_with(prefix) {
            continue;
        }
        let after_prefix = &key[prefix.len()..];
        if let Some(pos) = after_prefix.find(delimiter) {
            let cp = format!("{}{}{}", prefix, &after_prefix[..pos], delimiter);
            if seen.insert(cp.clone()) {
                prefixes.push(cp);
            }
        }
    }
    prefixes
}

fn encode_continuation_token(prefix: &str) -> String {
    BASE64_STANDARD.encode(prefix.as_bytes())
}

fn decode_continuation_token(token: &str) -> Result<String, ClientError> {
    let invalid = || ClientError::BackendRejected {
        code: "InvalidArgument".to_owned(),
        message: "invalid continuation token".to_owned(),
    };
    let bytes = BASE64_STANDARD.decode(token).map_err(|_| invalid())?;
    String::from_utf8(bytes).map_err(|_| invalid())
}

#[async_trait]
impl StorageBackend for InMemoryBackend {
    async fn list_prefixes_page(
        &self,
        request: ListPrefixesRequest,
    ) -> Result<PrefixPage, ClientError> {
        let state = self.bucket(&request.bucket)?;

        // No delimiter means no grouping, and therefore no common prefixes.
        if request.delimiter.is_empty() {
            return Ok(PrefixPage::default());
        }

        let start_after = match &request.continuation_token {
            Some(token) => Some(decode_continuation_token(token)?),
            None => None,
        };

        let objects = state.objects.read();
        let all = common_prefixes(objects.keys(), &request.prefix, &request.delimiter);
        drop(objects);

        let skip = start_after.map_or(0, |marker| {
            all.iter()
                .position(|p| *p == marker)
                .map_or(all.len(), |i| i + 1)
        });
        let remaining = &all[skip.min(all.len())..];

        let page: Vec<String> = remaining.iter().take(self.page_size).cloned().collect();
        let is_truncated = remaining.len() > page.len();
        let next_continuation_token = if is_truncated {
            page.last().map(|p| encode_continuation_token(p))
        } else {
            None
        };

        Ok(PrefixPage {
            prefixes: page,
            next_continuation_token,
            is_truncated,
        })
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectReader, ClientError> {
        let state = self.bucket(bucket)?;
        let objects = state.objects.read();
        let stored = objects.get(key).ok_or_else(|| ClientError::SourceNotFound {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
        })?;
        Ok(Box::pin(Cursor::new(stored.data.clone())))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        metadata: ObjectMetadata,
    ) -> Result<(), ClientError> {
        let state = self.bucket(bucket)?;
        let mut objects = state.objects.write();
        objects.insert(key.to_owned(), StoredObject { data: body, metadata });
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), ClientError> {
        // Idempotent: an absent bucket or key is not an error.
        if let Some(state) = self.buckets.get(bucket) {
            state.objects.write().remove(key);
        }
        Ok(())
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool, ClientError> {
        Ok(self.buckets.contains_key(bucket))
    }

    async fn create_bucket(&self, bucket: &str) -> Result<BucketHandle, ClientError> {
        if self.buckets.contains_key(bucket) {
            return Err(ClientError::BackendRejected {
                code: "BucketAlreadyOwnedByYou".to_owned(),
                message: format!("bucket already exists: {bucket}"),
            });
        }
        self.buckets
            .insert(bucket.to_owned(), BucketState::default());
        Ok(BucketHandle {
            name: bucket.to_owned(),
            location: format!("/{bucket}"),
        })
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<(), ClientError> {
        // Idempotent: deleting an absent bucket succeeds.
        self.buckets.remove(bucket);
        Ok(())
    }

    async fn put_inventory_configuration(
        &self,
        bucket: &str,
        configuration: InventoryConfiguration,
    ) -> Result<(), ClientError> {
        let state = self.bucket(bucket)?;
        let mut configs = state.inventory_configurations.write();
        configs.insert(configuration.id.clone(), configuration);
        Ok(())
    }

    async fn get_inventory_configuration(
        &self,
        bucket: &str,
        inventory_id: &str,
    ) -> Result<Option<InventoryConfiguration>, ClientError> {
        let state = self.bucket(bucket)?;
        let configs = state.inventory_configurations.read();
        Ok(configs.get(inventory_id).cloned())
    }
}
