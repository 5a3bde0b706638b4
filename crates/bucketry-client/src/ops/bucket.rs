//! Bucket and object lifecycle passthroughs.
//!
//! Single-request operations with no retry logic beyond what the backend
//! call itself provides. Deletes are idempotent: deleting a nonexistent
//! object or bucket succeeds.

use tracing::debug;

use bucketry_model::BucketHandle;

use crate::client::ObjectClient;
use crate::error::ClientError;

impl ObjectClient {
    /// Whether `bucket` exists.
    pub async fn bucket_exists(&self, bucket: &str) -> Result<bool, ClientError> {
        self.backend().bucket_exists(bucket).await
    }

    /// Create `bucket`.
    pub async fn create_bucket(&self, bucket: &str) -> Result<BucketHandle, ClientError> {
        let handle = self.backend().create_bucket(bucket).await?;
        debug!(bucket, location = %handle.location, "create_bucket completed");
        Ok(handle)
    }

    /// Delete one object. Deleting a nonexistent key is not an error.
    pub async fn delete_object(&self, bucket: &str, object_key: &str) -> Result<(), ClientError> {
        self.backend().delete_object(bucket, object_key).await?;
        debug!(bucket, key = object_key, "delete_object completed");
        Ok(())
    }

    /// Delete `bucket`. Deleting a nonexistent bucket is not an error.
    pub async fn delete_bucket(&self, bucket: &str) -> Result<(), ClientError> {
        self.backend().delete_bucket(bucket).await?;
        debug!(bucket, "delete_bucket completed");
        Ok(())
    }
}
