//! Streaming transfers between the backend and the local filesystem.
//!
//! Downloads copy the backend stream to a local file in fixed-size chunks,
//! ending on the first zero-length read. Uploads compute the content length
//! from the file's byte size, merge caller tags with the encryption
//! fragment, and write the whole body in one request. Every path releases
//! both handles by scope, including on error.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::debug;

use bucketry_model::{EncryptionMode, ObjectMetadata};

use crate::client::ObjectClient;
use crate::encryption::encryption_fields;
use crate::error::ClientError;
use crate::key;

#[allow(clippy::cast_possible_truncation)]
impl ObjectClient {
    /// Download an object to `destination`, creating or truncating it.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// [`ClientError::SourceNotFound`] when the key does not exist,
    /// [`ClientError::LocalWriteError`] for filesystem failures, and
    /// [`ClientError::BackendUnreachable`] when the stream breaks mid-read.
    pub async fn download(
        &self,
        bucket: &str,
        object_key: &str,
        destination: impl AsRef<Path> + Send,
    ) -> Result<u64, ClientError> {
        let path = destination.as_ref();
        let mut reader = self.backend().get_object(bucket, object_key).await?;

        let mut file = tokio::fs::File::create(path)
            .await
            .map_err(|e| ClientError::local_write(path, e))?;

        let mut buf = vec![0u8; self.config().transfer_chunk_size];
        let mut written = 0u64;
        loop {
            let n = reader
                .read(&mut buf)
                .await
                .map_err(|e| ClientError::BackendUnreachable {
                    message: format!("object stream read failed: {e}"),
                })?;
            if n == 0 {
                break;
            }
            file.write_all(&buf[..n])
                .await
                .map_err(|e| ClientError::local_write(path, e))?;
            written += n as u64;
        }
        file.flush()
            .await
            .map_err(|e| ClientError::local_write(path, e))?;

        debug!(
            bucket,
            key = object_key,
            destination = %path.display(),
            bytes = written,
            "download completed"
        );
        Ok(written)
    }

    /// Download an object into the scratch directory under `filename`.
    ///
    /// Creates the scratch directory if it does not exist and returns the
    /// path the object was written to.
    pub async fn download_with_filename(
        &self,
        filename: &str,
        bucket: &str,
        object_key: &str,
    ) -> Result<PathBuf, ClientError> {
        let dir = Path::new(&self.config().scratch_dir);
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| ClientError::local_write(dir, e))?;

        let destination = dir.join(filename);
        self.download(bucket, object_key, &destination).await?;
        Ok(destination)
    }

    /// Download an object into the scratch directory, deriving the filename
    /// from the key.
    pub async fn download_default(
        &self,
        bucket: &str,
        object_key: &str,
    ) -> Result<PathBuf, ClientError> {
        let filename = key::filename(object_key).to_owned();
        self.download_with_filename(&filename, bucket, object_key)
            .await
    }

    /// Upload a local file as `bucket`/`object_key`.
    ///
    /// The content length is taken from the file's byte size; `tags` are
    /// merged with the fields required by `mode` into the upload metadata.
    /// Encryption selection is explicit: pass [`EncryptionMode::None`] for
    /// an unencrypted upload.
    ///
    /// # Errors
    ///
    /// [`ClientError::LocalReadNotFound`] when the file cannot be read,
    /// [`ClientError::InvalidKeyId`] for an empty KMS key id, and
    /// [`ClientError::BackendRejected`] when the service refuses the write.
    pub async fn upload(
        &self,
        local_path: impl AsRef<Path> + Send,
        bucket: &str,
        object_key: &str,
        tags: HashMap<String, String>,
        mode: EncryptionMode,
    ) -> Result<(), ClientError> {
        let path = local_path.as_ref();

        // Validate the encryption mode before touching the filesystem.
        let encryption = encryption_fields(&mode)?;

        let data = tokio::fs::read(path)
            .await
            .map_err(|_| ClientError::LocalReadNotFound {
                path: path.to_path_buf(),
            })?;
        let content_length = data.len() as u64;

        let metadata = ObjectMetadata {
            user_metadata: tags,
            content_length,
            encryption,
        };

        self.backend()
            .put_object(bucket, object_key, Bytes::from(data), metadata)
            .await?;

        debug!(
            bucket,
            key = object_key,
            source = %path.display(),
            bytes = content_length,
            algorithm = mode.algorithm().unwrap_or("none"),
            "upload completed"
        );
        Ok(())
    }

    /// Read a whole object as UTF-8 text.
    ///
    /// # Errors
    ///
    /// [`ClientError::DecodeError`] when the body is not valid UTF-8.
    pub async fn get_object_string(
        &self,
        bucket: &str,
        object_key: &str,
    ) -> Result<String, ClientError> {
        let mut reader = self.backend().get_object(bucket, object_key).await?;
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .await
            .map_err(|e| ClientError::BackendUnreachable {
                message: format!("object stream read failed: {e}"),
            })?;

        String::from_utf8(data).map_err(|_| ClientError::DecodeError {
            message: format!("object body of {bucket}/{object_key} is not valid UTF-8"),
        })
    }
}
