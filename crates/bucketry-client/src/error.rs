//! Client error taxonomy.
//!
//! [`ClientError`] is the single closed error enum returned by every
//! operation in this crate. Callers pattern-match on it instead of catching
//! backend-specific error classes. No variant is produced twice for the same
//! failure, and nothing is swallowed silently except deletes of absent
//! objects or buckets, which are documented as idempotent.

use std::path::PathBuf;

/// Error type for all client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    // -----------------------------------------------------------------------
    // Backend errors
    // -----------------------------------------------------------------------
    /// The request never reached the storage service.
    #[error("backend unreachable: {message}")]
    BackendUnreachable {
        /// Transport-level diagnostic.
        message: String,
    },

    /// The request reached the service and was refused.
    #[error("backend rejected the request ({code}): {message}")]
    BackendRejected {
        /// Service error code (e.g. `AccessDenied`, `NoSuchBucket`).
        code: String,
        /// The service's diagnostic message.
        message: String,
    },

    /// The addressed object does not exist.
    #[error("the specified key does not exist: {bucket}/{key}")]
    SourceNotFound {
        /// Bucket that was addressed.
        bucket: String,
        /// Key that was not found.
        key: String,
    },

    // -----------------------------------------------------------------------
    // Local filesystem errors
    // -----------------------------------------------------------------------
    /// The local file to upload does not exist or could not be opened.
    #[error("local file not found or unreadable: {path}")]
    LocalReadNotFound {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The download destination could not be created or written.
    #[error("failed writing to {path}: {source}")]
    LocalWriteError {
        /// The destination path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    // -----------------------------------------------------------------------
    // Validation errors
    // -----------------------------------------------------------------------
    /// A key or object body failed to decode under the requested charset.
    #[error("decode failed: {message}")]
    DecodeError {
        /// What failed to decode and why.
        message: String,
    },

    /// The inventory schedule is not one of the recognized values.
    #[error("invalid inventory schedule: {value} (expected daily or weekly)")]
    InvalidSchedule {
        /// The rejected schedule string.
        value: String,
    },

    /// The inventory report format is not one of the recognized values.
    #[error("invalid inventory format: {value} (expected CSV, ORC, or Parquet)")]
    InvalidFormat {
        /// The rejected format string.
        value: String,
    },

    /// A KMS encryption mode was requested with an empty key id.
    #[error("KMS key id must not be empty")]
    InvalidKeyId,

    /// The backend violated the pagination contract.
    #[error("pagination protocol violation: {message}")]
    ProtocolError {
        /// Which invariant was violated.
        message: String,
    },
}

impl ClientError {
    /// Build a [`ClientError::LocalWriteError`] for `path`.
    pub(crate) fn local_write(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::LocalWriteError {
            path: path.to_path_buf(),
            source,
        }
    }
}
