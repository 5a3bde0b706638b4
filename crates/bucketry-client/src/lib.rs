//! Object-storage client core for Bucketry.
//!
//! This crate drives the client-side operations of an S3-analogous storage
//! service: delimiter-grouped prefix listing with pagination, chunked
//! download and single-request upload of objects, server-side encryption
//! policy for uploads, bucket lifecycle passthroughs, and inventory report
//! configuration.
//!
//! # Architecture
//!
//! ```text
//! ObjectClient (ops::list / ops::transfer / ops::bucket / ops::inventory)
//!        |
//!        v
//! StorageBackend (object-safe async trait, injected)
//!        |
//!        +-- InMemoryBackend (this crate, tests and local stubs)
//!        +-- AwsBackend      (bucketry-aws, over aws-sdk-s3)
//! ```
//!
//! The backend handle is long-lived and shared read-only across calls; each
//! operation owns its own buffers and file handles, so no locking happens in
//! the client itself. There are no retries, timeouts, or background tasks
//! here; a surrounding orchestrator owns that policy.

pub mod backend;
pub mod client;
pub mod config;
pub mod encryption;
pub mod error;
pub mod key;
pub mod memory;
pub mod ops;

pub use backend::{ObjectReader, StorageBackend};
pub use client::ObjectClient;
pub use config::ClientConfig;
pub use encryption::encryption_fields;
pub use error::ClientError;
pub use memory::InMemoryBackend;
pub use ops::inventory::build_inventory_configuration;
