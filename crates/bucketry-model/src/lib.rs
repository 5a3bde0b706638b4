//! Data model for the Bucketry object-storage client.
//!
//! This crate holds the plain data types exchanged between the client core
//! (`bucketry-client`) and storage backends: listing pages, object metadata,
//! server-side encryption modes, and inventory report configurations. It has
//! no I/O and no backend-specific dependencies, so alternative backends can
//! depend on it without pulling in the client.

pub mod list;
pub mod types;

pub use list::{ListPrefixesRequest, PrefixPage};
pub use types::{
    BucketHandle, EncryptionFields, EncryptionMode, IncludedObjectVersions, InventoryConfiguration,
    InventoryDestination, InventoryField, InventoryFormat, InventorySchedule, ObjectMetadata,
    UnknownEnumValue,
};
