//! Core model types: encryption modes, object metadata, and inventory
//! report configurations.
//!
//! String-valued enums carry their wire names through `as_str` / `Display`
//! and parse through [`FromStr`]. Parsing is strict: an unrecognized value
//! yields [`UnknownEnumValue`] rather than falling back to a default, so the
//! client can surface schedule and format typos to the caller.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Server-side encryption algorithm identifier for AES-256.
pub const SSE_ALGORITHM_AES256: &str = "AES256";

/// Server-side encryption algorithm identifier for KMS-managed keys.
pub const SSE_ALGORITHM_KMS: &str = "aws:kms";

/// Error returned when parsing a string enum from an unrecognized value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized value: {value}")]
pub struct UnknownEnumValue {
    /// The value that failed to parse.
    pub value: String,
}

// ---------------------------------------------------------------------------
// Encryption
// ---------------------------------------------------------------------------

/// Server-side encryption mode attached to an upload.
///
/// There is no implicit default at call sites: omission means [`None`], and
/// the mode is immutable once constructed.
///
/// [`None`]: EncryptionMode::None
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EncryptionMode {
    /// No server-side encryption fields are set.
    #[default]
    None,
    /// AES-256 encryption managed entirely by the storage service.
    #[serde(rename = "AES256")]
    Aes256,
    /// Encryption backed by a key-management-service key.
    #[serde(rename = "aws:kms")]
    Kms {
        /// Identifier of the managed key.
        key_id: String,
    },
}

impl EncryptionMode {
    /// Returns the wire name of the encryption algorithm, if any.
    #[must_use]
    pub fn algorithm(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Aes256 => Some(SSE_ALGORITHM_AES256),
            Self::Kms { .. } => Some(SSE_ALGORITHM_KMS),
        }
    }
}

/// The metadata fragment produced by the encryption policy.
///
/// Attached to an upload's [`ObjectMetadata`]; both fields are `None` for
/// unencrypted uploads.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionFields {
    /// Server-side encryption algorithm identifier.
    pub sse_algorithm: Option<String>,
    /// Key-management-service key reference, set only for KMS mode.
    pub kms_key_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Object metadata
// ---------------------------------------------------------------------------

/// Metadata sent alongside an uploaded object.
///
/// Built fresh for every upload and never shared across calls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMetadata {
    /// User-defined key/value tags.
    pub user_metadata: HashMap<String, String>,
    /// Size of the object body in bytes.
    pub content_length: u64,
    /// Server-side encryption fields for this upload.
    pub encryption: EncryptionFields,
}

/// Handle returned by a successful create-bucket call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketHandle {
    /// The bucket name.
    pub name: String,
    /// The bucket location path (e.g. `/my-bucket`).
    pub location: String,
}

// ---------------------------------------------------------------------------
// Inventory configuration
// ---------------------------------------------------------------------------

/// Reporting frequency for an inventory configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InventorySchedule {
    /// One report per day.
    Daily,
    /// One report per week.
    Weekly,
}

impl InventorySchedule {
    /// Returns the wire name of this schedule.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
        }
    }
}

impl std::fmt::Display for InventorySchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InventorySchedule {
    type Err = UnknownEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            _ => Err(UnknownEnumValue {
                value: s.to_owned(),
            }),
        }
    }
}

/// Output file format for inventory reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InventoryFormat {
    /// Comma-separated values.
    #[serde(rename = "CSV")]
    Csv,
    /// Apache ORC columnar format.
    #[serde(rename = "ORC")]
    Orc,
    /// Apache Parquet columnar format.
    Parquet,
}

impl InventoryFormat {
    /// Returns the wire name of this format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Orc => "ORC",
            Self::Parquet => "Parquet",
        }
    }
}

impl std::fmt::Display for InventoryFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InventoryFormat {
    type Err = UnknownEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "orc" => Ok(Self::Orc),
            "parquet" => Ok(Self::Parquet),
            _ => Err(UnknownEnumValue {
                value: s.to_owned(),
            }),
        }
    }
}

/// Optional per-object fields included in inventory reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InventoryField {
    /// Last-modified timestamp of each object.
    LastModifiedDate,
    /// Storage class of each object.
    StorageClass,
    /// Size in bytes of each object.
    Size,
}

impl InventoryField {
    /// Returns the wire name of this field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LastModifiedDate => "LastModifiedDate",
            Self::StorageClass => "StorageClass",
            Self::Size => "Size",
        }
    }
}

impl std::fmt::Display for InventoryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which object versions an inventory report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IncludedObjectVersions {
    /// Only the current version of each object.
    #[default]
    Current,
    /// All versions of each object.
    All,
}

impl IncludedObjectVersions {
    /// Returns the wire name of this variant.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Current => "Current",
            Self::All => "All",
        }
    }
}

impl std::fmt::Display for IncludedObjectVersions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination of inventory report files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDestination {
    /// Bucket the reports are delivered to.
    pub bucket: String,
    /// Key prefix under which reports are written.
    pub prefix: String,
    /// Report file format.
    pub format: InventoryFormat,
    /// Account expected to own the destination bucket.
    pub account_id: Option<String>,
    /// Encryption applied to delivered report files.
    pub encryption: EncryptionMode,
}

/// A periodic inventory report configuration.
///
/// Submitted as one atomic configuration write; the storage backend owns
/// the persisted lifecycle thereafter. Writing a configuration with an
/// existing id overwrites the prior one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryConfiguration {
    /// Identifier of this configuration within the source bucket.
    pub id: String,
    /// Whether report generation is enabled.
    pub is_enabled: bool,
    /// Reporting frequency.
    pub schedule: InventorySchedule,
    /// Where report files are delivered.
    pub destination: InventoryDestination,
    /// Restricts the report to keys under this prefix.
    pub prefix_filter: Option<String>,
    /// Optional per-object fields included in each report row.
    pub optional_fields: Vec<InventoryField>,
    /// Which object versions the report covers.
    pub included_object_versions: IncludedObjectVersions,
}
