//! AWS S3 adapter for the bucketry storage backend seam.
//!
//! [`AwsBackend`] implements
//! [`StorageBackend`](bucketry_client::StorageBackend) over an injected,
//! pre-authenticated [`aws_sdk_s3::Client`]. Credential resolution, region
//! selection, and endpoint overrides all happen when that client is built;
//! this crate only translates between the client core's types and the SDK's.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use bucketry_aws::AwsBackend;
//! use bucketry_client::ObjectClient;
//!
//! # async fn example() {
//! let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
//! let backend = AwsBackend::new(aws_sdk_s3::Client::new(&sdk_config));
//! let client = ObjectClient::new(Arc::new(backend));
//! # let _ = client;
//! # }
//! ```
//!
//! # Error mapping
//!
//! - Missing keys on get map to `SourceNotFound`.
//! - Other service errors map to `BackendRejected` carrying the service
//!   error code and message.
//! - Dispatch, timeout, and response-decode failures map to
//!   `BackendUnreachable`.
//! - Deletes of absent objects or buckets succeed, matching the client
//!   core's idempotent-delete contract.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::{BuildError, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types as sdk;
use bytes::Bytes;
use tracing::debug;

use bucketry_client::backend::{ObjectReader, StorageBackend};
use bucketry_client::error::ClientError;
use bucketry_model::{
    BucketHandle, EncryptionMode, IncludedObjectVersions, InventoryConfiguration,
    InventoryDestination, InventoryField, InventoryFormat, InventorySchedule, ListPrefixesRequest,
    ObjectMetadata, PrefixPage,
};

/// `StorageBackend` implementation backed by the AWS S3 SDK.
#[derive(Debug, Clone)]
pub struct AwsBackend {
    client: Client,
}

impl AwsBackend {
    /// Wrap an already-configured SDK client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// The underlying SDK client.
    #[must_use]
    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Map an SDK error to the client taxonomy.
///
/// Service errors carry a code and message from the storage service and
/// become `BackendRejected`; everything else (connect, timeout, response
/// decode) never produced a service answer and becomes `BackendUnreachable`.
fn map_sdk_error<E, R>(err: SdkError<E, R>) -> ClientError
where
    E: ProvideErrorMetadata + std::fmt::Debug,
    R: std::fmt::Debug,
{
    match err.as_service_error() {
        Some(service) => ClientError::BackendRejected {
            code: service.code().unwrap_or("Unknown").to_owned(),
            message: service.message().unwrap_or_default().to_owned(),
        },
        None => ClientError::BackendUnreachable {
            message: err.to_string(),
        },
    }
}

/// Whether an SDK error is a service error with the given code.
fn has_service_code<E, R>(err: &SdkError<E, R>, code: &str) -> bool
where
    E: ProvideErrorMetadata,
{
    err.as_service_error().and_then(ProvideErrorMetadata::code) == Some(code)
}

fn invalid_configuration(err: BuildError) -> ClientError {
    ClientError::BackendRejected {
        code: "InvalidConfiguration".to_owned(),
        message: err.to_string(),
    }
}

fn to_sdk_frequency(schedule: InventorySchedule) -> sdk::InventoryFrequency {
    match schedule {
        InventorySchedule::Daily => sdk::InventoryFrequency::Daily,
        InventorySchedule::Weekly => sdk::InventoryFrequency::Weekly,
    }
}

fn to_sdk_format(format: InventoryFormat) -> sdk::InventoryFormat {
    match format {
        InventoryFormat::Csv => sdk::InventoryFormat::Csv,
        InventoryFormat::Orc => sdk::InventoryFormat::Orc,
        InventoryFormat::Parquet => sdk::InventoryFormat::Parquet,
    }
}

fn to_sdk_field(field: InventoryField) -> sdk::InventoryOptionalField {
    match field {
        InventoryField::LastModifiedDate => sdk::InventoryOptionalField::LastModifiedDate,
        InventoryField::StorageClass => sdk::InventoryOptionalField::StorageClass,
        InventoryField::Size => sdk::InventoryOptionalField::Size,
    }
}

fn to_sdk_versions(versions: IncludedObjectVersions) -> sdk::InventoryIncludedObjectVersions {
    match versions {
        IncludedObjectVersions::Current => sdk::InventoryIncludedObjectVersions::Current,
        IncludedObjectVersions::All => sdk::InventoryIncludedObjectVersions::All,
    }
}

/// Report-file encryption for the inventory destination, if any.
fn to_sdk_report_encryption(
    mode: EncryptionMode,
) -> Result<Option<sdk::InventoryEncryption>, ClientError> {
    let encryption = match mode {
        EncryptionMode::None => return Ok(None),
        EncryptionMode::Aes256 => sdk::InventoryEncryption::builder()
            .sses3(sdk::Sses3::builder().build())
            .build(),
        EncryptionMode::Kms { key_id } => sdk::InventoryEncryption::builder()
            .ssekms(
                sdk::Ssekms::builder()
                    .key_id(key_id)
                    .build()
                    .map_err(invalid_configuration)?,
            )
            .build(),
    };
    Ok(Some(encryption))
}

/// Assemble the SDK inventory configuration from the model one.
///
/// The destination bucket value is passed through unchanged; the storage
/// API expects it in ARN form and the caller owns that formatting.
fn to_sdk_configuration(
    configuration: InventoryConfiguration,
) -> Result<sdk::InventoryConfiguration, ClientError> {
    let destination = configuration.destination;
    let encryption = to_sdk_report_encryption(destination.encryption)?;

    let mut bucket_destination = sdk::InventoryS3BucketDestination::builder()
        .bucket(destination.bucket)
        .format(to_sdk_format(destination.format))
        .set_account_id(destination.account_id)
        .set_encryption(encryption);
    if !destination.prefix.is_empty() {
        bucket_destination = bucket_destination.prefix(destination.prefix);
    }

    let filter = configuration
        .prefix_filter
        .map(|prefix| {
            sdk::InventoryFilter::builder()
                .prefix(prefix)
                .build()
                .map_err(invalid_configuration)
        })
        .transpose()?;

    let optional_fields: Vec<_> = configuration
        .optional_fields
        .into_iter()
        .map(to_sdk_field)
        .collect();

    sdk::InventoryConfiguration::builder()
        .id(configuration.id)
        .is_enabled(configuration.is_enabled)
        .schedule(
            sdk::InventorySchedule::builder()
                .frequency(to_sdk_frequency(configuration.schedule))
                .build()
                .map_err(invalid_configuration)?,
        )
        .destination(
            sdk::InventoryDestination::builder()
                .s3_bucket_destination(
                    bucket_destination
                        .build()
                        .map_err(invalid_configuration)?,
                )
                .build(),
        )
        .included_object_versions(to_sdk_versions(configuration.included_object_versions))
        .set_filter(filter)
        .set_optional_fields((!optional_fields.is_empty()).then_some(optional_fields))
        .build()
        .map_err(invalid_configuration)
}

fn unrecognized(field: &str, value: &str) -> ClientError {
    ClientError::DecodeError {
        message: format!("unrecognized {field} value {value:?} in stored inventory configuration"),
    }
}

fn missing(field: &str) -> ClientError {
    ClientError::DecodeError {
        message: format!("missing {field} in stored inventory configuration"),
    }
}

fn from_sdk_field(field: &sdk::InventoryOptionalField) -> Result<InventoryField, ClientError> {
    match field {
        sdk::InventoryOptionalField::LastModifiedDate => Ok(InventoryField::LastModifiedDate),
        sdk::InventoryOptionalField::StorageClass => Ok(InventoryField::StorageClass),
        sdk::InventoryOptionalField::Size => Ok(InventoryField::Size),
        other => Err(unrecognized("optional field", other.as_str())),
    }
}

fn from_sdk_versions(
    versions: &sdk::InventoryIncludedObjectVersions,
) -> Result<IncludedObjectVersions, ClientError> {
    match versions {
        sdk::InventoryIncludedObjectVersions::Current => Ok(IncludedObjectVersions::Current),
        sdk::InventoryIncludedObjectVersions::All => Ok(IncludedObjectVersions::All),
        other => Err(unrecognized("included object versions", other.as_str())),
    }
}

/// Recover the model configuration from the SDK one.
///
/// The inverse of [`to_sdk_configuration`]; values the model cannot
/// represent (unknown enum members of a newer service) fail rather than
/// being dropped.
fn from_sdk_configuration(
    configuration: &sdk::InventoryConfiguration,
) -> Result<InventoryConfiguration, ClientError> {
    let bucket_destination = configuration
        .destination()
        .ok_or_else(|| missing("destination"))?
        .s3_bucket_destination()
        .ok_or_else(|| missing("s3 bucket destination"))?;

    let encryption = match bucket_destination.encryption() {
        Some(enc) => {
            if let Some(kms) = enc.ssekms() {
                EncryptionMode::Kms {
                    key_id: kms.key_id().to_owned(),
                }
            } else if enc.sses3().is_some() {
                EncryptionMode::Aes256
            } else {
                EncryptionMode::None
            }
        }
        None => EncryptionMode::None,
    };

    let frequency = configuration
        .schedule()
        .ok_or_else(|| missing("schedule"))?
        .frequency();
    let schedule: InventorySchedule = frequency
        .as_str()
        .parse()
        .map_err(|_| unrecognized("schedule", frequency.as_str()))?;
    let format: InventoryFormat = bucket_destination
        .format()
        .as_str()
        .parse()
        .map_err(|_| unrecognized("format", bucket_destination.format().as_str()))?;

    let optional_fields = configuration
        .optional_fields()
        .iter()
        .map(from_sdk_field)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(InventoryConfiguration {
        id: configuration.id().to_owned(),
        is_enabled: configuration.is_enabled(),
        schedule,
        destination: InventoryDestination {
            bucket: bucket_destination.bucket().to_owned(),
            prefix: bucket_destination.prefix().unwrap_or_default().to_owned(),
            format,
            account_id: bucket_destination.account_id().map(ToOwned::to_owned),
            encryption,
        },
        prefix_filter: configuration.filter().map(|f| f.prefix().to_owned()),
        optional_fields,
        included_object_versions: from_sdk_versions(configuration.included_object_versions())?,
    })
}

#[async_trait]
impl StorageBackend for AwsBackend {
    async fn list_prefixes_page(
        &self,
        request: ListPrefixesRequest,
    ) -> Result<PrefixPage, ClientError> {
        let response = self
            .client
            .list_objects_v2()
            .bucket(&request.bucket)
            .prefix(&request.prefix)
            .delimiter(&request.delimiter)
            .set_continuation_token(request.continuation_token)
            .send()
            .await
            .map_err(map_sdk_error)?;

        let prefixes: Vec<String> = response
            .common_prefixes()
            .iter()
            .filter_map(|p| p.prefix().map(ToOwned::to_owned))
            .collect();
        debug!(
            bucket = %request.bucket,
            count = prefixes.len(),
            "listed one page of common prefixes"
        );
        Ok(PrefixPage {
            prefixes,
            next_continuation_token: response.next_continuation_token().map(ToOwned::to_owned),
            is_truncated: response.is_truncated().unwrap_or_default(),
        })
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectReader, ClientError> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                if err.as_service_error().is_some_and(GetObjectError::is_no_such_key) {
                    ClientError::SourceNotFound {
                        bucket: bucket.to_owned(),
                        key: key.to_owned(),
                    }
                } else {
                    map_sdk_error(err)
                }
            })?;
        Ok(Box::pin(response.body.into_async_read()))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        metadata: ObjectMetadata,
    ) -> Result<(), ClientError> {
        let mut request = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body));
        if let Ok(length) = i64::try_from(metadata.content_length) {
            request = request.content_length(length);
        }
        if !metadata.user_metadata.is_empty() {
            request = request.set_metadata(Some(metadata.user_metadata));
        }
        if let Some(algorithm) = metadata.encryption.sse_algorithm {
            request =
                request.server_side_encryption(sdk::ServerSideEncryption::from(algorithm.as_str()));
        }
        if let Some(key_id) = metadata.encryption.kms_key_id {
            request = request.ssekms_key_id(key_id);
        }
        request.send().await.map_err(map_sdk_error)?;
        debug!(bucket, key, "put_object completed");
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), ClientError> {
        match self
            .client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(()),
            // Absent buckets behave like absent keys: the delete is a no-op.
            Err(err) if has_service_code(&err, "NoSuchBucket") => Ok(()),
            Err(err) => Err(map_sdk_error(err)),
        }
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool, ClientError> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                if err.as_service_error().is_some_and(HeadBucketError::is_not_found) {
                    Ok(false)
                } else {
                    Err(map_sdk_error(err))
                }
            }
        }
    }

    async fn create_bucket(&self, bucket: &str) -> Result<BucketHandle, ClientError> {
        let response = self
            .client
            .create_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(map_sdk_error)?;
        debug!(bucket, "create_bucket completed");
        Ok(BucketHandle {
            name: bucket.to_owned(),
            location: response.location().unwrap_or_default().to_owned(),
        })
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<(), ClientError> {
        match self.client.delete_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(()),
            Err(err) if has_service_code(&err, "NoSuchBucket") => Ok(()),
            Err(err) => Err(map_sdk_error(err)),
        }
    }

    async fn put_inventory_configuration(
        &self,
        bucket: &str,
        configuration: InventoryConfiguration,
    ) -> Result<(), ClientError> {
        let inventory_id = configuration.id.clone();
        let sdk_configuration = to_sdk_configuration(configuration)?;
        self.client
            .put_bucket_inventory_configuration()
            .bucket(bucket)
            .id(&inventory_id)
            .inventory_configuration(sdk_configuration)
            .send()
            .await
            .map_err(map_sdk_error)?;
        debug!(bucket, inventory_id, "put_inventory_configuration completed");
        Ok(())
    }

    async fn get_inventory_configuration(
        &self,
        bucket: &str,
        inventory_id: &str,
    ) -> Result<Option<InventoryConfiguration>, ClientError> {
        let response = match self
            .client
            .get_bucket_inventory_configuration()
            .bucket(bucket)
            .id(inventory_id)
            .send()
            .await
        {
            Ok(response) => response,
            // The service answers a missing id with an unmodeled 404.
            Err(err) if has_service_code(&err, "NoSuchConfiguration") => return Ok(None),
            Err(err) => return Err(map_sdk_error(err)),
        };
        response
            .inventory_configuration()
            .map(from_sdk_configuration)
            .transpose()
    }
}
