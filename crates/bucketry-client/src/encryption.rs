//! Server-side encryption policy.
//!
//! Pure construction with no I/O: given a requested [`EncryptionMode`],
//! produce the [`EncryptionFields`] fragment to attach to an upload's
//! metadata. Policy selection is explicit at the call site; there is no
//! implicit default encryption.

use bucketry_model::{EncryptionFields, EncryptionMode};

use crate::error::ClientError;

/// Produce the metadata fragment for the requested encryption mode.
///
/// Applying the same mode twice yields the same fragment.
///
/// # Errors
///
/// Returns [`ClientError::InvalidKeyId`] when a KMS mode carries an empty
/// key id.
///
/// # Examples
///
/// ```
/// use bucketry_client::encryption_fields;
/// use bucketry_model::EncryptionMode;
///
/// let fields = encryption_fields(&EncryptionMode::Aes256).unwrap();
/// assert_eq!(fields.sse_algorithm.as_deref(), Some("AES256"));
/// assert!(fields.kms_key_id.is_none());
///
/// let fields = encryption_fields(&EncryptionMode::None).unwrap();
/// assert!(fields.sse_algorithm.is_none());
/// ```
pub fn encryption_fields(mode: &EncryptionMode) -> Result<EncryptionFields, ClientError> {
    match mode {
        EncryptionMode::None => Ok(EncryptionFields::default()),
        EncryptionMode::Aes256 => Ok(EncryptionFields {
            sse_algorithm: mode.algorithm().map(ToOwned::to_owned),
            kms_key_id: None,
        }),
        EncryptionMode::Kms { key_id } => {
            if key_id.is_empty() {
                return Err(ClientError::InvalidKeyId);
            }
            Ok(EncryptionFields {
                sse_algorithm: mode.algorithm().map(ToOwned::to_owned),
                kms_key_id: Some(key_id.clone()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_produce_no_fields_for_none() {
        let fields = encryption_fields(&EncryptionMode::None).unwrap();
        assert_eq!(fields, EncryptionFields::default());
    }

    #[test]
    fn test_should_set_kms_key_reference() {
        let mode = EncryptionMode::Kms {
            key_id: "arn:aws:kms:us-east-1:123456789012:key/abc".to_owned(),
        };
        let fields = encryption_fields(&mode).unwrap();
        assert_eq!(fields.sse_algorithm.as_deref(), Some("aws:kms"));
        assert_eq!(
            fields.kms_key_id.as_deref(),
            Some("arn:aws:kms:us-east-1:123456789012:key/abc")
        );
    }

    #[test]
    fn test_should_reject_empty_kms_key_id() {
        let mode = EncryptionMode::Kms {
            key_id: String::new(),
        };
        assert!(matches!(
            encryption_fields(&mode),
            Err(ClientError::InvalidKeyId)
        ));
    }

    #[test]
    fn test_should_be_idempotent_for_aes256() {
        let first = encryption_fields(&EncryptionMode::Aes256).unwrap();
        let second = encryption_fields(&EncryptionMode::Aes256).unwrap();
        assert_eq!(first, second);
    }
}
