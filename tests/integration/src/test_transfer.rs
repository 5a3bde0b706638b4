//! Upload/download round-trip tests.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use bucketry_client::{ClientConfig, ClientError, InMemoryBackend};
    use bucketry_model::EncryptionMode;

    use crate::{create_test_bucket, get_bytes, memory_client, memory_client_with, put_bytes};

    fn patterned(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[tokio::test]
    async fn test_should_round_trip_bodies_of_varied_sizes() {
        let (client, _backend) = memory_client();
        let bucket = create_test_bucket(&client, "roundtrip").await;
        let dir = tempfile::tempdir().expect("tempdir");

        // Below, at, just over, and far past the copy buffer size.
        for len in [0usize, 1, 1024, 1025, 1_048_576] {
            let body = patterned(len);
            let source = dir.path().join(format!("src-{len}"));
            std::fs::write(&source, &body).expect("write fixture");

            let key = format!("blobs/{len}.bin");
            client
                .upload(&source, &bucket, &key, HashMap::new(), EncryptionMode::None)
                .await
                .expect("upload");

            let destination = dir.path().join(format!("dst-{len}"));
            let written = client
                .download(&bucket, &key, &destination)
                .await
                .expect("download");

            assert_eq!(written, len as u64);
            assert_eq!(std::fs::read(&destination).expect("read back"), body);
        }
    }

    #[tokio::test]
    async fn test_should_round_trip_with_small_chunk_size() {
        let config = ClientConfig::builder().transfer_chunk_size(7).build();
        let (client, backend) = memory_client_with(InMemoryBackend::new(), config);
        let bucket = create_test_bucket(&client, "chunked").await;
        let body = patterned(100);
        put_bytes(&backend, &bucket, "blob", &body).await;

        let dir = tempfile::tempdir().expect("tempdir");
        let destination = dir.path().join("out");
        let written = client
            .download(&bucket, "blob", &destination)
            .await
            .expect("download");

        assert_eq!(written, 100);
        assert_eq!(std::fs::read(&destination).expect("read back"), body);
    }

    #[tokio::test]
    async fn test_should_derive_scratch_path_from_key() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = ClientConfig::builder()
            .scratch_dir(dir.path().to_string_lossy().into_owned())
            .build();
        let (client, backend) = memory_client_with(InMemoryBackend::new(), config);
        let bucket = create_test_bucket(&client, "scratch").await;
        put_bytes(&backend, &bucket, "reports/2024/summary.csv", b"a,b,c").await;

        let path = client
            .download_default(&bucket, "reports/2024/summary.csv")
            .await
            .expect("download");

        assert_eq!(path, dir.path().join("summary.csv"));
        assert_eq!(std::fs::read(&path).expect("read back"), b"a,b,c");
    }

    #[tokio::test]
    async fn test_should_record_encryption_fields_on_upload() {
        let (client, backend) = memory_client();
        let bucket = create_test_bucket(&client, "sse").await;
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("secret");
        std::fs::write(&source, b"payload").expect("write fixture");

        let mut tags = HashMap::new();
        tags.insert("origin".to_owned(), "integration".to_owned());
        client
            .upload(
                &source,
                &bucket,
                "secret.bin",
                tags,
                EncryptionMode::Kms {
                    key_id: "alias/test".to_owned(),
                },
            )
            .await
            .expect("upload");

        let metadata = backend
            .object_metadata(&bucket, "secret.bin")
            .expect("stored metadata");
        assert_eq!(metadata.encryption.sse_algorithm.as_deref(), Some("aws:kms"));
        assert_eq!(metadata.encryption.kms_key_id.as_deref(), Some("alias/test"));
        assert_eq!(
            metadata.user_metadata.get("origin").map(String::as_str),
            Some("integration")
        );
        assert_eq!(get_bytes(&backend, &bucket, "secret.bin").await, b"payload");
    }

    #[tokio::test]
    async fn test_should_fail_download_for_missing_key() {
        let (client, _backend) = memory_client();
        let bucket = create_test_bucket(&client, "missing").await;
        let dir = tempfile::tempdir().expect("tempdir");

        let err = client
            .download(&bucket, "nope", dir.path().join("out"))
            .await
            .expect_err("missing key");

        assert!(matches!(err, ClientError::SourceNotFound { .. }));
    }

    #[tokio::test]
    async fn test_should_fail_upload_for_missing_local_file() {
        let (client, _backend) = memory_client();
        let bucket = create_test_bucket(&client, "nofile").await;
        let dir = tempfile::tempdir().expect("tempdir");

        let err = client
            .upload(
                dir.path().join("absent"),
                &bucket,
                "k",
                HashMap::new(),
                EncryptionMode::None,
            )
            .await
            .expect_err("missing file");

        assert!(matches!(err, ClientError::LocalReadNotFound { .. }));
    }
}
