//! Bucket and object lifecycle tests.

#[cfg(test)]
mod tests {
    use bucketry_client::ClientError;

    use crate::{create_test_bucket, memory_client, put_bytes, test_bucket_name};

    #[tokio::test]
    async fn test_should_see_bucket_after_create() {
        let (client, _backend) = memory_client();
        let name = test_bucket_name("exists");
        assert!(!client.bucket_exists(&name).await.expect("exists"));

        let handle = client.create_bucket(&name).await.expect("create");
        assert_eq!(handle.name, name);

        assert!(client.bucket_exists(&name).await.expect("exists"));
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_create() {
        let (client, _backend) = memory_client();
        let bucket = create_test_bucket(&client, "dup").await;

        let err = client
            .create_bucket(&bucket)
            .await
            .expect_err("duplicate create");
        assert!(matches!(err, ClientError::BackendRejected { .. }));
    }

    #[tokio::test]
    async fn test_should_delete_object_then_tolerate_repeat() {
        let (client, backend) = memory_client();
        let bucket = create_test_bucket(&client, "delobj").await;
        put_bytes(&backend, &bucket, "k", b"data").await;

        client.delete_object(&bucket, "k").await.expect("delete");
        // Deleting an already-deleted object is a no-op.
        client.delete_object(&bucket, "k").await.expect("repeat");

        assert!(backend.object_metadata(&bucket, "k").is_none());
    }

    #[tokio::test]
    async fn test_should_delete_bucket_then_tolerate_repeat() {
        let (client, _backend) = memory_client();
        let bucket = create_test_bucket(&client, "delbkt").await;

        client.delete_bucket(&bucket).await.expect("delete");
        client.delete_bucket(&bucket).await.expect("repeat");

        assert!(!client.bucket_exists(&bucket).await.expect("exists"));
    }
}
