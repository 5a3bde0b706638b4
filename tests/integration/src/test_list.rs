//! Prefix listing and pagination tests.

#[cfg(test)]
mod tests {
    use bucketry_client::{ClientConfig, InMemoryBackend};

    use crate::{create_test_bucket, memory_client, memory_client_with, put_bytes};

    const SEED_KEYS: [&str; 7] = [
        "photos/2024/jan/img1.jpg",
        "photos/2024/jan/img2.jpg",
        "photos/2024/feb/img3.jpg",
        "photos/2025/mar/img4.jpg",
        "documents/report.pdf",
        "documents/readme.txt",
        "root.txt",
    ];

    async fn seed(backend: &InMemoryBackend, bucket: &str) {
        for key in SEED_KEYS {
            put_bytes(backend, bucket, key, b"x").await;
        }
    }

    #[tokio::test]
    async fn test_should_collect_top_level_prefixes() {
        let (client, backend) = memory_client();
        let bucket = create_test_bucket(&client, "list").await;
        seed(&backend, &bucket).await;

        let prefixes = client.list_prefixes(&bucket, "").await.expect("list");

        // Leaf keys like root.txt contribute no common prefix.
        assert_eq!(prefixes, vec!["documents/", "photos/"]);
    }

    #[tokio::test]
    async fn test_should_scope_listing_to_prefix() {
        let (client, backend) = memory_client();
        let bucket = create_test_bucket(&client, "scoped").await;
        seed(&backend, &bucket).await;

        let prefixes = client
            .list_prefixes(&bucket, "photos/2024/")
            .await
            .expect("list");

        assert_eq!(prefixes, vec!["photos/2024/feb/", "photos/2024/jan/"]);
    }

    #[tokio::test]
    async fn test_should_accumulate_across_pages() {
        // Page size 2 forces the paginator through multiple continuation
        // tokens for the 10 prefixes below.
        let (client, backend) =
            memory_client_with(InMemoryBackend::with_page_size(2), ClientConfig::default());
        let bucket = create_test_bucket(&client, "paged").await;
        for i in 0..10 {
            put_bytes(&backend, &bucket, &format!("dir{i:02}/file.txt"), b"x").await;
        }

        let prefixes = client.list_prefixes(&bucket, "").await.expect("list");

        assert_eq!(prefixes.len(), 10);
        assert_eq!(prefixes[0], "dir00/");
        assert_eq!(prefixes[9], "dir09/");
    }

    #[tokio::test]
    async fn test_should_return_empty_for_unmatched_prefix() {
        let (client, backend) = memory_client();
        let bucket = create_test_bucket(&client, "unmatched").await;
        seed(&backend, &bucket).await;

        let prefixes = client
            .list_prefixes(&bucket, "videos/")
            .await
            .expect("list");

        assert!(prefixes.is_empty());
    }
}
