//! Inventory configuration tests.

#[cfg(test)]
mod tests {
    use bucketry_client::{ClientError, build_inventory_configuration};
    use bucketry_model::{IncludedObjectVersions, InventoryFormat, InventorySchedule};

    use crate::{create_test_bucket, memory_client};

    #[tokio::test]
    async fn test_should_submit_daily_csv_configuration() {
        let (client, _backend) = memory_client();
        let bucket = create_test_bucket(&client, "inventory").await;

        let configuration = build_inventory_configuration(
            "daily-report",
            true,
            "csv",
            "daily",
            "arn:aws:s3:::report-bucket",
            "reports/",
            None,
            None,
            None,
        )
        .expect("build");
        client
            .put_inventory_configuration(&bucket, configuration)
            .await
            .expect("submit");

        let stored = client
            .get_inventory_configuration(&bucket, "daily-report")
            .await
            .expect("read back")
            .expect("stored configuration");
        assert_eq!(stored.schedule, InventorySchedule::Daily);
        assert_eq!(stored.destination.format, InventoryFormat::Csv);
        assert_eq!(
            stored.included_object_versions,
            IncludedObjectVersions::Current
        );
        // The reported field set is fixed.
        assert_eq!(stored.optional_fields.len(), 3);
    }

    #[tokio::test]
    async fn test_should_overwrite_configuration_with_same_id() {
        let (client, _backend) = memory_client();
        let bucket = create_test_bucket(&client, "overwrite").await;

        let first = build_inventory_configuration(
            "report",
            true,
            "csv",
            "daily",
            "arn:aws:s3:::dest",
            "v1/",
            None,
            None,
            None,
        )
        .expect("build");
        let second = build_inventory_configuration(
            "report",
            false,
            "parquet",
            "weekly",
            "arn:aws:s3:::dest",
            "v2/",
            None,
            None,
            None,
        )
        .expect("build");

        client
            .put_inventory_configuration(&bucket, first)
            .await
            .expect("first submit");
        client
            .put_inventory_configuration(&bucket, second)
            .await
            .expect("second submit");

        let stored = client
            .get_inventory_configuration(&bucket, "report")
            .await
            .expect("read back")
            .expect("stored configuration");
        assert!(!stored.is_enabled);
        assert_eq!(stored.schedule, InventorySchedule::Weekly);
        assert_eq!(stored.destination.prefix, "v2/");

        let absent = client
            .get_inventory_configuration(&bucket, "other")
            .await
            .expect("read back");
        assert!(absent.is_none());
    }

    #[tokio::test]
    async fn test_should_reject_unrecognized_schedule() {
        let err = build_inventory_configuration(
            "report",
            true,
            "csv",
            "monthly",
            "dest",
            "",
            None,
            None,
            None,
        )
        .expect_err("monthly is not a schedule");

        assert!(matches!(err, ClientError::InvalidSchedule { value } if value == "monthly"));
    }

    #[tokio::test]
    async fn test_should_reject_empty_kms_key() {
        let err = build_inventory_configuration(
            "report",
            true,
            "csv",
            "daily",
            "dest",
            "",
            None,
            Some(""),
            None,
        )
        .expect_err("empty key id");

        assert!(matches!(err, ClientError::InvalidKeyId));
    }
}
