//! Storage integration tests
//!
//! Runs the publisher against a mock S3 endpoint. Path-style addressing
//! keeps the bucket in the request path, so uploads are plain PUTs the
//! mock can match on.

use liftwatch_scraper::storage::{Storage, StorageConfig};
use wiremock::matchers::{body_string, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn publishes_csv_with_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/lift-data/data/status_20240115_103045.csv"))
        .and(header("content-type", "text/csv"))
        .and(body_string_contains("Summit,Open"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let storage =
        Storage::new(StorageConfig::for_custom_endpoint(server.uri(), "lift-data")).await;

    let result = storage
        .publish_csv(
            "data/status_20240115_103045.csv",
            b"Lift,Status\nSummit,Open\n".to_vec(),
        )
        .await
        .unwrap();

    assert_eq!(result.key, "data/status_20240115_103045.csv");
    assert_eq!(result.size, 24);
    assert_eq!(result.checksum.len(), 64);
}

#[tokio::test]
async fn uploads_header_only_documents_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/lift-data/data/wait_time_20240115_103045.csv"))
        .and(body_string("Lift,Wait Time\n"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let storage =
        Storage::new(StorageConfig::for_custom_endpoint(server.uri(), "lift-data")).await;

    storage
        .publish_csv(
            "data/wait_time_20240115_103045.csv",
            b"Lift,Wait Time\n".to_vec(),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn rejected_upload_reports_bucket_and_key() {
    let server = MockServer::start().await;

    // expect(1) also proves a server error is not retried.
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let storage =
        Storage::new(StorageConfig::for_custom_endpoint(server.uri(), "lift-data")).await;

    let err = storage
        .publish_csv("data/status_20240115_103045.csv", b"Lift,Status\n".to_vec())
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(
        message.contains("s3://lift-data/data/status_20240115_103045.csv"),
        "unexpected message: {message}"
    );
}
