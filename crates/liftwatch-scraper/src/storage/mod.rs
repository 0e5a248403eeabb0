//! S3 object storage
//!
//! Publishes scraped tables as timestamped CSV objects. Both tables of a
//! run share one timestamp under the `data/` prefix so the pair can be
//! correlated later.

pub mod config;

pub use config::StorageConfig;

use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use chrono::{DateTime, Utc};
use liftwatch_common::LiftwatchError;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Content type of published tables.
const CSV_CONTENT_TYPE: &str = "text/csv";

/// Prefix under which all tables are published.
const DATA_PREFIX: &str = "data";

/// Failure writing to the object store.
///
/// Fatal to the run; nothing here retries, the next scheduled run is the
/// retry.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to upload s3://{bucket}/{key}: {message}")]
    Upload {
        bucket: String,
        key: String,
        message: String,
    },
}

impl From<StorageError> for LiftwatchError {
    fn from(err: StorageError) -> Self {
        LiftwatchError::Storage(err.to_string())
    }
}

/// Metadata of a completed upload.
#[derive(Debug, Clone)]
pub struct UploadResult {
    pub key: String,
    pub checksum: String,
    pub size: i64,
}

/// Object key timestamp for one run (UTC, second resolution).
///
/// Both keys of a run are built from the same timestamp.
pub fn run_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

/// Key of the status table for a run.
pub fn status_key(timestamp: &str) -> String {
    format!("{}/status_{}.csv", DATA_PREFIX, timestamp)
}

/// Key of the wait-time table for a run.
pub fn wait_time_key(timestamp: &str) -> String {
    format!("{}/wait_time_{}.csv", DATA_PREFIX, timestamp)
}

/// S3-backed publisher for scraped tables.
#[derive(Debug, Clone)]
pub struct Storage {
    client: Client,
    bucket: String,
}

impl Storage {
    /// Build a client from configuration.
    ///
    /// Static credentials and a custom endpoint take effect when
    /// configured; otherwise the default AWS provider chain applies.
    pub async fn new(config: StorageConfig) -> Self {
        debug!("Initializing storage for bucket: {}", config.bucket);

        let mut builder = match (&config.access_key, &config.secret_key) {
            (Some(access_key), Some(secret_key)) => {
                let credentials = Credentials::new(
                    access_key.clone(),
                    secret_key.clone(),
                    None,
                    None,
                    "liftwatch-static",
                );
                aws_sdk_s3::Config::builder()
                    .credentials_provider(credentials)
                    .region(Region::new(config.region.clone()))
            }
            _ => {
                let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
                    .region(Region::new(config.region.clone()))
                    .load()
                    .await;
                aws_sdk_s3::config::Builder::from(&shared)
            }
        };

        // A failed upload fails the run; the next scheduled run is the
        // retry, so the SDK must not add attempts of its own.
        builder = builder
            .retry_config(RetryConfig::disabled())
            .force_path_style(config.path_style);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        let client = Client::from_conf(builder.build());

        Self {
            client,
            bucket: config.bucket,
        }
    }

    /// Bucket this storage publishes to.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Upload one CSV document under the given key.
    #[instrument(skip(self, body))]
    pub async fn publish_csv(
        &self,
        key: &str,
        body: Vec<u8>,
    ) -> Result<UploadResult, StorageError> {
        let checksum = calculate_sha256(&body);
        let size = body.len() as i64;
        debug!("Uploading {} bytes to s3://{}/{}", size, self.bucket, key);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(CSV_CONTENT_TYPE)
            .send()
            .await
            .map_err(|err| StorageError::Upload {
                bucket: self.bucket.clone(),
                key: key.to_string(),
                message: DisplayErrorContext(&err).to_string(),
            })?;

        info!("Uploaded {} to s3://{}/{}", key, self.bucket, key);

        Ok(UploadResult {
            key: key.to_string(),
            checksum,
            size,
        })
    }
}

/// SHA-256 of the uploaded bytes, hex encoded.
fn calculate_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
