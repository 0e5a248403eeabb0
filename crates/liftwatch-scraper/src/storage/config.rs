//! Storage configuration

use crate::config::{EnvSource, ProcessEnv};
use serde::{Deserialize, Serialize};

/// Default signing region when none is configured.
const DEFAULT_REGION: &str = "us-east-1";

/// S3-compatible storage configuration.
///
/// Without a custom endpoint the client signs against AWS S3 and
/// credentials come from the default provider chain. With one (MinIO,
/// localstack, a test double) static credentials and path-style
/// addressing apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Custom endpoint URL (None for AWS S3)
    pub endpoint: Option<String>,
    /// Region used for signing
    pub region: String,
    /// Destination bucket
    pub bucket: String,
    /// Static access key (None falls back to the default credential chain)
    pub access_key: Option<String>,
    /// Static secret key
    pub secret_key: Option<String>,
    /// Force path-style addressing (required by most S3 stand-ins)
    pub path_style: bool,
}

impl StorageConfig {
    /// Configuration for an S3 stand-in such as MinIO.
    pub fn for_custom_endpoint(endpoint: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            region: DEFAULT_REGION.to_string(),
            bucket: bucket.into(),
            access_key: Some("minioadmin".to_string()),
            secret_key: Some("minioadmin".to_string()),
            path_style: true,
        }
    }

    /// Load storage settings for the given bucket from a configuration
    /// source.
    ///
    /// - `S3_ENDPOINT`: custom endpoint URL
    /// - `S3_REGION`: signing region (default: us-east-1)
    /// - `S3_ACCESS_KEY` / `AWS_ACCESS_KEY_ID`: static access key
    /// - `S3_SECRET_KEY` / `AWS_SECRET_ACCESS_KEY`: static secret key
    /// - `S3_PATH_STYLE`: force path-style addressing (defaults to true
    ///   when a custom endpoint is set)
    pub fn from_source(env: &dyn EnvSource, bucket: String) -> Self {
        let endpoint = env.var("S3_ENDPOINT");
        let path_style = env
            .var("S3_PATH_STYLE")
            .and_then(|v| v.parse().ok())
            .unwrap_or(endpoint.is_some());

        Self {
            endpoint,
            region: env
                .var("S3_REGION")
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            bucket,
            access_key: env
                .var("S3_ACCESS_KEY")
                .or_else(|| env.var("AWS_ACCESS_KEY_ID")),
            secret_key: env
                .var("S3_SECRET_KEY")
                .or_else(|| env.var("AWS_SECRET_ACCESS_KEY")),
            path_style,
        }
    }

    /// Load storage settings from the process environment.
    pub fn from_env(bucket: String) -> Self {
        Self::from_source(&ProcessEnv, bucket)
    }
}
