//! HTTP client for lift-status feeds
//!
//! One request per feed, no retries. The feeds occasionally answer slowly
//! or with junk; the client reports a typed error and leaves the policy to
//! the collector.

use crate::config::ScrapeConfig;
use crate::models::{FeedResponse, LiftRecord};
use liftwatch_common::{LiftwatchError, Result};
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

/// Result type for single-feed fetches
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Failure fetching one feed.
///
/// The collector recovers these endpoint by endpoint; they are never fatal
/// to a run.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request produced no response (connect failure, timeout, TLS).
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The feed answered with a non-success status code.
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    /// The response body was not the expected JSON shape.
    #[error("invalid feed payload from {endpoint}: {source}")]
    Parse {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Client for the resort lift feeds.
///
/// Sends a browser User-Agent (the feeds reject obvious bot identifiers)
/// and enforces the configured per-request timeout.
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    /// Build a client from scrape configuration.
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| LiftwatchError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Fetch and parse one feed.
    ///
    /// A response without a `lifts` key yields an empty list, which is a
    /// successful fetch.
    pub async fn fetch(&self, endpoint: &str) -> FetchResult<Vec<LiftRecord>> {
        debug!("Fetching {}", endpoint);

        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint: endpoint.to_string(),
                status,
            });
        }

        let feed: FeedResponse = response.json().await.map_err(|source| FetchError::Parse {
            endpoint: endpoint.to_string(),
            source,
        })?;

        debug!("Fetched {} lifts from {}", feed.lifts.len(), endpoint);
        Ok(feed.lifts)
    }
}
