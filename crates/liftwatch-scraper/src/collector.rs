//! Feed collection across endpoints
//!
//! Fetches every configured feed and merges the rows into the run tables.
//! Endpoint failures are isolated: each one is logged, recorded in the
//! outcome list, and the remaining feeds still contribute. A run where
//! every endpoint fails is still a successful (empty) collection.

use crate::client::{FeedClient, FetchResult};
use crate::config::ScrapeConfig;
use crate::models::{LiftRecord, LiftTables};
use futures::future::join_all;
use liftwatch_common::Result;
use tracing::{info, warn};

/// What one endpoint contributed to a run: its lift count, or the error
/// that skipped it.
#[derive(Debug)]
pub struct EndpointOutcome {
    pub endpoint: String,
    pub result: FetchResult<usize>,
}

impl EndpointOutcome {
    /// True when the endpoint contributed rows.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Drives the feed client across all configured endpoints.
pub struct LiftCollector {
    config: ScrapeConfig,
    client: FeedClient,
}

impl LiftCollector {
    /// Build a collector and its HTTP client from configuration.
    pub fn new(config: ScrapeConfig) -> Result<Self> {
        let client = FeedClient::new(&config)?;
        Ok(Self { config, client })
    }

    /// Fetch every configured endpoint and merge the rows.
    ///
    /// Fetches run concurrently. `join_all` preserves input order and the
    /// merge is sequential, so rows land in endpoint order regardless of
    /// which response arrived first.
    pub async fn collect(&self) -> (LiftTables, Vec<EndpointOutcome>) {
        let fetches = self
            .config
            .endpoints
            .iter()
            .map(|endpoint| self.client.fetch(endpoint));
        let results = join_all(fetches).await;

        let fetched: Vec<(String, FetchResult<Vec<LiftRecord>>)> =
            self.config.endpoints.iter().cloned().zip(results).collect();

        Self::merge(fetched)
    }

    /// Fold per-endpoint fetch results into the two tables.
    ///
    /// This is the continue-on-failure policy in one place: an error is
    /// logged, recorded, and the loop moves on to the next endpoint.
    fn merge(
        results: Vec<(String, FetchResult<Vec<LiftRecord>>)>,
    ) -> (LiftTables, Vec<EndpointOutcome>) {
        let mut tables = LiftTables::default();
        let mut outcomes = Vec::with_capacity(results.len());

        for (endpoint, result) in results {
            match result {
                Ok(lifts) => {
                    for record in &lifts {
                        let (status_row, wait_row) = record.normalize();
                        info!(
                            "Lift: {}, Status: {}, Wait Time: {} minutes",
                            status_row.lift, status_row.status, wait_row.wait_time
                        );
                        tables.push(status_row, wait_row);
                    }
                    outcomes.push(EndpointOutcome {
                        endpoint,
                        result: Ok(lifts.len()),
                    });
                }
                Err(err) => {
                    warn!("Error fetching data from {}: {}", endpoint, err);
                    outcomes.push(EndpointOutcome {
                        endpoint,
                        result: Err(err),
                    });
                }
            }
        }

        if tables.is_empty() {
            warn!("No lift data collected from any endpoint");
        }

        (tables, outcomes)
    }
}
