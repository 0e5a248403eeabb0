//! Run coordination
//!
//! The externally triggered entry point. One invocation resolves
//! configuration, collects the feeds, publishes both tables under a single
//! run timestamp, and folds every failure mode into a uniform
//! status-and-message result. Nothing escapes [`handle`]; the scheduler
//! only ever sees a [`RunResult`].

use crate::collector::LiftCollector;
use crate::config::{self, EnvSource, ProcessEnv, ScrapeConfig};
use crate::storage::{self, Storage, StorageConfig};
use crate::version;
use chrono::Utc;
use liftwatch_common::{LiftwatchError, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Execution context of one invocation. Opaque to the run itself and only
/// recorded in the trail.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub request_id: Uuid,
}

impl RunContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
        }
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl RunResult {
    /// A completed run.
    pub fn success(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
        }
    }

    /// A failed run.
    pub fn failure(body: impl Into<String>) -> Self {
        Self {
            status_code: 500,
            body: body.into(),
        }
    }

    /// True when the run completed.
    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

/// Handle one scheduled invocation end to end.
///
/// The trigger payload and context are accepted for the run trail and
/// otherwise ignored. This function never fails; every outcome, including
/// a panic in the scrape phase, comes back as a [`RunResult`].
pub async fn handle(event: Value, ctx: &RunContext) -> RunResult {
    handle_with_env(event, ctx, &ProcessEnv).await
}

/// [`handle`] with an injected configuration source.
pub async fn handle_with_env(event: Value, ctx: &RunContext, env: &dyn EnvSource) -> RunResult {
    let version = version::resolve();
    info!("Scraper version {}", version);
    debug!(request_id = %ctx.request_id, "Trigger payload: {}", event);

    // The bucket gates everything; resolve it before any network activity.
    let bucket = match config::resolve_bucket(env) {
        Ok(bucket) => bucket,
        Err(err) => {
            let message = match err {
                LiftwatchError::Config(message) => message,
                other => other.to_string(),
            };
            error!("{}", message);
            return RunResult::failure(message);
        }
    };

    match run(bucket.clone(), env).await {
        Ok(lift_count) => {
            let message = format!(
                "Scraper completed. Uploaded {} lifts to s3://{}/data/",
                lift_count, bucket
            );
            info!("{}", message);
            RunResult::success(message)
        }
        Err(err) => {
            let message = format!("Scraper failed: {}", err);
            error!("{}", message);
            RunResult::failure(message)
        }
    }
}

/// The fallible phase of a run.
///
/// Configuration is resolved up front; the networked phase then runs in
/// its own task so even a panic surfaces as a failed run instead of
/// tearing down the invoker.
async fn run(bucket: String, env: &dyn EnvSource) -> Result<usize> {
    let scrape_config = ScrapeConfig::from_source(env)?;
    let storage_config = StorageConfig::from_source(env, bucket);

    match tokio::spawn(scrape_and_publish(scrape_config, storage_config)).await {
        Ok(result) => result,
        Err(err) => Err(LiftwatchError::Unknown(err.to_string())),
    }
}

/// Collect all feeds, then publish both tables under one timestamp.
async fn scrape_and_publish(
    scrape_config: ScrapeConfig,
    storage_config: StorageConfig,
) -> Result<usize> {
    let timestamp = storage::run_timestamp(Utc::now());

    info!("Starting scrape...");
    let collector = LiftCollector::new(scrape_config)?;
    let (tables, outcomes) = collector.collect().await;

    let succeeded = outcomes.iter().filter(|o| o.is_ok()).count();
    info!(
        "Collected {} lifts from {}/{} endpoints",
        tables.len(),
        succeeded,
        outcomes.len()
    );

    let storage = Storage::new(storage_config).await;

    let status_csv = tables.status_csv()?;
    storage
        .publish_csv(&storage::status_key(&timestamp), status_csv)
        .await?;

    let wait_time_csv = tables.wait_time_csv()?;
    storage
        .publish_csv(&storage::wait_time_key(&timestamp), wait_time_csv)
        .await?;

    Ok(tables.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_and_failure_codes() {
        assert_eq!(RunResult::success("done").status_code, 200);
        assert!(RunResult::success("done").is_success());
        assert_eq!(RunResult::failure("boom").status_code, 500);
        assert!(!RunResult::failure("boom").is_success());
    }

    #[test]
    fn serializes_with_camel_case_status_field() {
        let json = serde_json::to_string(&RunResult::success("done")).unwrap();
        assert_eq!(json, r#"{"statusCode":200,"body":"done"}"#);
    }

    #[test]
    fn contexts_get_distinct_request_ids() {
        assert_ne!(RunContext::new().request_id, RunContext::new().request_id);
    }
}
