//! Scraper configuration
//!
//! Runtime configuration for a scrape run, read from the environment:
//!
//! - `S3_BUCKET`: destination bucket for published tables (required)
//! - `LIFTWATCH_ENDPOINTS`: comma-separated feed URL overrides
//! - `LIFTWATCH_TIMEOUT_SECS`: per-request timeout in seconds (default: 30)
//! - `LIFTWATCH_USER_AGENT`: User-Agent header override
//!
//! All reads go through [`EnvSource`] so tests can inject values without
//! mutating the process environment.

use liftwatch_common::{LiftwatchError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lift-status feeds scraped by default.
pub const DEFAULT_ENDPOINTS: [&str; 2] = [
    "https://vicomap-cdn.resorts-interactive.com/api/maps/152",
    "https://vicomap-cdn.resorts-interactive.com/api/maps/1446",
];

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Browser User-Agent sent to the feeds; they reject obvious bot identifiers.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/139.0.0.0 Safari/537.36";

/// Name of the required destination-bucket variable.
const BUCKET_VAR: &str = "S3_BUCKET";

/// Message reported when the destination bucket is not configured.
const MISSING_BUCKET: &str = "S3_BUCKET environment variable not set";

/// Source of configuration values.
///
/// Production code reads the process environment through [`ProcessEnv`];
/// tests supply a map so runs stay hermetic.
pub trait EnvSource: Send + Sync {
    /// Look up a configuration value by name.
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads configuration from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Configuration for one scrape run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Feed URLs polled in order.
    pub endpoints: Vec<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            endpoints: DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ScrapeConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_source(&ProcessEnv)
    }

    /// Load configuration from the given source, falling back to defaults.
    pub fn from_source(env: &dyn EnvSource) -> Result<Self> {
        let mut config = Self::default();

        if let Some(endpoints) = env.var("LIFTWATCH_ENDPOINTS") {
            config.endpoints = endpoints
                .split(',')
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(timeout) = env.var("LIFTWATCH_TIMEOUT_SECS") {
            config.timeout_secs = timeout.parse().unwrap_or(DEFAULT_TIMEOUT_SECS);
        }

        if let Some(user_agent) = env.var("LIFTWATCH_USER_AGENT") {
            config.user_agent = user_agent;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.endpoints.is_empty() {
            return Err(LiftwatchError::Config(
                "at least one feed endpoint must be configured".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(LiftwatchError::Config(
                "request timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Per-request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Resolve the destination bucket.
///
/// Checked before any network activity so a misconfigured run fails fast.
/// An empty value counts as unset.
pub fn resolve_bucket(env: &dyn EnvSource) -> Result<String> {
    env.var(BUCKET_VAR)
        .filter(|bucket| !bucket.is_empty())
        .ok_or_else(|| LiftwatchError::Config(MISSING_BUCKET.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapEnv(HashMap<&'static str, &'static str>);

    impl EnvSource for MapEnv {
        fn var(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| v.to_string())
        }
    }

    fn env(pairs: &[(&'static str, &'static str)]) -> MapEnv {
        MapEnv(pairs.iter().copied().collect())
    }

    #[test]
    fn default_config_targets_both_feeds() {
        let config = ScrapeConfig::default();
        assert_eq!(config.endpoints.len(), 2);
        assert!(config.endpoints[0].ends_with("/maps/152"));
        assert!(config.endpoints[1].ends_with("/maps/1446"));
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn empty_source_yields_defaults() {
        let config = ScrapeConfig::from_source(&env(&[])).unwrap();
        assert_eq!(config.endpoints, ScrapeConfig::default().endpoints);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn endpoint_override_splits_and_trims() {
        let source = env(&[(
            "LIFTWATCH_ENDPOINTS",
            " http://one.test/a , http://two.test/b ,",
        )]);
        let config = ScrapeConfig::from_source(&source).unwrap();
        assert_eq!(
            config.endpoints,
            vec!["http://one.test/a".to_string(), "http://two.test/b".to_string()]
        );
    }

    #[test]
    fn blank_endpoint_override_is_rejected() {
        let source = env(&[("LIFTWATCH_ENDPOINTS", " , ")]);
        let err = ScrapeConfig::from_source(&source).unwrap_err();
        assert!(matches!(err, LiftwatchError::Config(_)));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let source = env(&[("LIFTWATCH_TIMEOUT_SECS", "0")]);
        assert!(ScrapeConfig::from_source(&source).is_err());
    }

    #[test]
    fn unparseable_timeout_falls_back_to_default() {
        let source = env(&[("LIFTWATCH_TIMEOUT_SECS", "soon")]);
        let config = ScrapeConfig::from_source(&source).unwrap();
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn resolve_bucket_reads_the_source() {
        let source = env(&[("S3_BUCKET", "lift-data")]);
        assert_eq!(resolve_bucket(&source).unwrap(), "lift-data");
    }

    #[test]
    fn missing_bucket_reports_exact_message() {
        let err = resolve_bucket(&env(&[])).unwrap_err();
        match err {
            LiftwatchError::Config(message) => {
                assert_eq!(message, "S3_BUCKET environment variable not set");
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn empty_bucket_counts_as_unset() {
        let source = env(&[("S3_BUCKET", "")]);
        assert!(resolve_bucket(&source).is_err());
    }
}
