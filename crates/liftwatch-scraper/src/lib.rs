//! Liftwatch Scraper Library
//!
//! Polls ski-resort lift-status feeds, normalizes each lift into status and
//! wait-time rows, and publishes both tables as timestamped CSV objects in
//! S3. Designed to run as a short scheduled job: one invocation is one
//! scrape-and-publish cycle.
//!
//! # Architecture
//!
//! - **config**: run configuration from `LIFTWATCH_*` / `S3_*` variables
//! - **models**: feed wire shapes and the two flattened tables
//! - **client**: HTTP client for a single feed
//! - **collector**: fans out across feeds, isolating per-endpoint failures
//! - **storage**: S3 publisher and timestamped object keys
//! - **handler**: the externally triggered run coordinator
//! - **version**: deployment version marker

pub mod client;
pub mod collector;
pub mod config;
pub mod handler;
pub mod models;
pub mod storage;
pub mod version;

pub use collector::{EndpointOutcome, LiftCollector};
pub use config::{EnvSource, ProcessEnv, ScrapeConfig};
pub use handler::{handle, RunContext, RunResult};
pub use models::{LiftRecord, LiftTables, StatusRow, WaitTime, WaitTimeRow};
pub use storage::{Storage, StorageConfig};
