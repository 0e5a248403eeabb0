//! Live feed probe
//!
//! Fetches the real configured feeds and prints both tables to stdout.
//! Nothing is uploaded; useful for checking feed health and field drift.
//!
//! Usage: cargo run --bin scrape_live

use anyhow::Result;
use liftwatch_common::logging::{init_logging, LogConfig, LogLevel};
use liftwatch_scraper::collector::LiftCollector;
use liftwatch_scraper::config::ScrapeConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging(&LogConfig::builder().level(LogLevel::Debug).build())?;

    let config = ScrapeConfig::from_env()?;
    let collector = LiftCollector::new(config)?;
    let (tables, outcomes) = collector.collect().await;

    println!();
    for outcome in &outcomes {
        match &outcome.result {
            Ok(count) => println!("{} -> {} lifts", outcome.endpoint, count),
            Err(err) => println!("{} -> FAILED: {}", outcome.endpoint, err),
        }
    }

    println!();
    println!("{:<40} {}", "Lift", "Status");
    for row in &tables.status_rows {
        println!("{:<40} {}", row.lift, row.status);
    }

    println!();
    println!("{:<40} {}", "Lift", "Wait Time");
    for row in &tables.wait_time_rows {
        println!("{:<40} {}", row.lift, row.wait_time);
    }

    Ok(())
}
