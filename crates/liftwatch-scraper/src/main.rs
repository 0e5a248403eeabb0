//! Liftwatch Scraper CLI
//!
//! Scheduled entry point for the lift-status scraper. A cron wrapper or
//! function platform shim invokes `run`; the terminal result is printed as
//! JSON and mirrored in the exit code.

use anyhow::Result;
use clap::{Parser, Subcommand};
use liftwatch_common::logging::{init_logging, LogConfig, LogLevel};
use liftwatch_scraper::handler::{self, RunContext};
use tracing::info;

#[derive(Parser)]
#[command(name = "liftwatch-scraper")]
#[command(version, about = "Ski-lift status scraper", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one scrape-and-publish cycle and print the result
    Run {
        /// Trigger payload as JSON; recorded in the run trail, otherwise ignored
        #[arg(short, long)]
        event: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env().unwrap_or_default();
    if cli.verbose {
        log_config.level = LogLevel::Debug;
    }
    init_logging(&log_config)?;

    match cli.command {
        Commands::Run { event } => {
            let payload = match event {
                Some(raw) => serde_json::from_str(&raw)?,
                None => serde_json::Value::Null,
            };

            let ctx = RunContext::new();
            info!(request_id = %ctx.request_id, "Run triggered");

            let result = handler::handle(payload, &ctx).await;
            println!("{}", serde_json::to_string(&result)?);

            if !result.is_success() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
