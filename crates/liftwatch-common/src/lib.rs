//! Liftwatch Common Library
//!
//! Shared error types and logging setup used across the liftwatch
//! workspace. Binaries initialize logging through [`logging::init_logging`];
//! fatal run errors funnel through [`error::LiftwatchError`].

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod error;
pub mod logging;

pub use error::{LiftwatchError, Result};
