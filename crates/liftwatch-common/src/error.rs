//! Error types for liftwatch

use thiserror::Error;

/// Result type alias for liftwatch operations
pub type Result<T> = std::result::Result<T, LiftwatchError>;

/// Failure categories that end a scrape run.
///
/// Per-endpoint fetch and parse problems never reach this level; the
/// collector recovers them one endpoint at a time. Anything that does
/// surface here is fatal to the run and gets folded into the uniform
/// run result at the coordinator.
#[derive(Error, Debug)]
pub enum LiftwatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_category_prefix() {
        let err = LiftwatchError::Config("S3_BUCKET environment variable not set".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: S3_BUCKET environment variable not set"
        );

        let err = LiftwatchError::Storage("upload rejected".to_string());
        assert_eq!(err.to_string(), "Storage error: upload rejected");
    }
}
