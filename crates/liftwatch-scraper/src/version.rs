//! Deployment version marker

use std::path::Path;

/// Default marker location, adjacent to the deployment unit.
const VERSION_FILE: &str = "VERSION";

/// Fallback when the marker cannot be read.
const UNKNOWN_VERSION: &str = "unknown";

/// Read the deployment version from the adjacent marker file.
///
/// An unreadable marker is never fatal; it reports as "unknown".
pub fn resolve() -> String {
    resolve_from(Path::new(VERSION_FILE))
}

/// Read the version marker at `path`, trimmed.
pub fn resolve_from(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(contents) => contents.trim().to_string(),
        Err(_) => UNKNOWN_VERSION.to_string(),
    }
}
