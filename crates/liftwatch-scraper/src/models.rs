//! Lift data models
//!
//! Wire shapes of the resort feeds and the two flattened row types the
//! scraper publishes. Normalization is pure: missing fields are defaulted,
//! reported values pass through untouched.

use liftwatch_common::{LiftwatchError, Result};
use serde::{Deserialize, Serialize};

/// Default for a lift name or status the feed omitted.
const UNKNOWN: &str = "Unknown";

/// Sentinel for an omitted wait time.
const NO_WAIT: &str = "N/A";

/// Response envelope of one lift-status feed.
///
/// A response without a `lifts` key is a valid empty feed, not an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub lifts: Vec<LiftRecord>,
}

/// One lift as reported by a feed. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiftRecord {
    pub name: Option<String>,
    pub status: Option<String>,
    pub wait_time: Option<WaitTime>,
}

/// Reported wait: whole minutes or a free-form marker such as `"N/A"`.
///
/// Values pass through as reported; nothing coerces text to numbers or
/// back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WaitTime {
    Minutes(i64),
    Text(String),
}

impl std::fmt::Display for WaitTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaitTime::Minutes(minutes) => write!(f, "{}", minutes),
            WaitTime::Text(text) => write!(f, "{}", text),
        }
    }
}

impl LiftRecord {
    /// Flatten into one row per table, defaulting whatever the feed left out.
    pub fn normalize(&self) -> (StatusRow, WaitTimeRow) {
        let name = self.name.clone().unwrap_or_else(|| UNKNOWN.to_string());
        let status = self.status.clone().unwrap_or_else(|| UNKNOWN.to_string());
        let wait_time = self
            .wait_time
            .clone()
            .unwrap_or_else(|| WaitTime::Text(NO_WAIT.to_string()));

        (
            StatusRow {
                lift: name.clone(),
                status,
            },
            WaitTimeRow {
                lift: name,
                wait_time,
            },
        )
    }
}

/// Row of the status table (`Lift,Status`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusRow {
    pub lift: String,
    pub status: String,
}

impl StatusRow {
    /// Column header of the status table.
    pub const HEADER: [&'static str; 2] = ["Lift", "Status"];
}

/// Row of the wait-time table (`Lift,Wait Time`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaitTimeRow {
    pub lift: String,
    pub wait_time: WaitTime,
}

impl WaitTimeRow {
    /// Column header of the wait-time table.
    pub const HEADER: [&'static str; 2] = ["Lift", "Wait Time"];
}

/// The two tables accumulated across feeds.
///
/// Rows are pushed in pairs, so both tables always hold the same lifts in
/// the same order.
#[derive(Debug, Clone, Default)]
pub struct LiftTables {
    pub status_rows: Vec<StatusRow>,
    pub wait_time_rows: Vec<WaitTimeRow>,
}

impl LiftTables {
    /// Append one lift to both tables.
    pub fn push(&mut self, status: StatusRow, wait_time: WaitTimeRow) {
        self.status_rows.push(status);
        self.wait_time_rows.push(wait_time);
    }

    /// Number of lifts collected.
    pub fn len(&self) -> usize {
        self.status_rows.len()
    }

    /// True when no endpoint contributed any rows.
    pub fn is_empty(&self) -> bool {
        self.status_rows.is_empty()
    }

    /// Render the status table as CSV.
    pub fn status_csv(&self) -> Result<Vec<u8>> {
        write_csv(StatusRow::HEADER, &self.status_rows)
    }

    /// Render the wait-time table as CSV.
    pub fn wait_time_csv(&self) -> Result<Vec<u8>> {
        write_csv(WaitTimeRow::HEADER, &self.wait_time_rows)
    }
}

/// Serialize rows to an in-memory CSV document.
///
/// The header is written explicitly so an empty table still renders as a
/// header-only document.
fn write_csv<S: Serialize>(header: [&str; 2], rows: &[S]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(header)
        .map_err(|e| LiftwatchError::Csv(e.to_string()))?;

    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| LiftwatchError::Csv(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| LiftwatchError::Csv(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: Option<&str>, status: Option<&str>, wait_time: Option<WaitTime>) -> LiftRecord {
        LiftRecord {
            name: name.map(String::from),
            status: status.map(String::from),
            wait_time,
        }
    }

    #[test]
    fn feed_without_lifts_key_is_empty() {
        let feed: FeedResponse = serde_json::from_str("{}").unwrap();
        assert!(feed.lifts.is_empty());
    }

    #[test]
    fn unknown_feed_fields_are_ignored() {
        let feed: FeedResponse = serde_json::from_str(
            r#"{"mapId": 152, "lifts": [{"name": "Summit", "status": "Open", "waitTime": 5, "openTime": "09:00"}]}"#,
        )
        .unwrap();
        assert_eq!(feed.lifts.len(), 1);
        assert_eq!(feed.lifts[0].name.as_deref(), Some("Summit"));
        assert_eq!(feed.lifts[0].wait_time, Some(WaitTime::Minutes(5)));
    }

    #[test]
    fn null_fields_deserialize_as_missing() {
        let record: LiftRecord =
            serde_json::from_str(r#"{"name": null, "status": null, "waitTime": null}"#).unwrap();
        assert_eq!(record, LiftRecord::default());
    }

    #[test]
    fn wait_time_accepts_minutes_and_text() {
        let minutes: WaitTime = serde_json::from_str("12").unwrap();
        assert_eq!(minutes, WaitTime::Minutes(12));

        let text: WaitTime = serde_json::from_str(r#""N/A""#).unwrap();
        assert_eq!(text, WaitTime::Text("N/A".to_string()));
    }

    #[test]
    fn normalize_defaults_missing_fields() {
        let (status, wait) = LiftRecord::default().normalize();
        assert_eq!(status.lift, "Unknown");
        assert_eq!(status.status, "Unknown");
        assert_eq!(wait.lift, "Unknown");
        assert_eq!(wait.wait_time, WaitTime::Text("N/A".to_string()));
    }

    #[test]
    fn normalize_passes_reported_values_through() {
        let (status, wait) = record(
            Some("Summit Express"),
            Some("On Hold"),
            Some(WaitTime::Minutes(0)),
        )
        .normalize();
        assert_eq!(status.lift, "Summit Express");
        assert_eq!(status.status, "On Hold");
        assert_eq!(wait.wait_time, WaitTime::Minutes(0));
    }

    #[test]
    fn normalize_is_pure() {
        let raw = record(Some("Ridge"), None, Some(WaitTime::Text("closed".into())));
        assert_eq!(raw.normalize(), raw.normalize());
    }

    #[test]
    fn empty_tables_render_header_only_csv() {
        let tables = LiftTables::default();
        assert_eq!(tables.status_csv().unwrap(), b"Lift,Status\n");
        assert_eq!(tables.wait_time_csv().unwrap(), b"Lift,Wait Time\n");
    }

    #[test]
    fn csv_renders_one_line_per_lift() {
        let mut tables = LiftTables::default();
        let (status, wait) = record(Some("A"), Some("Open"), Some(WaitTime::Minutes(5))).normalize();
        tables.push(status, wait);
        let (status, wait) = record(Some("B"), Some("Closed"), None).normalize();
        tables.push(status, wait);

        assert_eq!(
            String::from_utf8(tables.status_csv().unwrap()).unwrap(),
            "Lift,Status\nA,Open\nB,Closed\n"
        );
        assert_eq!(
            String::from_utf8(tables.wait_time_csv().unwrap()).unwrap(),
            "Lift,Wait Time\nA,5\nB,N/A\n"
        );
    }

    #[test]
    fn csv_quotes_embedded_delimiters() {
        let mut tables = LiftTables::default();
        let (status, wait) = record(Some("Summit, East"), Some("Open"), None).normalize();
        tables.push(status, wait);

        let csv = String::from_utf8(tables.status_csv().unwrap()).unwrap();
        assert_eq!(csv, "Lift,Status\n\"Summit, East\",Open\n");
    }

    #[test]
    fn tables_keep_row_pairing() {
        let mut tables = LiftTables::default();
        for name in ["one", "two", "three"] {
            let (status, wait) = record(Some(name), None, None).normalize();
            tables.push(status, wait);
        }
        assert_eq!(tables.len(), 3);
        assert_eq!(tables.status_rows[1].lift, tables.wait_time_rows[1].lift);
    }
}
