use chrono::{DateTime, NaiveDateTime};

/// Display class for a call status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Open,
    Closed,
    InProgress,
}

impl StatusClass {
    /// Case-insensitive substring match. Anything unrecognised counts as open.
    pub fn from_status(status: &str) -> Self {
        let lower = status.to_lowercase();
        if lower.contains("open") {
            StatusClass::Open
        } else if lower.contains("closed") {
            StatusClass::Closed
        } else if lower.contains("progress") {
            StatusClass::InProgress
        } else {
            StatusClass::Open
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusClass::Open => "status-open",
            StatusClass::Closed => "status-closed",
            StatusClass::InProgress => "status-in-progress",
        }
    }
}

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// Postgres-style timestamps with a short offset, e.g. `2024-05-01 14:23:00+00`.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%#z", "%Y-%m-%d %H:%M:%S%.f%#z"];

/// Formats a request timestamp as `May 1, 2024, 02:23 PM`.
///
/// Returns the input unchanged when it is not a recognised timestamp.
pub fn format_requested(raw: &str) -> String {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .ok()
        .or_else(|| {
            OFFSET_FORMATS
                .iter()
                .find_map(|f| DateTime::parse_from_str(raw, f).ok())
                .map(|dt| dt.naive_local())
        })
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
        });

    match parsed {
        Some(dt) => dt.format("%b %-d, %Y, %I:%M %p").to_string(),
        None => raw.to_string(),
    }
}
