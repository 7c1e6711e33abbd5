//! Common types used across the system

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Freshness classification of a production lot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreshnessStatus {
    Fresh,
    NearExpiry,
    Expired,
    /// Expiry date missing or unparseable
    Unknown,
}

impl FreshnessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FreshnessStatus::Fresh => "fresh",
            FreshnessStatus::NearExpiry => "near_expiry",
            FreshnessStatus::Expired => "expired",
            FreshnessStatus::Unknown => "unknown",
        }
    }
}

/// Timestamp format written by this system
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date-only format used for expiry dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date from the loosely formatted strings the record store holds
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and the `T`-separated
/// ISO form (with or without fractional seconds). Anything else yields
/// `None` — the caller treats that as "unknown", never as a failure.
pub fn parse_flexible_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    for format in [DATETIME_FORMAT, "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Date range for stock queries (both ends inclusive)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
