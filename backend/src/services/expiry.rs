//! Freshness classification of production lots

use chrono::NaiveDate;

use shared::{parse_flexible_date, FreshnessStatus, ProductionLot};

/// Days until expiry, `None` when the expiry date cannot be parsed
pub fn days_remaining(expires_at: &str, today: NaiveDate) -> Option<i64> {
    parse_flexible_date(expires_at).map(|expiry| (expiry - today).num_days())
}

/// Classify days-remaining into a freshness status
///
/// Precedence: unknown, then expired, then near-expiry, then fresh.
/// Day 0 ("expires today") is the last near-expiry day, not yet expired.
pub fn classify(days_remaining: Option<i64>, warning_window_days: i64) -> FreshnessStatus {
    match days_remaining {
        None => FreshnessStatus::Unknown,
        Some(days) if days < 0 => FreshnessStatus::Expired,
        Some(days) if days <= warning_window_days => FreshnessStatus::NearExpiry,
        Some(_) => FreshnessStatus::Fresh,
    }
}

/// Classify a lot directly from its stored expiry string
pub fn classify_lot(
    lot: &ProductionLot,
    today: NaiveDate,
    warning_window_days: i64,
) -> FreshnessStatus {
    classify(days_remaining(&lot.expires_at, today), warning_window_days)
}
