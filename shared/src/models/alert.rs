//! Expiry alert model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BatchColor;

/// Severity of an expiry alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    /// Lot expires within the warning window
    Warning,
    /// Lot is already past its expiry date
    Critical,
}

/// A computed expiry alert for one lot
///
/// Alerts are derived on every read; nothing is stored or delivered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub lot_id: Uuid,
    pub product_name: String,
    pub batch_color: BatchColor,
    /// Days until expiry; absent for critical alerts
    pub days_remaining: Option<i64>,
    pub message_en: String,
    pub message_pt: String,
}
