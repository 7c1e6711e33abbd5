//! Expiry alert generation

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use shared::{Alert, AlertSeverity, FreshnessStatus, ProductionLot};

use crate::config::Config;
use crate::error::AppResult;
use crate::store::ProductionStore;

use super::expiry;

/// Scan all lots and emit one alert per near-expiry or expired lot
///
/// Pure computation over the caller's collection; input order is
/// preserved and nothing is mutated or stored.
pub fn generate_alerts(
    lots: &[ProductionLot],
    today: NaiveDate,
    warning_window_days: i64,
) -> Vec<Alert> {
    let mut alerts = Vec::new();
    for lot in lots {
        let days = expiry::days_remaining(&lot.expires_at, today);
        match expiry::classify(days, warning_window_days) {
            FreshnessStatus::NearExpiry => {
                if let Some(days) = days {
                    alerts.push(Alert {
                        severity: AlertSeverity::Warning,
                        lot_id: lot.id,
                        product_name: lot.product_name.clone(),
                        batch_color: lot.batch_color,
                        days_remaining: Some(days),
                        message_en: format!(
                            "{} ({}) expires in {} day(s)",
                            lot.product_name, lot.batch_color, days
                        ),
                        message_pt: format!(
                            "{} ({}) vence em {} dia(s)",
                            lot.product_name, lot.batch_color, days
                        ),
                    });
                }
            }
            FreshnessStatus::Expired => {
                alerts.push(Alert {
                    severity: AlertSeverity::Critical,
                    lot_id: lot.id,
                    product_name: lot.product_name.clone(),
                    batch_color: lot.batch_color,
                    days_remaining: None,
                    message_en: format!("{} ({}) has EXPIRED", lot.product_name, lot.batch_color),
                    message_pt: format!("{} ({}) VENCIDO!", lot.product_name, lot.batch_color),
                });
            }
            FreshnessStatus::Fresh | FreshnessStatus::Unknown => {}
        }
    }
    alerts
}

/// Alert service for the notification panel
#[derive(Clone)]
pub struct AlertService {
    store: Arc<dyn ProductionStore>,
    config: Arc<Config>,
}

impl AlertService {
    /// Create a new AlertService instance
    pub fn new(store: Arc<dyn ProductionStore>, config: Arc<Config>) -> Self {
        Self { store, config }
    }

    /// Compute the current alert feed
    pub async fn current_alerts(&self) -> AppResult<Vec<Alert>> {
        let lots = self.store.list_lots().await?;
        let today = Utc::now().date_naive();
        Ok(generate_alerts(
            &lots,
            today,
            self.config.lifecycle.warning_window_days,
        ))
    }
}
