//! Production recording and lot listing

use std::sync::Arc;

use chrono::{Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::{
    types::{DATETIME_FORMAT, DATE_FORMAT},
    BatchColor, FreshnessStatus, LotDraft, ProductionLot,
};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::store::ProductionStore;

use super::expiry;

/// Input for recording a production event
#[derive(Debug, Deserialize)]
pub struct RecordProductionInput {
    pub product_name: String,
    pub quantity: i64,
}

/// A lot with its computed freshness view
#[derive(Debug, Clone, Serialize)]
pub struct LotView {
    #[serde(flatten)]
    pub lot: ProductionLot,
    pub days_remaining: Option<i64>,
    pub status: FreshnessStatus,
}

/// Production service for creating and reading lots
#[derive(Clone)]
pub struct ProductionService {
    store: Arc<dyn ProductionStore>,
    config: Arc<Config>,
}

impl ProductionService {
    /// Create a new ProductionService instance
    pub fn new(store: Arc<dyn ProductionStore>, config: Arc<Config>) -> Self {
        Self { store, config }
    }

    /// Record a production event as a new lot
    ///
    /// Batch color comes from the production weekday; expiry is the
    /// production date plus the configured shelf life.
    pub async fn record_production(
        &self,
        input: RecordProductionInput,
    ) -> AppResult<ProductionLot> {
        if let Err(message) = shared::validate_product_name(&input.product_name) {
            return Err(AppError::Validation {
                field: "product_name".to_string(),
                message: message.to_string(),
                message_pt: "O nome do produto não pode ser vazio".to_string(),
            });
        }
        if let Err(message) = shared::validate_produced_quantity(input.quantity) {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: message.to_string(),
                message_pt: "A quantidade produzida deve ser positiva".to_string(),
            });
        }

        let now = Utc::now();
        let today = now.date_naive();
        let expires_at = today + Duration::days(self.config.lifecycle.shelf_life_days);

        let draft = LotDraft {
            product_name: input.product_name.trim().to_string(),
            batch_color: BatchColor::from_weekday(today.weekday()),
            produced_quantity: input.quantity,
            produced_at: now.format(DATETIME_FORMAT).to_string(),
            expires_at: expires_at.format(DATE_FORMAT).to_string(),
        };

        let lot = self.store.create_lot(draft).await?;
        tracing::info!(
            lot_id = %lot.id,
            product = %lot.product_name,
            quantity = lot.produced_quantity,
            "Production recorded"
        );
        Ok(lot)
    }

    /// All lots with their computed freshness view
    pub async fn list_lots(&self) -> AppResult<Vec<LotView>> {
        let lots = self.store.list_lots().await?;
        let today = Utc::now().date_naive();
        let window = self.config.lifecycle.warning_window_days;
        Ok(lots
            .into_iter()
            .map(|lot| {
                let days = expiry::days_remaining(&lot.expires_at, today);
                LotView {
                    days_remaining: days,
                    status: expiry::classify(days, window),
                    lot,
                }
            })
            .collect())
    }

    /// One lot with its computed freshness view
    pub async fn get_lot(&self, lot_id: Uuid) -> AppResult<LotView> {
        let lot = self
            .store
            .get_lot(lot_id)
            .await?
            .ok_or(AppError::LotNotFound(lot_id))?;
        let today = Utc::now().date_naive();
        let days = expiry::days_remaining(&lot.expires_at, today);
        Ok(LotView {
            days_remaining: days,
            status: expiry::classify(days, self.config.lifecycle.warning_window_days),
            lot,
        })
    }

    /// Administrative full reset of lots and waste
    pub async fn reset_all(&self) -> AppResult<()> {
        self.store.reset_all().await?;
        tracing::warn!("All production and waste records deleted");
        Ok(())
    }
}
