//! Waste recording with available-stock validation

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use shared::{types::DATETIME_FORMAT, ProductionLot, WasteDraft, WasteRecord};

use crate::error::{AppError, AppResult};
use crate::store::ProductionStore;

use super::stock;

/// Input for recording a waste event
#[derive(Debug, Deserialize)]
pub struct RecordWasteInput {
    pub lot_id: Uuid,
    pub wasted_quantity: i64,
    pub reason: String,
}

/// Validate a waste posting against the lot's remaining quantity
///
/// On success returns an approved draft; persisting it is the caller's
/// job, so a rejected posting can never leave a partial record behind.
pub fn validate_waste(
    lot: &ProductionLot,
    already_wasted: i64,
    wasted_quantity: i64,
    reason: &str,
    recorded_at: String,
) -> AppResult<WasteDraft> {
    if let Err(message) = shared::validate_wasted_quantity(wasted_quantity) {
        return Err(AppError::Validation {
            field: "wasted_quantity".to_string(),
            message: message.to_string(),
            message_pt: "A quantidade desperdiçada deve ser positiva".to_string(),
        });
    }

    let available = lot.produced_quantity - already_wasted;
    if wasted_quantity > available {
        return Err(AppError::InsufficientStock {
            requested: wasted_quantity,
            available,
        });
    }

    Ok(WasteDraft {
        product_name: lot.product_name.clone(),
        batch_color: lot.batch_color,
        wasted_quantity,
        reason: reason.to_string(),
        source_lot_id: lot.id,
        recorded_at,
    })
}

/// Waste service for recording and listing waste events
#[derive(Clone)]
pub struct WasteService {
    store: Arc<dyn ProductionStore>,
}

impl WasteService {
    /// Create a new WasteService instance
    pub fn new(store: Arc<dyn ProductionStore>) -> Self {
        Self { store }
    }

    /// Validate and persist a waste event against a lot
    pub async fn record_waste(&self, input: RecordWasteInput) -> AppResult<WasteRecord> {
        let lot = self
            .store
            .get_lot(input.lot_id)
            .await?
            .ok_or(AppError::LotNotFound(input.lot_id))?;

        let waste = self.store.list_waste().await?;
        let already_wasted = stock::wasted_by_lot(&waste)
            .get(&lot.id)
            .copied()
            .unwrap_or(0);

        let recorded_at = Utc::now().format(DATETIME_FORMAT).to_string();
        let draft = validate_waste(
            &lot,
            already_wasted,
            input.wasted_quantity,
            &input.reason,
            recorded_at,
        )?;

        let record = self.store.create_waste(draft).await?;
        tracing::info!(
            lot_id = %lot.id,
            quantity = record.wasted_quantity,
            "Waste recorded"
        );
        Ok(record)
    }

    /// Full read of all waste records
    pub async fn list_waste(&self) -> AppResult<Vec<WasteRecord>> {
        self.store.list_waste().await
    }
}
