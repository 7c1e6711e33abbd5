//! In-memory implementation of the record store
//!
//! Backs the integration tests and local development without a
//! database. A single mutex over both collections gives `apply_remark`
//! and `reset_all` the same both-or-neither visibility as a database
//! transaction.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use shared::{LotDraft, LotUpdate, ProductionLot, WasteDraft, WasteRecord};

use crate::error::{AppError, AppResult};

use super::ProductionStore;

#[derive(Default)]
struct Inner {
    lots: Vec<ProductionLot>,
    waste: Vec<WasteRecord>,
}

#[derive(Default)]
pub struct MemStore {
    inner: Mutex<Inner>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn materialize_lot(draft: LotDraft) -> ProductionLot {
    ProductionLot {
        id: Uuid::new_v4(),
        product_name: draft.product_name,
        batch_color: draft.batch_color,
        produced_quantity: draft.produced_quantity,
        produced_at: draft.produced_at,
        expires_at: draft.expires_at,
        remarked_at: None,
    }
}

fn apply_fields(lot: &mut ProductionLot, fields: LotUpdate) {
    if let Some(quantity) = fields.produced_quantity {
        lot.produced_quantity = quantity;
    }
    if let Some(remarked_at) = fields.remarked_at {
        lot.remarked_at = Some(remarked_at);
    }
}

#[async_trait]
impl ProductionStore for MemStore {
    async fn list_lots(&self) -> AppResult<Vec<ProductionLot>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.lots.clone())
    }

    async fn get_lot(&self, id: Uuid) -> AppResult<Option<ProductionLot>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.lots.iter().find(|lot| lot.id == id).cloned())
    }

    async fn create_lot(&self, draft: LotDraft) -> AppResult<ProductionLot> {
        let lot = materialize_lot(draft);
        let mut inner = self.inner.lock().unwrap();
        inner.lots.push(lot.clone());
        Ok(lot)
    }

    async fn update_lot(&self, id: Uuid, fields: LotUpdate) -> AppResult<ProductionLot> {
        let mut inner = self.inner.lock().unwrap();
        let lot = inner
            .lots
            .iter_mut()
            .find(|lot| lot.id == id)
            .ok_or(AppError::LotNotFound(id))?;
        apply_fields(lot, fields);
        Ok(lot.clone())
    }

    async fn list_waste(&self) -> AppResult<Vec<WasteRecord>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.waste.clone())
    }

    async fn create_waste(&self, draft: WasteDraft) -> AppResult<WasteRecord> {
        let record = WasteRecord {
            id: Uuid::new_v4(),
            product_name: draft.product_name,
            batch_color: draft.batch_color,
            wasted_quantity: draft.wasted_quantity,
            reason: draft.reason,
            source_lot_id: draft.source_lot_id,
            recorded_at: draft.recorded_at,
        };
        let mut inner = self.inner.lock().unwrap();
        inner.waste.push(record.clone());
        Ok(record)
    }

    async fn apply_remark(
        &self,
        original_id: Uuid,
        fields: LotUpdate,
        new_lot: LotDraft,
    ) -> AppResult<(ProductionLot, ProductionLot)> {
        let mut inner = self.inner.lock().unwrap();
        // Locate first so a missing lot leaves nothing half-applied
        let position = inner
            .lots
            .iter()
            .position(|lot| lot.id == original_id)
            .ok_or(AppError::LotNotFound(original_id))?;
        apply_fields(&mut inner.lots[position], fields);
        let original = inner.lots[position].clone();
        let created = materialize_lot(new_lot);
        inner.lots.push(created.clone());
        Ok((original, created))
    }

    async fn reset_all(&self) -> AppResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.lots.clear();
        inner.waste.clear();
        Ok(())
    }
}
