//! Record-store collaborator for production lots and waste entries
//!
//! The core never assumes server-side filtering or multi-record
//! atomicity beyond what this trait promises: `apply_remark` is the one
//! call that must persist two records together or not at all.

use async_trait::async_trait;
use shared::{LotDraft, LotUpdate, ProductionLot, WasteDraft, WasteRecord};
use uuid::Uuid;

use crate::error::AppResult;

mod memory;
mod postgres;

pub use memory::MemStore;
pub use postgres::PgStore;

#[async_trait]
pub trait ProductionStore: Send + Sync {
    /// Full read of all production lots
    async fn list_lots(&self) -> AppResult<Vec<ProductionLot>>;

    /// Fetch a single lot, `None` when the id is unknown
    async fn get_lot(&self, id: Uuid) -> AppResult<Option<ProductionLot>>;

    /// Persist a new lot; the store assigns the id
    async fn create_lot(&self, draft: LotDraft) -> AppResult<ProductionLot>;

    /// Apply field updates to an existing lot
    async fn update_lot(&self, id: Uuid, fields: LotUpdate) -> AppResult<ProductionLot>;

    /// Full read of all waste records
    async fn list_waste(&self) -> AppResult<Vec<WasteRecord>>;

    /// Persist an approved waste draft
    async fn create_waste(&self, draft: WasteDraft) -> AppResult<WasteRecord>;

    /// Persist a remark split: update the original lot and insert the
    /// split-off lot, both writes visible together or neither
    async fn apply_remark(
        &self,
        original_id: Uuid,
        fields: LotUpdate,
        new_lot: LotDraft,
    ) -> AppResult<(ProductionLot, ProductionLot)>;

    /// Administrative full reset: deletes every lot and waste record
    async fn reset_all(&self) -> AppResult<()>;
}
