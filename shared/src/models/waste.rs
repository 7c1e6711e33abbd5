//! Waste record model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BatchColor;

/// A waste event recorded against a production lot
///
/// Product name and batch color are denormalized from the source lot at
/// creation time so reports survive the lot itself. Waste records are
/// append-only; they are never edited and only the administrative full
/// reset removes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WasteRecord {
    pub id: Uuid,
    pub product_name: String,
    pub batch_color: BatchColor,
    pub wasted_quantity: i64,
    pub reason: String,
    pub source_lot_id: Uuid,
    pub recorded_at: String,
}

/// Approved waste draft, ready for the record store to persist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WasteDraft {
    pub product_name: String,
    pub batch_color: BatchColor,
    pub wasted_quantity: i64,
    pub reason: String,
    pub source_lot_id: Uuid,
    pub recorded_at: String,
}
