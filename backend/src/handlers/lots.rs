//! HTTP handlers for production lot endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use shared::ProductionLot;

use crate::error::AppResult;
use crate::services::production::{LotView, ProductionService, RecordProductionInput};
use crate::services::remark::{RemarkInput, RemarkOutcome, RemarkService};
use crate::AppState;

/// List all lots with their freshness view
pub async fn list_lots(State(state): State<AppState>) -> AppResult<Json<Vec<LotView>>> {
    let service = ProductionService::new(state.store.clone(), state.config.clone());
    Ok(Json(service.list_lots().await?))
}

/// Record a production event
pub async fn record_production(
    State(state): State<AppState>,
    Json(input): Json<RecordProductionInput>,
) -> AppResult<Json<ProductionLot>> {
    let service = ProductionService::new(state.store.clone(), state.config.clone());
    Ok(Json(service.record_production(input).await?))
}

/// Get one lot with its freshness view
pub async fn get_lot(
    State(state): State<AppState>,
    Path(lot_id): Path<Uuid>,
) -> AppResult<Json<LotView>> {
    let service = ProductionService::new(state.store.clone(), state.config.clone());
    Ok(Json(service.get_lot(lot_id).await?))
}

/// Remark part of a lot into a new lot with extended validity
pub async fn remark_lot(
    State(state): State<AppState>,
    Path(lot_id): Path<Uuid>,
    Json(input): Json<RemarkInput>,
) -> AppResult<Json<RemarkOutcome>> {
    let service = RemarkService::new(state.store.clone(), state.config.clone());
    Ok(Json(service.remark_lot(lot_id, input).await?))
}
