//! HTTP handlers for waste endpoints

use axum::{extract::State, Json};

use shared::WasteRecord;

use crate::error::AppResult;
use crate::services::waste::{RecordWasteInput, WasteService};
use crate::AppState;

/// List all waste records
pub async fn list_waste(State(state): State<AppState>) -> AppResult<Json<Vec<WasteRecord>>> {
    let service = WasteService::new(state.store.clone());
    Ok(Json(service.list_waste().await?))
}

/// Record a waste event against a lot
pub async fn record_waste(
    State(state): State<AppState>,
    Json(input): Json<RecordWasteInput>,
) -> AppResult<Json<WasteRecord>> {
    let service = WasteService::new(state.store.clone());
    Ok(Json(service.record_waste(input).await?))
}
