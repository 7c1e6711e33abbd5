//! HTTP handlers for administrative operations

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::production::ProductionService;
use crate::AppState;

/// Delete all production and waste records
///
/// Role gating happens in the UI collaborator before this endpoint is
/// reachable.
pub async fn reset_all(State(state): State<AppState>) -> AppResult<Json<()>> {
    let service = ProductionService::new(state.store.clone(), state.config.clone());
    service.reset_all().await?;
    Ok(Json(()))
}
