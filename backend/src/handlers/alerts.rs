//! HTTP handlers for the alert feed

use axum::{extract::State, Json};

use shared::Alert;

use crate::error::AppResult;
use crate::services::alert::AlertService;
use crate::AppState;

/// Current expiry alerts for the notification panel
pub async fn list_alerts(State(state): State<AppState>) -> AppResult<Json<Vec<Alert>>> {
    let service = AlertService::new(state.store.clone(), state.config.clone());
    Ok(Json(service.current_alerts().await?))
}
