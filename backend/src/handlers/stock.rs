//! HTTP handlers for the stock panel

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use shared::DateRange;

use crate::error::AppResult;
use crate::services::stock::{ProductStock, StockQuery, StockReport, StockService};
use crate::AppState;

/// Query parameters for the stock report
#[derive(Debug, Deserialize)]
pub struct StockQueryParams {
    /// Start of the production-date filter (inclusive)
    pub from: Option<NaiveDate>,
    /// End of the production-date filter (inclusive)
    pub to: Option<NaiveDate>,
    pub product: Option<String>,
    pub search: Option<String>,
}

impl From<StockQueryParams> for StockQuery {
    fn from(params: StockQueryParams) -> Self {
        let produced = match (params.from, params.to) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            _ => None,
        };
        StockQuery {
            produced,
            product: params.product,
            search: params.search,
        }
    }
}

/// Per-lot stock report with grand totals
pub async fn stock_report(
    State(state): State<AppState>,
    Query(params): Query<StockQueryParams>,
) -> AppResult<Json<StockReport>> {
    let service = StockService::new(state.store.clone(), state.config.clone());
    Ok(Json(service.stock_report(&params.into()).await?))
}

/// Stock aggregated per product
pub async fn product_summary(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProductStock>>> {
    let service = StockService::new(state.store.clone(), state.config.clone());
    Ok(Json(service.product_summary().await?))
}
