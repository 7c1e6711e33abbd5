//! Route definitions for the Production & Waste Control API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Production lots and remarking
        .nest("/lots", lot_routes())
        // Waste recording
        .nest("/waste", waste_routes())
        // Stock panel
        .nest("/stock", stock_routes())
        // Alert feed
        .route("/alerts", get(handlers::list_alerts))
        // Administrative operations
        .nest("/admin", admin_routes())
}

/// Production lot routes
fn lot_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_lots).post(handlers::record_production))
        .route("/:lot_id", get(handlers::get_lot))
        .route("/:lot_id/remark", post(handlers::remark_lot))
}

/// Waste routes
fn waste_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::list_waste).post(handlers::record_waste))
}

/// Stock panel routes
fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::stock_report))
        .route("/products", get(handlers::product_summary))
}

/// Administrative routes
fn admin_routes() -> Router<AppState> {
    Router::new().route("/reset", post(handlers::reset_all))
}
