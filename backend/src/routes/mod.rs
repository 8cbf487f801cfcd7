//! Route definitions for the Stock Register server

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Ledger from caller-supplied inputs
        .route("/ledger", post(handlers::build_ledger))
        .route("/reorder-suggestions", post(handlers::get_reorder_suggestions))
        .nest("/materials", material_routes())
}

/// Material stock register routes
fn material_routes() -> Router<AppState> {
    Router::new()
        .route("/low-stock", get(handlers::get_low_stock))
        .route("/:material_id/ledger", get(handlers::get_material_ledger))
        .route("/:material_id/ledger/summary", get(handlers::get_ledger_summary))
        .route("/:material_id/ledger/export", get(handlers::export_material_ledger))
}
