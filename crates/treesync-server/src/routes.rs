use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{health_handler, node_handler, since_handler};
use crate::state::AppState;

/// Wires the sync query surface onto its routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/sync/node", get(node_handler))
        .route("/api/sync", get(since_handler))
        .route("/healthz", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
