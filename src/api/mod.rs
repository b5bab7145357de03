//! HTTP API server

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::upstream::PriceSource;

pub mod handlers;
pub mod state;

pub use state::AppState;

/// Build the API router using the provided application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/data", get(handlers::data))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Convenience helper wiring a price source straight into a router
pub fn create_source_router(source: Arc<dyn PriceSource>) -> Router {
    create_router(AppState::new(source))
}
