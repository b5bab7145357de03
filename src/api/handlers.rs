//! API handlers

use axum::{extract::State, Json};
use std::time::Instant;

use crate::api::AppState;
use crate::types::PriceDataset;

/// Republish the upstream spot-price dataset.
///
/// Always 200. A failed upstream fetch is served as `{"records": []}`.
pub async fn data(State(state): State<AppState>) -> Json<PriceDataset> {
    let start = Instant::now();

    let outcome = state.source.fetch().await;
    let took_ms = start.elapsed().as_millis() as u64;

    match outcome.cause() {
        Some(cause) => tracing::warn!(
            error = %cause,
            took_ms,
            "Serving empty dataset after upstream failure"
        ),
        None => tracing::info!(
            records = outcome.dataset().len(),
            took_ms,
            "Serving spot prices"
        ),
    }

    Json(outcome.into_dataset())
}
