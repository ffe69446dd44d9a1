//! Liveness probe.

use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::warn;

use qalgo_algorithms::Algorithm;

use crate::dto::HealthResponse;
use crate::state::AppState;

/// GET /api/health - service version plus a store round-trip.
///
/// A failing store still answers `ok`; the opinion count is left out.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let opinions = match state.opinions.count().await {
        Ok(count) => Some(count),
        Err(e) => {
            warn!(error = %e, "Opinion store unavailable");
            None
        }
    };
    Json(HealthResponse {
        algorithms: Algorithm::ALL.len(),
        opinions,
        ..HealthResponse::default()
    })
}
