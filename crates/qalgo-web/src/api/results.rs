//! Rendered artifact serving.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use tokio::task;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /results/{*path} - A stored SVG document.
pub async fn get_result(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let sink = state.sink().clone();
    let lookup = path.clone();
    let document = task::spawn_blocking(move || sink.load(&lookup))
        .await??
        .ok_or_else(|| ApiError::NotFound(format!("No artifact at '{path}'")))?;

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], document))
}
