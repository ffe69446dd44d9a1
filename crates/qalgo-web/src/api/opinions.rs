//! Opinion endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::info;

use qalgo_opinions::{Opinion, OpinionForm};

use crate::dto::{JsonOrForm, RecentParams};
use crate::error::ApiError;
use crate::state::AppState;

/// Message for `GET /` while the table is empty.
pub const EMPTY_TABLE_MESSAGE: &str = "No opinions in the database yet.";

/// GET / - A random stored opinion.
pub async fn random_opinion(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Opinion>, ApiError> {
    state
        .opinions
        .random()
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(EMPTY_TABLE_MESSAGE.into()))
}

/// POST /add - Validate and store an opinion.
pub async fn add_opinion(
    State(state): State<Arc<AppState>>,
    JsonOrForm(form): JsonOrForm<OpinionForm>,
) -> Result<impl IntoResponse, ApiError> {
    let new = form.validate()?;
    let opinion = state.opinions.insert(new).await?;
    info!(id = opinion.id, title = %opinion.title, "Added opinion");

    let location = format!("/opinions/{}", opinion.id);
    Ok((
        StatusCode::SEE_OTHER,
        [(header::LOCATION, location)],
        Json(opinion),
    ))
}

/// GET /opinions - Most recent opinions first.
pub async fn list_opinions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecentParams>,
) -> Result<Json<Vec<Opinion>>, ApiError> {
    Ok(Json(state.opinions.recent(params.limit).await?))
}

/// GET /opinions/{id} - One opinion by id.
pub async fn get_opinion(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Opinion>, ApiError> {
    state
        .opinions
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Opinion {id} not found")))
}
