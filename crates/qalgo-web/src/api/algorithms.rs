//! Algorithm catalog, page actions and runs.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tokio::task;

use qalgo_algorithms::{Algorithm, AlgorithmInfo, AlgorithmOutcome, ClassicalSolution, RunParams};

use crate::dto::{AlgorithmSummary, JsonOrForm, PageRequest, PageResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /algorithms - List the catalog.
pub async fn list_algorithms() -> Json<Vec<AlgorithmSummary>> {
    Json(Algorithm::ALL.into_iter().map(AlgorithmSummary::from).collect())
}

/// GET /algorithms/{name} - Describe one demo.
pub async fn get_algorithm(Path(name): Path<String>) -> Result<Json<AlgorithmInfo>, ApiError> {
    let algorithm: Algorithm = name.parse()?;
    Ok(Json(algorithm.info()))
}

/// POST /algorithms/{name} - Answer a page action.
pub async fn page_action(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    JsonOrForm(request): JsonOrForm<PageRequest>,
) -> Result<Json<PageResponse>, ApiError> {
    let algorithm: Algorithm = name.parse()?;
    if let Some(response) = PageResponse::from_info(request.action, algorithm.info()) {
        return Ok(Json(response));
    }
    let outcome = run_blocking(&state, algorithm, request.params).await?;
    Ok(Json(PageResponse::Run {
        outcome: Box::new(outcome),
    }))
}

/// GET /algorithms/{name}/quantum_solution - Run with query overrides.
pub async fn quantum_solution(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(params): Query<RunParams>,
) -> Result<Json<AlgorithmOutcome>, ApiError> {
    let algorithm: Algorithm = name.parse()?;
    Ok(Json(run_blocking(&state, algorithm, params).await?))
}

/// POST /algorithms/{name}/quantum_solution - Run with an optional JSON body.
pub async fn quantum_solution_with_params(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    params: Option<Json<RunParams>>,
) -> Result<Json<AlgorithmOutcome>, ApiError> {
    let algorithm: Algorithm = name.parse()?;
    let params = params.map(|Json(p)| p).unwrap_or_default();
    Ok(Json(run_blocking(&state, algorithm, params).await?))
}

/// GET /algorithms/{name}/classical_solution - Classical reference answer.
pub async fn classical_solution(
    Path(name): Path<String>,
    Query(params): Query<RunParams>,
) -> Result<Json<ClassicalSolution>, ApiError> {
    let algorithm: Algorithm = name.parse()?;
    algorithm
        .classical(&params)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("'{algorithm}' has no classical solution")))
}

async fn run_blocking(
    state: &AppState,
    algorithm: Algorithm,
    params: RunParams,
) -> Result<AlgorithmOutcome, ApiError> {
    let ctx = state.run.clone();
    let outcome = task::spawn_blocking(move || algorithm.run(&ctx, params)).await??;
    Ok(outcome)
}
