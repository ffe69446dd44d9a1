//! Axum server setup and routing.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api;
use crate::state::AppState;

/// Create the Axum router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new().route("/health", get(api::health::health));

    let algorithm_routes = Router::new()
        .route("/algorithms", get(api::algorithms::list_algorithms))
        .route(
            "/algorithms/{name}",
            get(api::algorithms::get_algorithm).post(api::algorithms::page_action),
        )
        .route(
            "/algorithms/{name}/quantum_solution",
            get(api::algorithms::quantum_solution)
                .post(api::algorithms::quantum_solution_with_params),
        )
        .route(
            "/algorithms/{name}/classical_solution",
            get(api::algorithms::classical_solution),
        )
        .route("/results/{*path}", get(api::results::get_result));

    let opinion_routes = Router::new()
        .route("/", get(api::opinions::random_opinion))
        .route("/add", post(api::opinions::add_opinion))
        .route("/opinions", get(api::opinions::list_opinions))
        .route("/opinions/{id}", get(api::opinions::get_opinion));

    let cors = if state.config.server.cors_permissive {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    Router::new()
        .nest("/api", api_routes)
        .merge(algorithm_routes)
        .merge(opinion_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
