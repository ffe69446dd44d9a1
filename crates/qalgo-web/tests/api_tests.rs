//! Integration tests for the quantum algorithm HTTP API.

use std::sync::Arc;

use axum::http::{StatusCode, header};
use axum_test::TestServer;
use serde_json::{Value, json};

use qalgo_web::config::{OutputMode, StorageBackend};
use qalgo_web::{AppConfig, AppState, create_router};

// ============================================================================
// Test helpers
// ============================================================================

fn test_state() -> Arc<AppState> {
    let mut config = AppConfig::default();
    config.simulation.seed = Some(11);
    Arc::new(AppState::in_memory(config))
}

fn test_server(state: Arc<AppState>) -> TestServer {
    let router = create_router(state);
    TestServer::new(router).expect("test server")
}

// ============================================================================
// Health endpoint
// ============================================================================

#[tokio::test]
async fn test_health_returns_ok() {
    let server = test_server(test_state());
    let response = server.get("/api/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].as_str().is_some());
    assert_eq!(body["algorithms"], 6);
    assert_eq!(body["opinions"], 0);
}

// ============================================================================
// Algorithm catalog and page actions
// ============================================================================

#[tokio::test]
async fn test_list_algorithms() {
    let server = test_server(test_state());
    let response = server.get("/algorithms").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let slugs: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["slug"].as_str().unwrap())
        .collect();
    assert_eq!(
        slugs,
        [
            "bernstein_vazirani",
            "grover",
            "grover_sudoku",
            "teleportation",
            "simon",
            "shor"
        ]
    );
}

#[tokio::test]
async fn test_get_algorithm_by_alias() {
    let server = test_server(test_state());
    let response = server.get("/algorithms/bv").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["slug"], "bernstein_vazirani");
    assert!(!body["presentation"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_algorithm_is_404() {
    let server = test_server(test_state());
    let response = server.get("/algorithms/deutsch").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_presentation_action() {
    let server = test_server(test_state());
    let response = server
        .post("/algorithms/simon")
        .json(&json!({ "action": "presentation" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["action"], "presentation");
    assert_eq!(body["algorithm"], "simon");
    assert!(body["items"].as_array().is_some_and(|items| !items.is_empty()));
}

#[tokio::test]
async fn test_exercises_action_from_form() {
    let server = test_server(test_state());
    let response = server
        .post("/algorithms/grover")
        .form(&[("action", "exercises")])
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["action"], "exercises");
    assert_eq!(body["algorithm"], "grover");
}

#[tokio::test]
async fn test_unknown_action_is_rejected() {
    let server = test_server(test_state());
    let response = server
        .post("/algorithms/grover")
        .json(&json!({ "action": "dance" }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_run_action() {
    let server = test_server(test_state());
    let response = server
        .post("/algorithms/bernstein_vazirani")
        .json(&json!({ "action": "run", "params": { "secret": "1011" } }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["action"], "run");
    assert_eq!(body["outcome"]["analysis"]["measured"], "1011");
    assert_eq!(body["outcome"]["analysis"]["recovered"], true);
}

// ============================================================================
// Solutions
// ============================================================================

#[tokio::test]
async fn test_quantum_solution_get() {
    let server = test_server(test_state());
    let response = server.get("/algorithms/grover/quantum_solution").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["algorithm"], "grover");
    assert_eq!(body["counts"]["11"], 1024);
    assert_eq!(body["analysis"]["kind"], "grover");
}

#[tokio::test]
async fn test_quantum_solution_query_params() {
    let server = test_server(test_state());
    let response = server
        .get("/algorithms/bernstein_vazirani/quantum_solution")
        .add_query_param("secret", "0110")
        .add_query_param("shots", 8)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["counts"]["0110"], 8);
}

#[tokio::test]
async fn test_quantum_solution_post_params() {
    let server = test_server(test_state());
    let response = server
        .post("/algorithms/simon/quantum_solution")
        .json(&json!({ "secret": "101", "shots": 64 }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["analysis"]["secret"], "101");
    assert_eq!(body["analysis"]["orthogonal"], true);
}

#[tokio::test]
async fn test_bad_secret_is_400() {
    let server = test_server(test_state());
    let response = server
        .get("/algorithms/simon/quantum_solution")
        .add_query_param("secret", "012")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bad_clause_list_is_400() {
    let server = test_server(test_state());
    let response = server
        .post("/algorithms/grover_sudoku/quantum_solution")
        .json(&json!({ "clauses": [[0, 4]] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_too_many_shots_is_400() {
    let server = test_server(test_state());
    let response = server
        .get("/algorithms/grover/quantum_solution")
        .add_query_param("shots", 1_000_000)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_secret_wider_than_simulator_is_400() {
    let mut config = AppConfig::default();
    config.simulation.seed = Some(11);
    config.simulation.max_qubits = 8;
    let server = test_server(Arc::new(AppState::in_memory(config)));

    let response = server
        .get("/algorithms/simon/quantum_solution")
        .add_query_param("secret", "1010101")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "bad_request");
}

#[tokio::test]
async fn test_classical_solution() {
    let server = test_server(test_state());
    let response = server
        .get("/algorithms/grover_sudoku/classical_solution")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["result"], json!(["0110", "1001"]));
}

#[tokio::test]
async fn test_teleportation_has_no_classical_solution() {
    let server = test_server(test_state());
    let response = server
        .get("/algorithms/teleportation/classical_solution")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

// ============================================================================
// Rendered artifacts
// ============================================================================

#[tokio::test]
async fn test_results_serves_stored_svg() {
    let server = test_server(test_state());
    let run: Value = server
        .get("/algorithms/grover/quantum_solution")
        .await
        .json();
    let path = run["artifacts"][0]["path"].as_str().unwrap().to_string();

    let response = server.get(&format!("/results/{path}")).await;
    response.assert_status_ok();
    assert_eq!(
        response.header(header::CONTENT_TYPE).to_str().unwrap(),
        "image/svg+xml"
    );
    assert!(response.text().contains("<svg"));
}

#[tokio::test]
async fn test_missing_result_is_404() {
    let server = test_server(test_state());
    let response = server.get("/results/histograms/nothing.svg").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

// ============================================================================
// Opinions
// ============================================================================

#[tokio::test]
async fn test_random_opinion_on_empty_table() {
    let server = test_server(test_state());
    let response = server.get("/").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert!(body["message"].as_str().unwrap().contains("No opinions"));
}

#[tokio::test]
async fn test_add_opinion_redirects() {
    let server = test_server(test_state());
    let response = server
        .post("/add")
        .json(&json!({
            "title": "Grover",
            "text": "Quadratic speedup, nice.",
            "source": "https://example.org/grover"
        }))
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(
        response.header(header::LOCATION).to_str().unwrap(),
        "/opinions/1"
    );

    let created: Value = response.json();
    assert_eq!(created["title"], "Grover");

    let fetched = server.get("/opinions/1").await;
    fetched.assert_status_ok();
    assert_eq!(fetched.json::<Value>()["text"], "Quadratic speedup, nice.");

    let random = server.get("/").await;
    random.assert_status_ok();
    assert_eq!(random.json::<Value>()["id"], 1);
}

#[tokio::test]
async fn test_add_opinion_from_form() {
    let server = test_server(test_state());
    let response = server
        .post("/add")
        .form(&[("title", "Simon"), ("text", "Exponential"), ("source", "")])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);

    let created: Value = response.json();
    assert!(created["source"].is_null());
}

#[tokio::test]
async fn test_duplicate_opinion_is_409() {
    let server = test_server(test_state());
    let body = json!({ "title": "a", "text": "same text" });
    server
        .post("/add")
        .json(&body)
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let response = server
        .post("/add")
        .json(&json!({ "title": "b", "text": "same text" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["error"], "conflict");
}

#[tokio::test]
async fn test_invalid_opinion_is_422() {
    let server = test_server(test_state());
    let response = server
        .post("/add")
        .json(&json!({ "title": "", "text": "x", "source": "not a url" }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json();
    assert_eq!(body["error"], "validation_error");
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, ["title", "source"]);
}

#[tokio::test]
async fn test_list_recent_opinions() {
    let server = test_server(test_state());
    for (title, text) in [("one", "first"), ("two", "second"), ("three", "third")] {
        server
            .post("/add")
            .json(&json!({ "title": title, "text": text }))
            .await
            .assert_status(StatusCode::SEE_OTHER);
    }

    let response = server.get("/opinions").add_query_param("limit", 2).await;
    response.assert_status_ok();
    let titles: Vec<String> = response
        .json::<Vec<Value>>()
        .iter()
        .map(|o| o["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, ["three", "two"]);
}

#[tokio::test]
async fn test_missing_opinion_is_404() {
    let server = test_server(test_state());
    let response = server.get("/opinions/99").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

// ============================================================================
// On-disk backends
// ============================================================================

fn disk_config(dir: &std::path::Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.simulation.seed = Some(3);
    config.storage.backend = StorageBackend::Sqlite;
    config.storage.path = Some(dir.join("opinions.db"));
    config.output.mode = OutputMode::Filesystem;
    config.output.results_dir = dir.join("results");
    config
}

#[tokio::test]
async fn test_opinions_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    let first = AppState::from_config(disk_config(dir.path())).unwrap();
    test_server(Arc::new(first))
        .post("/add")
        .json(&json!({ "title": "Teleportation", "text": "No cloning involved." }))
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let second = AppState::from_config(disk_config(dir.path())).unwrap();
    let response = test_server(Arc::new(second)).get("/").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["title"], "Teleportation");
}

#[tokio::test]
async fn test_filesystem_results_are_served() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::from_config(disk_config(dir.path())).unwrap();
    let server = test_server(Arc::new(state));

    server
        .get("/algorithms/bernstein_vazirani/quantum_solution")
        .await
        .assert_status_ok();
    assert!(
        dir.path()
            .join("results/histograms/bernstein_vazirani.svg")
            .exists()
    );

    let response = server
        .get("/results/histograms/bernstein_vazirani.svg")
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("<svg"));
}
