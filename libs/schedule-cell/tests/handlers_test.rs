use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use schedule_cell::schedule_routes;
use shared_utils::test_utils::{TestConfig, TestSession};

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn json_request(method: &str, uri: &str, bearer: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", bearer)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str, bearer: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("Authorization", bearer)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_get_schedule_returns_default_sequence() {
    let state = TestConfig::default().to_state();
    let patient = TestSession::patient(&state).await;

    let (status, body) = send(schedule_routes(state.clone()), get("/", &patient.bearer())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["anchor"], "2025-10-25");
    assert_eq!(body["entries"].as_array().unwrap().len(), 6);
    assert_eq!(body["entries"][1]["label"], "November 22, 2025");
    assert_eq!(body["entries"][1]["days_since_previous"], 28);
}

#[tokio::test]
async fn test_insert_custom_marks_out_of_cadence_entry() {
    let state = TestConfig::default().to_state();
    let patient = TestSession::patient(&state).await;

    let (status, body) = send(
        schedule_routes(state.clone()),
        json_request("POST", "/custom", &patient.bearer(), json!({ "date": "2025-11-01" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["custom_date"], "2025-11-01");
    assert_eq!(body["entries"][1]["is_custom"], true);
    assert_eq!(body["entries"][1]["days_since_previous"], 7);
    assert_eq!(body["entries"][5]["date"], "2026-02-21");

    let stored = patient.handle.lock().await.schedule.clone().unwrap();
    assert_eq!(stored.custom_date.unwrap().to_string(), "2025-11-01");
}

#[tokio::test]
async fn test_invalid_anchor_is_rejected_without_mutation() {
    let state = TestConfig::default().to_state();
    let patient = TestSession::patient(&state).await;
    let app = schedule_routes(state.clone());

    let (status, _) = send(
        app.clone(),
        json_request("PUT", "/anchor", &patient.bearer(), json!({ "index": 0, "date": "2025-13-40" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(app, get("/", &patient.bearer())).await;
    assert_eq!(body["anchor"], "2025-10-25");
}

#[tokio::test]
async fn test_agents_cannot_edit_schedule() {
    let state = TestConfig::default().to_state();
    let agent = TestSession::agent(&state).await;

    let (status, _) = send(schedule_routes(state.clone()), get("/", &agent.bearer())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(schedule_routes(state), get("/annual?count=3", &agent.bearer())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dates"], json!(["2025-10-25", "2025-11-22", "2025-12-20"]));
}

#[tokio::test]
async fn test_requests_without_token_are_unauthorized() {
    let state = TestConfig::default().to_state();

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(schedule_routes(state), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization header");
}
