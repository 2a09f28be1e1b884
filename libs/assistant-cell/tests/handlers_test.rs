use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;

use assistant_cell::assistant_routes;
use shared_models::schedule::{Cadence, InfusionSchedule};
use shared_utils::test_utils::{TestConfig, TestSession};

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn chat(bearer: &str, message: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("Authorization", bearer)
        .header("Content-Type", "application/json")
        .body(Body::from(json!({ "message": message, "provider": "demo" }).to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_appointment_reply_without_schedule_uses_context() {
    let state = TestConfig::default().to_state();
    let patient = TestSession::patient(&state).await;

    let (status, body) = send(assistant_routes(state.clone()), chat(&patient.bearer(), "when is my appointment")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["response"].as_str().unwrap().contains("October 25, 2025"));
}

#[tokio::test]
async fn test_appointment_reply_follows_session_schedule() {
    let state = TestConfig::default().to_state();
    let patient = TestSession::patient(&state).await;

    let anchor = NaiveDate::from_ymd_opt(2099, 1, 5).unwrap();
    patient.handle.lock().await.schedule = Some(InfusionSchedule {
        entries: vec![anchor, NaiveDate::from_ymd_opt(2099, 2, 2).unwrap()],
        cadence: Cadence::default(),
        custom_date: None,
    });

    let (status, body) = send(assistant_routes(state.clone()), chat(&patient.bearer(), "when is my appointment")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["response"].as_str().unwrap().contains("January 5, 2099"));

    let (_, body) = send(assistant_routes(state.clone()), chat(&patient.bearer(), "I need a ride")).await;
    assert!(body["response"].as_str().unwrap().contains("January 5th appointment"));

    let session = patient.handle.lock().await;
    assert_eq!(session.history.len(), 4);
    assert_eq!(session.context.next_infusion(), NaiveDate::from_ymd_opt(2025, 10, 25).unwrap());
}
