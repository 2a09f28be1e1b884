use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use assistant_cell::assistant_routes;
use auth_cell::auth_routes;
use dashboard_cell::dashboard_routes;
use patient_cell::patient_routes;
use schedule_cell::schedule_routes;
use shared_session::AppState;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "patient-services-api" }))
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Patient Services API is running!" }))
        .route("/health", get(health))
        .nest("/auth", auth_routes(state.clone()))
        .nest("/schedule", schedule_routes(state.clone()))
        .nest("/assistant", assistant_routes(state.clone()))
        .nest("/patients", patient_routes(state.clone()))
        .nest("/dashboard", dashboard_routes(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use shared_utils::test_utils::TestConfig;

    async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn login_then_chat_through_nested_routes() {
        let state = TestConfig::default().to_state();

        let login = Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "role": "patient" }).to_string()))
            .unwrap();
        let (status, body) = call(create_router(state.clone()), login).await;
        assert_eq!(status, StatusCode::OK);
        let bearer = format!("Bearer {}", body["token"].as_str().unwrap());

        let chat = Request::builder()
            .method("POST")
            .uri("/assistant/chat")
            .header("Authorization", &bearer)
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "message": "hello", "provider": "demo" }).to_string()))
            .unwrap();
        let (status, body) = call(create_router(state.clone()), chat).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["response"].as_str().unwrap().starts_with("Hello Sarah!"));

        let schedule = Request::builder()
            .uri("/schedule")
            .header("Authorization", &bearer)
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(create_router(state), schedule).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["anchor"], "2025-10-25");
    }

    #[tokio::test]
    async fn health_is_public() {
        let state = TestConfig::default().to_state();
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

        let (status, body) = call(create_router(state), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
