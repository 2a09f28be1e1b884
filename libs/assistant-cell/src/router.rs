use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_session::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn assistant_routes(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/providers", get(handlers::get_providers));

    let protected_routes = Router::new()
        .route("/chat", post(handlers::chat))
        .route("/history", get(handlers::get_history))
        .route("/test", get(handlers::test_connection))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
