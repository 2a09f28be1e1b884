use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use shared_session::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn schedule_routes(state: Arc<AppState>) -> Router {
    let protected_routes = Router::new()
        .route("/", get(handlers::get_schedule))
        .route("/anchor", put(handlers::replace_anchor))
        .route("/custom", post(handlers::insert_custom_date))
        .route("/reset", post(handlers::reset_schedule))
        .route("/annual", get(handlers::get_annual_schedule))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(protected_routes)
        .with_state(state)
}
