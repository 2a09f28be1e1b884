use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_session::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn patient_routes(state: Arc<AppState>) -> Router {
    let protected_routes = Router::new()
        .route("/queue", get(handlers::get_queue))
        .route("/contact-link", post(handlers::create_contact_link))
        .route("/ride-link", post(handlers::create_ride_link))
        .route("/{id}", get(handlers::get_patient))
        .route("/{id}/interactions", get(handlers::get_interactions))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(protected_routes)
        .with_state(state)
}
