use std::sync::Arc;

use axum::{
    extract::{Extension, Json, State},
    http::HeaderMap,
};
use tracing::debug;

use shared_models::auth::{TokenResponse, User};
use shared_models::error::AppError;
use shared_session::{AppState, CurrentSession};
use shared_utils::extractor::extract_bearer_token;
use shared_utils::jwt;

use crate::models::{LoginRequest, LoginResponse, LogoutResponse, MeResponse};
use crate::services::session::{parse_role, AuthService};

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let role = parse_role(&request.role)?;
    Ok(Json(AuthService::new(&state).login(role).await?))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<LogoutResponse>, AppError> {
    AuthService::new(&state).logout(&user).await;

    Ok(Json(LogoutResponse {
        success: true,
        message: "Logged out successfully".to_string(),
    }))
}

pub async fn me(
    Extension(user): Extension<User>,
    Extension(session): Extension<CurrentSession>,
) -> Result<Json<MeResponse>, AppError> {
    let session = session.0.lock().await;

    Ok(Json(MeResponse {
        context: session.context.clone(),
        session_started: session.created_at,
        messages: session.history.len(),
        user,
    }))
}

pub async fn validate_token(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, AppError> {
    debug!("Validating token");

    let token = extract_bearer_token(&headers)?;
    let user = jwt::validate_token(&token, &state.config.jwt_secret).map_err(AppError::Auth)?;

    if state.sessions.get(&user.session_id).await.is_none() {
        return Err(AppError::Auth("Session has ended, please log in again".to_string()));
    }

    Ok(Json(TokenResponse {
        valid: true,
        user_id: user.id,
        role: user.role,
        session_id: user.session_id,
    }))
}
