use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use shared_models::error::AppError;
use shared_session::{AppState, CurrentSession};

use crate::jwt::validate_token;

pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    let auth_header = headers
        .get("Authorization")
        .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))?;

    let auth_value = auth_header
        .to_str()
        .map_err(|_| AppError::Auth("Invalid authorization header format".to_string()))?;

    match auth_value.strip_prefix("Bearer ") {
        Some(token) => Ok(token.to_string()),
        None => Err(AppError::Auth("Invalid authorization header format".to_string())),
    }
}

/// Validates the bearer token, resolves the live session and attaches both
/// `User` and `CurrentSession` to the request.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(request.headers())?;

    let user = validate_token(&token, &state.config.jwt_secret).map_err(AppError::Auth)?;

    let session = state
        .sessions
        .get(&user.session_id)
        .await
        .ok_or_else(|| AppError::Auth("Session has ended, please log in again".to_string()))?;

    request.extensions_mut().insert(user);
    request.extensions_mut().insert(CurrentSession(session));

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_is_extracted() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn missing_or_malformed_header_is_rejected() {
        let headers = HeaderMap::new();
        assert_matches!(extract_bearer_token(&headers), Err(AppError::Auth(msg)) if msg == "Missing authorization header");

        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Token abc"));
        assert_matches!(extract_bearer_token(&headers), Err(AppError::Auth(_)));
    }
}
