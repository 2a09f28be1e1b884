use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::auth::User;
use shared_models::context::UserContext;
use shared_models::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
    pub context: UserContext,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: User,
    pub context: UserContext,
    pub session_started: DateTime<Utc>,
    pub messages: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Unknown role: {role}")]
    UnknownRole { role: String },

    #[error("Could not issue token: {0}")]
    Token(String),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::UnknownRole { .. } => AppError::BadRequest(e.to_string()),
            AuthError::Token(_) => AppError::Internal(e.to_string()),
        }
    }
}
