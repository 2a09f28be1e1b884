use std::sync::Arc;

use chrono::NaiveDate;

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::context::{Role, UserContext};
use shared_session::{AppState, SessionHandle};

use crate::jwt::create_token;

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-jwt-validation-must-be-long-enough";
pub const TEST_OPENAI_KEY: &str = "sk-proj-test-key";

pub struct TestConfig {
    pub jwt_secret: String,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub google_api_key: Option<String>,
    /// Base URL used for every completion provider; point it at a mock server.
    pub completion_base_url: String,
    pub session_ttl_hours: i64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: TEST_JWT_SECRET.to_string(),
            openai_api_key: None,
            anthropic_api_key: None,
            google_api_key: None,
            completion_base_url: "http://127.0.0.1:9".to_string(),
            session_ttl_hours: 24,
        }
    }
}

impl TestConfig {
    pub fn with_openai(base_url: &str, api_key: &str) -> Self {
        Self {
            openai_api_key: Some(api_key.to_string()),
            completion_base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            port: 3000,
            cors_origin: None,
            jwt_secret: self.jwt_secret.clone(),
            session_ttl_hours: self.session_ttl_hours,
            openai_api_key: self.openai_api_key.clone(),
            openai_base_url: self.completion_base_url.clone(),
            openai_model: "gpt-4".to_string(),
            anthropic_api_key: self.anthropic_api_key.clone(),
            anthropic_base_url: self.completion_base_url.clone(),
            anthropic_model: "claude-3-sonnet-20240229".to_string(),
            google_api_key: self.google_api_key.clone(),
            gemini_base_url: self.completion_base_url.clone(),
            completion_max_tokens: 300,
            completion_temperature: 0.7,
            schedule_interval_days: 28,
            schedule_count: 6,
            schedule_default_anchor: NaiveDate::from_ymd_opt(2025, 10, 25).unwrap_or_default(),
        }
    }

    pub fn to_state(&self) -> Arc<AppState> {
        Arc::new(AppState::new(self.to_app_config()))
    }
}

/// A logged-in role with its live session and signed token.
pub struct TestSession {
    pub user: User,
    pub token: String,
    pub handle: SessionHandle,
}

impl TestSession {
    pub async fn open(state: &AppState, role: Role) -> Self {
        let context = UserContext::for_role(role);
        let (session_id, handle) = state.sessions.open(context.clone()).await;

        let user = User {
            id: context.id.clone(),
            name: context.name.clone(),
            role,
            session_id,
        };
        let token = JwtTestUtils::create_test_token(&user, &state.config.jwt_secret, Some(24));

        Self { user, token, handle }
    }

    pub async fn patient(state: &AppState) -> Self {
        Self::open(state, Role::Patient).await
    }

    pub async fn agent(state: &AppState) -> Self {
        Self::open(state, Role::Agent).await
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &User, secret: &str, exp_hours: Option<i64>) -> String {
        create_token(user, secret, exp_hours.unwrap_or(24)).unwrap_or_default()
    }

    pub fn create_expired_token(user: &User, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &User) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::validate_token;

    #[test]
    fn test_config_creation() {
        let config = TestConfig::default().to_app_config();

        assert_eq!(config.jwt_secret, TEST_JWT_SECRET);
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.schedule_count, 6);
    }

    #[tokio::test]
    async fn test_session_token_round_trips() {
        let state = TestConfig::default().to_state();
        let session = TestSession::agent(&state).await;

        let decoded = validate_token(&session.token, TEST_JWT_SECRET).unwrap();
        assert_eq!(decoded.session_id, session.user.session_id);
        assert!(state.sessions.get(&session.user.session_id).await.is_some());
    }

    #[test]
    fn test_invalid_tokens() {
        let user = User {
            id: "patient_001".to_string(),
            name: "Sarah Parker".to_string(),
            role: Role::Patient,
            session_id: uuid::Uuid::new_v4(),
        };

        assert!(validate_token(&JwtTestUtils::create_invalid_signature_token(&user), TEST_JWT_SECRET).is_err());
        assert!(validate_token(&JwtTestUtils::create_expired_token(&user, TEST_JWT_SECRET), TEST_JWT_SECRET).is_err());
        assert!(validate_token(&JwtTestUtils::create_malformed_token(), TEST_JWT_SECRET).is_err());
    }
}
