use std::env;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::warn;

pub mod secrets;

pub use secrets::{resolve_credential, SecretsFile};

/// OpenAI project keys are the only format accepted for chat.
pub const OPENAI_KEY_PREFIX: &str = "sk-proj-";

pub const DEFAULT_SECRETS_PATH: &str = ".streamlit/secrets.toml";
pub const DEFAULT_SCHEDULE_ANCHOR: &str = "2025-10-25";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("{provider} API key not configured")]
    Missing { provider: &'static str },

    #[error("{provider} API key has an invalid format")]
    Malformed { provider: &'static str },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub cors_origin: Option<String>,
    pub jwt_secret: String,
    pub session_ttl_hours: i64,

    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub anthropic_api_key: Option<String>,
    pub anthropic_base_url: String,
    pub anthropic_model: String,
    pub google_api_key: Option<String>,
    pub gemini_base_url: String,
    pub completion_max_tokens: u32,
    pub completion_temperature: f32,

    pub schedule_interval_days: u32,
    pub schedule_count: usize,
    pub schedule_default_anchor: NaiveDate,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let secrets_path = env::var("SECRETS_PATH").unwrap_or_else(|_| DEFAULT_SECRETS_PATH.to_string());
        let secrets = SecretsFile::load_or_default(Path::new(&secrets_path));

        let config = Self {
            port: parse_or("PORT", 3000),
            cors_origin: env::var("CORS_ORIGIN").ok().filter(|v| !v.trim().is_empty()),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("JWT_SECRET not set, using demo secret");
                    "demo-secret-key".to_string()
                }),
            session_ttl_hours: parse_or("SESSION_TTL_HOURS", 24),

            openai_api_key: resolve_credential(env::var("OPENAI_API_KEY").ok(), secrets.openai_key()),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4".to_string()),
            anthropic_api_key: resolve_credential(env::var("ANTHROPIC_API_KEY").ok(), secrets.anthropic_key()),
            anthropic_base_url: env::var("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|_| "https://api.anthropic.com".to_string()),
            anthropic_model: env::var("ANTHROPIC_MODEL")
                .unwrap_or_else(|_| "claude-3-sonnet-20240229".to_string()),
            google_api_key: resolve_credential(env::var("GOOGLE_API_KEY").ok(), secrets.google_key()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            completion_max_tokens: parse_or("COMPLETION_MAX_TOKENS", 300),
            completion_temperature: parse_or("COMPLETION_TEMPERATURE", 0.7),

            schedule_interval_days: parse_or("SCHEDULE_INTERVAL_DAYS", 28),
            schedule_count: parse_or("SCHEDULE_COUNT", 6),
            schedule_default_anchor: parse_or("SCHEDULE_ANCHOR", default_anchor()),
        };

        if let Err(e) = config.openai_credential() {
            warn!("{} - chat will use local responses", e);
        }

        config
    }

    pub fn openai_credential(&self) -> Result<&str, CredentialError> {
        let key = require("OpenAI", self.openai_api_key.as_deref())?;
        if !key.starts_with(OPENAI_KEY_PREFIX) {
            return Err(CredentialError::Malformed { provider: "OpenAI" });
        }
        Ok(key)
    }

    pub fn anthropic_credential(&self) -> Result<&str, CredentialError> {
        require("Anthropic", self.anthropic_api_key.as_deref())
    }

    pub fn google_credential(&self) -> Result<&str, CredentialError> {
        require("Google", self.google_api_key.as_deref())
    }
}

fn require<'a>(provider: &'static str, key: Option<&'a str>) -> Result<&'a str, CredentialError> {
    match key {
        Some(k) if !k.trim().is_empty() => Ok(k),
        _ => Err(CredentialError::Missing { provider }),
    }
}

fn default_anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 25).unwrap_or_default()
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has an invalid value '{}', using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn config_with_openai(key: Option<&str>) -> AppConfig {
        AppConfig {
            port: 3000,
            cors_origin: None,
            jwt_secret: "secret".to_string(),
            session_ttl_hours: 24,
            openai_api_key: key.map(str::to_string),
            openai_base_url: "http://localhost".to_string(),
            openai_model: "gpt-4".to_string(),
            anthropic_api_key: None,
            anthropic_base_url: "http://localhost".to_string(),
            anthropic_model: "claude-3-sonnet-20240229".to_string(),
            google_api_key: Some("g-key".to_string()),
            gemini_base_url: "http://localhost".to_string(),
            completion_max_tokens: 300,
            completion_temperature: 0.7,
            schedule_interval_days: 28,
            schedule_count: 6,
            schedule_default_anchor: default_anchor(),
        }
    }

    #[test]
    fn openai_key_requires_project_prefix() {
        assert_eq!(config_with_openai(Some("sk-proj-123")).openai_credential(), Ok("sk-proj-123"));
        assert_matches!(
            config_with_openai(Some("sk-legacy-123")).openai_credential(),
            Err(CredentialError::Malformed { .. })
        );
        assert_matches!(
            config_with_openai(None).openai_credential(),
            Err(CredentialError::Missing { .. })
        );
    }

    #[test]
    fn other_providers_only_need_presence() {
        let config = config_with_openai(None);
        assert_eq!(config.google_credential(), Ok("g-key"));
        assert_matches!(config.anthropic_credential(), Err(CredentialError::Missing { provider: "Anthropic" }));
    }

    #[test]
    fn default_anchor_matches_constant() {
        assert_eq!(default_anchor().to_string(), DEFAULT_SCHEDULE_ANCHOR);
    }
}
