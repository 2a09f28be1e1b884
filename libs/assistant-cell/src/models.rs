use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_config::CredentialError;
use shared_models::chat::ChatMessage;
use shared_models::error::AppError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenAi,
    Claude,
    Gemini,
    Demo,
}

impl Provider {
    pub const ALL: [Provider; 4] = [Provider::OpenAi, Provider::Gemini, Provider::Claude, Provider::Demo];

    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI GPT-4",
            Provider::Claude => "Anthropic Claude",
            Provider::Gemini => "Google Gemini Pro",
            Provider::Demo => "Demo Mode",
        }
    }

    pub fn is_remote(&self) -> bool {
        !matches!(self, Provider::Demo)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OpenAi => write!(f, "OpenAI"),
            Provider::Claude => write!(f, "Claude"),
            Provider::Gemini => write!(f, "Gemini"),
            Provider::Demo => write!(f, "Demo"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Message is required")]
    EmptyMessage,

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("{provider} is not a remote provider")]
    NotRemote { provider: Provider },

    #[error("{provider} request failed: {source}")]
    Transport {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} API error ({status}): {body}")]
    Remote { provider: Provider, status: u16, body: String },

    #[error("Invalid {provider} response format")]
    InvalidResponse { provider: Provider },
}

impl From<AssistantError> for AppError {
    fn from(e: AssistantError) -> Self {
        match e {
            AssistantError::EmptyMessage => AppError::ValidationError(e.to_string()),
            AssistantError::NotRemote { .. } => AppError::BadRequest(e.to_string()),
            _ => AppError::ExternalService(e.to_string()),
        }
    }
}

/// Where a reply came from. A fallback always carries the warning that
/// should be shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ReplyOutcome {
    Remote { provider: Provider },
    Local,
    Fallback { provider: Provider, warning: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatReply {
    pub text: String,
    pub outcome: ReplyOutcome,
}

impl ChatReply {
    pub fn warning(&self) -> Option<&str> {
        match &self.outcome {
            ReplyOutcome::Fallback { warning, .. } => Some(warning),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub provider: Provider,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub provider: Provider,
    pub outcome: ReplyOutcome,
    pub timestamp: DateTime<Utc>,
    pub user: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub messages: Vec<ChatMessage>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub id: Provider,
    pub name: String,
    pub available: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestConnectionQuery {
    pub provider: Option<Provider>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestConnectionResponse {
    pub success: bool,
    pub provider: Provider,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}
