use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde_json::{json, Value};
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::models::{AssistantError, Provider};

/// One outbound completion call: system instruction plus the latest user turn.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    fn provider(&self) -> Provider;

    async fn complete(&self, system_prompt: &str, message: &str) -> Result<String, AssistantError>;
}

/// Resolve the credential for `provider` and build its backend. Fails
/// without touching the network when the credential is missing or malformed.
pub fn backend_for(
    config: &AppConfig,
    provider: Provider,
    http_client: Client,
) -> Result<Box<dyn CompletionBackend>, AssistantError> {
    let backend: Box<dyn CompletionBackend> = match provider {
        Provider::OpenAi => Box::new(OpenAiBackend {
            api_key: config.openai_credential()?.to_string(),
            base_url: config.openai_base_url.clone(),
            model: config.openai_model.clone(),
            max_tokens: config.completion_max_tokens,
            temperature: config.completion_temperature,
            http_client,
        }),
        Provider::Claude => Box::new(ClaudeBackend {
            api_key: config.anthropic_credential()?.to_string(),
            base_url: config.anthropic_base_url.clone(),
            model: config.anthropic_model.clone(),
            max_tokens: config.completion_max_tokens,
            http_client,
        }),
        Provider::Gemini => Box::new(GeminiBackend {
            api_key: config.google_credential()?.to_string(),
            base_url: config.gemini_base_url.clone(),
            http_client,
        }),
        Provider::Demo => return Err(AssistantError::NotRemote { provider }),
    };

    Ok(backend)
}

/// Claude and Gemini take a single combined turn.
fn combined_turn(system_prompt: &str, message: &str) -> String {
    format!("{}\n\nPatient question: {}", system_prompt, message)
}

async fn read_json(provider: Provider, response: Response) -> Result<Value, AssistantError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!("{} API returned {}: {}", provider, status, body);
        return Err(AssistantError::Remote { provider, status: status.as_u16(), body });
    }

    response
        .json()
        .await
        .map_err(|source| AssistantError::Transport { provider, source })
}

fn extract_text(provider: Provider, text: Option<&str>) -> Result<String, AssistantError> {
    match text.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t.to_string()),
        _ => Err(AssistantError::InvalidResponse { provider }),
    }
}

pub struct OpenAiBackend {
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    http_client: Client,
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    async fn complete(&self, system_prompt: &str, message: &str) -> Result<String, AssistantError> {
        let provider = self.provider();
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": message }
            ],
            "max_tokens": self.max_tokens,
            "temperature": self.temperature
        });

        debug!("Sending chat completion request to {}", self.base_url);
        let response = self
            .http_client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|source| AssistantError::Transport { provider, source })?;

        let value = read_json(provider, response).await?;
        extract_text(provider, value["choices"][0]["message"]["content"].as_str())
    }
}

pub struct ClaudeBackend {
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    http_client: Client,
}

#[async_trait]
impl CompletionBackend for ClaudeBackend {
    fn provider(&self) -> Provider {
        Provider::Claude
    }

    async fn complete(&self, system_prompt: &str, message: &str) -> Result<String, AssistantError> {
        let provider = self.provider();
        let body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [
                { "role": "user", "content": combined_turn(system_prompt, message) }
            ]
        });

        let response = self
            .http_client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|source| AssistantError::Transport { provider, source })?;

        let value = read_json(provider, response).await?;
        extract_text(provider, value["content"][0]["text"].as_str())
    }
}

pub struct GeminiBackend {
    api_key: String,
    base_url: String,
    http_client: Client,
}

#[async_trait]
impl CompletionBackend for GeminiBackend {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    async fn complete(&self, system_prompt: &str, message: &str) -> Result<String, AssistantError> {
        let provider = self.provider();
        let body = json!({
            "contents": [{
                "parts": [{ "text": combined_turn(system_prompt, message) }]
            }]
        });

        let response = self
            .http_client
            .post(format!("{}/v1beta/models/gemini-pro:generateContent", self.base_url))
            .query(&[("key", self.api_key.as_str())])
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|source| AssistantError::Transport { provider, source })?;

        let value = read_json(provider, response).await?;
        extract_text(provider, value["candidates"][0]["content"]["parts"][0]["text"].as_str())
    }
}
