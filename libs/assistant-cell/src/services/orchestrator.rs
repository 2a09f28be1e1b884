use std::sync::Arc;

use chrono::Utc;
use reqwest::Client;
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_models::chat::{ChatMessage, ConversationHistory};
use shared_models::context::UserContext;

use crate::models::{AssistantError, ChatReply, Provider, ReplyOutcome};
use crate::services::completion::backend_for;
use crate::services::prompt::system_prompt;
use crate::services::selector::select_response;

pub struct ChatOrchestrator {
    config: Arc<AppConfig>,
    http_client: Client,
}

impl ChatOrchestrator {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            http_client: Client::new(),
        }
    }

    /// One remote completion, no fallback. Missing or malformed credentials
    /// fail before any request is made.
    pub async fn complete_remote(
        &self,
        message: &str,
        context: &UserContext,
        provider: Provider,
    ) -> Result<String, AssistantError> {
        let backend = backend_for(&self.config, provider, self.http_client.clone())?;
        let prompt = system_prompt(context, Utc::now().date_naive());

        backend.complete(&prompt, message).await
    }

    /// Remote reply when possible, canned reply otherwise. Never fails and
    /// never retries the remote call.
    pub async fn generate(&self, message: &str, context: &UserContext, provider: Provider) -> ChatReply {
        if !provider.is_remote() {
            debug!("Using local responses for {}", context.id);
            return ChatReply {
                text: select_response(message, context),
                outcome: ReplyOutcome::Local,
            };
        }

        match self.complete_remote(message, context, provider).await {
            Ok(text) => {
                info!("{} answered for {}", provider, context.id);
                ChatReply {
                    text,
                    outcome: ReplyOutcome::Remote { provider },
                }
            }
            Err(e) => {
                warn!("{} unavailable, falling back to local responses: {}", provider, e);
                ChatReply {
                    text: select_response(message, context),
                    outcome: ReplyOutcome::Fallback {
                        provider,
                        warning: format!("{}. Using demo mode instead.", e),
                    },
                }
            }
        }
    }

    /// Answer `message` and record both turns in `history`.
    pub async fn respond(
        &self,
        history: &mut ConversationHistory,
        message: &str,
        context: &UserContext,
        provider: Provider,
    ) -> Result<ChatReply, AssistantError> {
        if message.trim().is_empty() {
            return Err(AssistantError::EmptyMessage);
        }

        let asked_at = Utc::now();
        let reply = self.generate(message, context, provider).await;

        history.push(ChatMessage::requester(message, asked_at));
        history.push(ChatMessage::assistant(reply.text.clone(), Utc::now()));

        Ok(reply)
    }
}
