pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{AssistantError, ChatReply, Provider, ReplyOutcome};
pub use router::assistant_routes;

pub mod api {
    pub use crate::services::completion::{backend_for, CompletionBackend};
    pub use crate::services::orchestrator::ChatOrchestrator;
    pub use crate::services::prompt::system_prompt;
    pub use crate::services::selector::{classify, select_response, Intent};
}
