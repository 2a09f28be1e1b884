use std::sync::Arc;

use axum::{
    extract::{Extension, Query, State},
    Json,
};
use chrono::Utc;
use tracing::debug;

use shared_models::auth::User;
use shared_models::error::AppError;
use shared_session::{AppState, CurrentSession};

use crate::models::{
    ChatRequest, ChatResponse, HistoryResponse, Provider, ProviderInfo, TestConnectionQuery,
    TestConnectionResponse,
};
use crate::services::completion::backend_for;
use crate::services::orchestrator::ChatOrchestrator;
use crate::services::selector::select_response;

const CONNECTION_PROBE: &str = "Hello, are you working?";

/// Shared by the REST handler and the dashboard action table. The session
/// stays locked for the whole exchange. Once the session has a schedule, its
/// next upcoming date replaces the context's fixed next infusion.
pub async fn send_message(
    state: &AppState,
    user: &User,
    session: &CurrentSession,
    message: &str,
    provider: Provider,
) -> Result<ChatResponse, AppError> {
    let orchestrator = ChatOrchestrator::new(state.config.clone());
    let mut session = session.0.lock().await;
    let today = Utc::now().date_naive();
    let context = match session.schedule.as_ref().and_then(|s| s.next_after(today)) {
        Some(next) => session.context.clone().with_next_infusion(next),
        None => session.context.clone(),
    };

    let reply = orchestrator
        .respond(&mut session.history, message, &context, provider)
        .await?;

    Ok(ChatResponse {
        response: reply.text,
        provider,
        outcome: reply.outcome,
        timestamp: Utc::now(),
        user: user.name.clone(),
    })
}

#[axum::debug_handler]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Extension(session): Extension<CurrentSession>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    debug!("Chat request from {} via {}", user.id, request.provider);
    Ok(Json(send_message(&state, &user, &session, &request.message, request.provider).await?))
}

pub async fn get_history(
    Extension(session): Extension<CurrentSession>,
) -> Result<Json<HistoryResponse>, AppError> {
    let session = session.0.lock().await;
    let messages = session.history.messages().to_vec();

    Ok(Json(HistoryResponse {
        total: messages.len(),
        messages,
    }))
}

pub async fn get_providers(State(state): State<Arc<AppState>>) -> Json<Vec<ProviderInfo>> {
    let providers = Provider::ALL
        .iter()
        .map(|provider| ProviderInfo {
            id: *provider,
            name: provider.display_name().to_string(),
            available: match provider {
                Provider::Demo => true,
                remote => backend_for(&state.config, *remote, reqwest::Client::new()).is_ok(),
            },
        })
        .collect();

    Json(providers)
}

#[axum::debug_handler]
pub async fn test_connection(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<CurrentSession>,
    Query(query): Query<TestConnectionQuery>,
) -> Result<Json<TestConnectionResponse>, AppError> {
    let provider = query.provider.unwrap_or_default();
    let context = session.0.lock().await.context.clone();

    let response = if provider.is_remote() {
        ChatOrchestrator::new(state.config.clone())
            .complete_remote(CONNECTION_PROBE, &context, provider)
            .await?
    } else {
        select_response(CONNECTION_PROBE, &context)
    };

    Ok(Json(TestConnectionResponse {
        success: true,
        provider,
        response,
        timestamp: Utc::now(),
    }))
}
