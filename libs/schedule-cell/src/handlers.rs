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
    AnnualSchedule, AnnualScheduleQuery, InsertCustomRequest, ReplaceAnchorRequest, ScheduleView,
};
use crate::services::schedule::{ScheduleEdit, ScheduleService};

fn require_patient(user: &User) -> Result<(), AppError> {
    if !user.is_patient() {
        return Err(AppError::Forbidden("Only patients have an infusion schedule".to_string()));
    }
    Ok(())
}

/// Shared by the REST handlers and the dashboard action table.
pub async fn edit_schedule(
    state: &AppState,
    session: &CurrentSession,
    edit: ScheduleEdit,
) -> Result<ScheduleView, AppError> {
    let service = ScheduleService::new(&state.config);
    let mut session = session.0.lock().await;

    let schedule = service.apply(&mut session, edit)?;
    Ok(ScheduleView::new(&schedule, Utc::now().date_naive()))
}

#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Extension(session): Extension<CurrentSession>,
) -> Result<Json<ScheduleView>, AppError> {
    require_patient(&user)?;
    debug!("Loading schedule for {}", user.id);

    let service = ScheduleService::new(&state.config);
    let mut session = session.0.lock().await;
    let schedule = service.current(&mut session)?;

    Ok(Json(ScheduleView::new(&schedule, Utc::now().date_naive())))
}

#[axum::debug_handler]
pub async fn replace_anchor(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Extension(session): Extension<CurrentSession>,
    Json(request): Json<ReplaceAnchorRequest>,
) -> Result<Json<ScheduleView>, AppError> {
    require_patient(&user)?;

    let edit = ScheduleEdit::ReplaceAnchor { index: request.index, date: request.date };
    Ok(Json(edit_schedule(&state, &session, edit).await?))
}

#[axum::debug_handler]
pub async fn insert_custom_date(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Extension(session): Extension<CurrentSession>,
    Json(request): Json<InsertCustomRequest>,
) -> Result<Json<ScheduleView>, AppError> {
    require_patient(&user)?;

    let edit = ScheduleEdit::InsertCustom { date: request.date };
    Ok(Json(edit_schedule(&state, &session, edit).await?))
}

#[axum::debug_handler]
pub async fn reset_schedule(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Extension(session): Extension<CurrentSession>,
) -> Result<Json<ScheduleView>, AppError> {
    require_patient(&user)?;

    Ok(Json(edit_schedule(&state, &session, ScheduleEdit::Reset).await?))
}

pub async fn get_annual_schedule(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnnualScheduleQuery>,
) -> Result<Json<AnnualSchedule>, AppError> {
    let service = ScheduleService::new(&state.config);
    Ok(Json(service.annual(query.count)?))
}
