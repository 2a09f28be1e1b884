use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    Json,
};
use chrono::Utc;

use patient_cell::PatientDirectory;
use schedule_cell::{ScheduleService, ScheduleView};
use shared_models::auth::User;
use shared_models::error::AppError;
use shared_session::{AppState, CurrentSession};

use crate::models::{ActionOutcome, DashboardAction, Overview};
use crate::services::dispatch::{dispatch, ActionContext};
use crate::services::overview::{agent_overview, patient_overview};

#[axum::debug_handler]
pub async fn get_overview(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Extension(session): Extension<CurrentSession>,
) -> Result<Json<Overview>, AppError> {
    let today = Utc::now().date_naive();
    let mut session = session.0.lock().await;
    let context = session.context.clone();

    let overview = if user.is_patient() {
        let schedule = ScheduleService::new(&state.config).current(&mut session)?;
        patient_overview(&context, ScheduleView::new(&schedule, today), today)
    } else {
        agent_overview(&context, &PatientDirectory::demo())
    };

    Ok(Json(overview))
}

#[axum::debug_handler]
pub async fn perform_action(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Extension(session): Extension<CurrentSession>,
    Json(action): Json<DashboardAction>,
) -> Result<Json<ActionOutcome>, AppError> {
    let ctx = ActionContext {
        state: &state,
        user: &user,
        session: &session,
    };

    Ok(Json(dispatch(&ctx, action).await?))
}
