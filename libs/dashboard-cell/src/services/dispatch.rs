use tracing::{debug, info};

use assistant_cell::api::ChatOrchestrator;
use assistant_cell::{handlers as assistant, Provider};
use auth_cell::{parse_role, AuthService};
use patient_cell::handlers as patient;
use patient_cell::models::RideLinkRequest;
use schedule_cell::handlers::edit_schedule;
use schedule_cell::ScheduleEdit;
use shared_models::auth::User;
use shared_models::context::{Role, UserContext};
use shared_models::error::AppError;
use shared_session::{AppState, CurrentSession};

use crate::models::{ActionOutcome, DashboardAction, DashboardError};
use crate::services::overview::TEST_SCENARIOS;

/// Everything an action handler may touch.
pub struct ActionContext<'a> {
    pub state: &'a AppState,
    pub user: &'a User,
    pub session: &'a CurrentSession,
}

fn require_role(ctx: &ActionContext<'_>, action: &'static str, role: Role) -> Result<(), AppError> {
    if ctx.user.role != role {
        let role = match role {
            Role::Patient => "patient",
            Role::Agent => "agent",
        };
        return Err(DashboardError::WrongRole { action, role }.into());
    }
    Ok(())
}

/// One handler per action variant.
pub async fn dispatch(ctx: &ActionContext<'_>, action: DashboardAction) -> Result<ActionOutcome, AppError> {
    debug!("{} dispatching {}", ctx.user.id, action.name());

    match action {
        DashboardAction::SendMessage { message, provider } => send_message(ctx, &message, provider).await,
        DashboardAction::ReplaceAnchor { index, date } => {
            edit(ctx, "replace_anchor", ScheduleEdit::ReplaceAnchor { index, date }).await
        }
        DashboardAction::InsertCustomDate { date } => {
            edit(ctx, "insert_custom_date", ScheduleEdit::InsertCustom { date }).await
        }
        DashboardAction::ResetSchedule => edit(ctx, "reset_schedule", ScheduleEdit::Reset).await,
        DashboardAction::ContactRep { phone } => contact_rep(ctx, &phone).await,
        DashboardAction::ContactPatient { phone, patient_id } => {
            contact_patient(ctx, patient_id.as_deref(), &phone).await
        }
        DashboardAction::RequestRide(request) => request_ride(ctx, &request),
        DashboardAction::RunTestScenario { scenario, provider } => run_test_scenario(ctx, scenario, provider).await,
        DashboardAction::SwitchRole { role } => switch_role(ctx, &role).await,
        DashboardAction::Logout => logout(ctx).await,
    }
}

async fn send_message(ctx: &ActionContext<'_>, message: &str, provider: Provider) -> Result<ActionOutcome, AppError> {
    let response = assistant::send_message(ctx.state, ctx.user, ctx.session, message, provider).await?;
    Ok(ActionOutcome::Chat(response))
}

async fn edit(ctx: &ActionContext<'_>, action: &'static str, change: ScheduleEdit) -> Result<ActionOutcome, AppError> {
    require_role(ctx, action, Role::Patient)?;
    Ok(ActionOutcome::Schedule(edit_schedule(ctx.state, ctx.session, change).await?))
}

async fn contact_rep(ctx: &ActionContext<'_>, phone: &str) -> Result<ActionOutcome, AppError> {
    Ok(ActionOutcome::Contact(patient::contact_rep(ctx.session, ctx.user, phone).await?))
}

async fn contact_patient(
    ctx: &ActionContext<'_>,
    patient_id: Option<&str>,
    phone: &str,
) -> Result<ActionOutcome, AppError> {
    Ok(ActionOutcome::Contact(
        patient::contact_patient(ctx.session, ctx.user, patient_id, phone).await?,
    ))
}

fn request_ride(ctx: &ActionContext<'_>, request: &RideLinkRequest) -> Result<ActionOutcome, AppError> {
    require_role(ctx, "request_ride", Role::Patient)?;
    Ok(ActionOutcome::Ride(patient::ride_link(request)?))
}

/// Runs a canned question against the demo patient; the agent's own history
/// is left alone.
async fn run_test_scenario(
    ctx: &ActionContext<'_>,
    index: usize,
    provider: Provider,
) -> Result<ActionOutcome, AppError> {
    require_role(ctx, "run_test_scenario", Role::Agent)?;

    let scenario = TEST_SCENARIOS.get(index).ok_or(DashboardError::UnknownScenario {
        index,
        available: TEST_SCENARIOS.len(),
    })?;

    let reply = ChatOrchestrator::new(ctx.state.config.clone())
        .generate(scenario, &UserContext::demo_patient(), provider)
        .await;

    Ok(ActionOutcome::TestScenario {
        scenario: scenario.to_string(),
        response: reply.text,
        outcome: reply.outcome,
    })
}

async fn switch_role(ctx: &ActionContext<'_>, role: &str) -> Result<ActionOutcome, AppError> {
    let role = parse_role(role)?;
    let login = AuthService::new(ctx.state).switch_role(ctx.user, role).await?;

    info!("{} switched to {}", ctx.user.id, role);
    Ok(ActionOutcome::Session(login))
}

async fn logout(ctx: &ActionContext<'_>) -> Result<ActionOutcome, AppError> {
    AuthService::new(ctx.state).logout(ctx.user).await;
    Ok(ActionOutcome::LoggedOut)
}
