use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use assistant_cell::models::ChatResponse;
use assistant_cell::{Provider, ReplyOutcome};
use auth_cell::LoginResponse;
use patient_cell::models::{ContactLink, QueueEntry, RideLink, RideLinkRequest};
use schedule_cell::ScheduleView;
use shared_models::context::UserContext;
use shared_models::error::AppError;

/// Every user action the dashboard can send, tagged by `action`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DashboardAction {
    SendMessage {
        message: String,
        #[serde(default)]
        provider: Provider,
    },
    ReplaceAnchor {
        index: usize,
        date: String,
    },
    InsertCustomDate {
        date: String,
    },
    ResetSchedule,
    ContactRep {
        phone: String,
    },
    ContactPatient {
        phone: String,
        #[serde(default)]
        patient_id: Option<String>,
    },
    RequestRide(RideLinkRequest),
    RunTestScenario {
        scenario: usize,
        #[serde(default)]
        provider: Provider,
    },
    SwitchRole {
        role: String,
    },
    Logout,
}

impl DashboardAction {
    pub fn name(&self) -> &'static str {
        match self {
            DashboardAction::SendMessage { .. } => "send_message",
            DashboardAction::ReplaceAnchor { .. } => "replace_anchor",
            DashboardAction::InsertCustomDate { .. } => "insert_custom_date",
            DashboardAction::ResetSchedule => "reset_schedule",
            DashboardAction::ContactRep { .. } => "contact_rep",
            DashboardAction::ContactPatient { .. } => "contact_patient",
            DashboardAction::RequestRide(_) => "request_ride",
            DashboardAction::RunTestScenario { .. } => "run_test_scenario",
            DashboardAction::SwitchRole { .. } => "switch_role",
            DashboardAction::Logout => "logout",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionOutcome {
    Chat(ChatResponse),
    Schedule(ScheduleView),
    Contact(ContactLink),
    Ride(RideLink),
    TestScenario {
        scenario: String,
        response: String,
        outcome: ReplyOutcome,
    },
    Session(LoginResponse),
    LoggedOut,
}

#[derive(Debug, Clone, Serialize)]
pub struct JourneyStep {
    pub title: String,
    pub detail: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickAction {
    pub action: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentMetrics {
    pub active_patients: u32,
    pub calls_today: u32,
    pub pending_prior_auths: u32,
    /// Percent.
    pub satisfaction_score: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Overview {
    Patient {
        welcome: String,
        summary: String,
        context: UserContext,
        journey: Vec<JourneyStep>,
        next_infusion: Option<NaiveDate>,
        schedule: ScheduleView,
        quick_actions: Vec<QuickAction>,
    },
    Agent {
        welcome: String,
        summary: String,
        context: UserContext,
        metrics: AgentMetrics,
        active_patients: Vec<QueueEntry>,
        test_scenarios: Vec<&'static str>,
    },
}

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Unknown test scenario {index}, expected 0..{available}")]
    UnknownScenario { index: usize, available: usize },

    #[error("{action} is only available to {role}s")]
    WrongRole { action: &'static str, role: &'static str },
}

impl From<DashboardError> for AppError {
    fn from(e: DashboardError) -> Self {
        match e {
            DashboardError::UnknownScenario { .. } => AppError::ValidationError(e.to_string()),
            DashboardError::WrongRole { .. } => AppError::Forbidden(e.to_string()),
        }
    }
}
