use chrono::NaiveDate;

use patient_cell::PatientDirectory;
use schedule_cell::ScheduleView;
use shared_models::context::{long_date, UserContext};

use crate::models::{AgentMetrics, JourneyStep, Overview, QuickAction};

pub const TEST_SCENARIOS: [&str; 5] = [
    "What is my name?",
    "Tell me about Tysabri side effects",
    "I'm feeling anxious about my treatment",
    "Can you help with transportation?",
    "When is my next appointment?",
];

const PATIENT_QUICK_ACTIONS: [QuickAction; 3] = [
    QuickAction { action: "contact_rep", label: "Contact Your Rep" },
    QuickAction { action: "request_ride", label: "Request Transportation" },
    QuickAction { action: "insert_custom_date", label: "Schedule Appointment" },
];

pub fn patient_overview(context: &UserContext, schedule: ScheduleView, today: NaiveDate) -> Overview {
    let next_infusion = schedule.next_infusion;
    let first_infusion = schedule.entries.first().map(|e| e.date).unwrap_or(context.next_infusion());
    let upcoming = next_infusion.map(long_date).unwrap_or_else(|| "not scheduled".to_string());

    let (diagnosis, diagnosis_date) = match context.patient() {
        Some(profile) => (profile.diagnosis.clone(), long_date(profile.diagnosis_date)),
        None => ("MS".to_string(), "unknown".to_string()),
    };

    let journey = vec![
        JourneyStep {
            title: "MS Diagnosis".to_string(),
            detail: diagnosis_date,
            completed: true,
        },
        JourneyStep {
            title: "Treatment Plan".to_string(),
            detail: format!("{} Approved", context.therapy()),
            completed: true,
        },
        JourneyStep {
            title: "First Infusion".to_string(),
            detail: long_date(first_infusion),
            completed: first_infusion < today,
        },
    ];

    Overview::Patient {
        welcome: format!("Welcome back, {}!", context.given_name()),
        summary: format!(
            "Diagnosis: {} • Therapy: {}. Your next infusion is scheduled for {}. We're here to support you every step of the way.",
            diagnosis,
            context.therapy(),
            upcoming,
        ),
        context: context.clone(),
        journey,
        next_infusion,
        schedule,
        quick_actions: PATIENT_QUICK_ACTIONS.to_vec(),
    }
}

pub fn agent_overview(context: &UserContext, directory: &PatientDirectory) -> Overview {
    let active_patients = directory.queue();
    let (department, experience) = match context.agent() {
        Some(profile) => (profile.department.clone(), profile.experience_years),
        None => ("Patient Services".to_string(), 0),
    };

    Overview::Agent {
        welcome: format!("Welcome back, {}!", context.given_name()),
        summary: format!(
            "Department: {} • Experience: {} years. You have {} active patients today. AI is handling routine questions while you focus on complex cases.",
            department,
            experience,
            active_patients.len(),
        ),
        context: context.clone(),
        metrics: AgentMetrics {
            active_patients: 12,
            calls_today: 8,
            pending_prior_auths: 2,
            satisfaction_score: 92,
        },
        active_patients,
        test_scenarios: TEST_SCENARIOS.to_vec(),
    }
}
