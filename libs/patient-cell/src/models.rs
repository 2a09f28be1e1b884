use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "High Priority"),
            Priority::Medium => write!(f, "Medium Priority"),
            Priority::Low => write!(f, "Low Priority"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientRecord {
    pub id: String,
    pub name: String,
    pub diagnosis: String,
    pub therapy: String,
    pub diagnosis_date: NaiveDate,
    pub next_infusion: NaiveDate,
    pub location: String,
    pub status: String,
    pub priority: Priority,
    /// Percentages.
    pub adherence: u8,
    pub satisfaction: u8,
    pub risk_factors: Vec<String>,
    pub total_interactions: u32,
    pub sentiment_trend: String,
}

impl PatientRecord {
    pub fn given_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    pub id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: String,
    pub duration_minutes: u32,
    pub sentiment: String,
    pub topics: Vec<String>,
    pub agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionsResponse {
    pub patient_id: String,
    pub interactions: Vec<Interaction>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueueEntry {
    pub patient_id: String,
    pub name: String,
    pub priority: Priority,
    pub next_appointment: NaiveDate,
    pub last_contact: NaiveDate,
    pub concerns: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RideProvider {
    #[default]
    Uber,
    Lyft,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct InfusionCenter {
    pub id: &'static str,
    pub name: &'static str,
    pub address: &'static str,
    pub location: Coordinates,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactLinkRequest {
    pub phone: String,
    /// Only read for agents; defaults to the demo patient.
    #[serde(default)]
    pub patient_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RideLinkRequest {
    #[serde(default)]
    pub provider: RideProvider,
    #[serde(default)]
    pub pickup: Option<Coordinates>,
    #[serde(default)]
    pub center_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContactLink {
    pub url: String,
    pub recipient: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RideLink {
    pub provider: RideProvider,
    pub url: String,
    pub destination: InfusionCenter,
}

#[derive(Error, Debug, PartialEq)]
pub enum DeepLinkError {
    #[error("Invalid phone number: {input}")]
    InvalidPhone { input: String },

    #[error("Coordinates out of range: ({latitude}, {longitude})")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("Unknown infusion center: {id}")]
    UnknownCenter { id: String },
}

#[derive(Error, Debug)]
pub enum PatientError {
    #[error("Patient not found: {id}")]
    NotFound { id: String },

    #[error("Patients can only view their own record")]
    AccessDenied,

    #[error("Only {0} can do this")]
    WrongRole(&'static str),

    #[error(transparent)]
    Link(#[from] DeepLinkError),
}

impl From<PatientError> for AppError {
    fn from(e: PatientError) -> Self {
        match e {
            PatientError::NotFound { .. } => AppError::NotFound(e.to_string()),
            PatientError::AccessDenied | PatientError::WrongRole(_) => AppError::Forbidden(e.to_string()),
            PatientError::Link(_) => AppError::ValidationError(e.to_string()),
        }
    }
}
