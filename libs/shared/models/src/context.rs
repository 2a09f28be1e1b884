use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Next-infusion date used when a context carries no treatment dates.
pub const DEFAULT_NEXT_INFUSION: (i32, u32, u32) = (2025, 10, 25);
pub const DEFAULT_THERAPY: &str = "Tysabri";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Patient,
    Agent,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Patient => write!(f, "patient"),
            Role::Agent => write!(f, "agent"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientProfile {
    pub patient_code: String,
    pub diagnosis: String,
    pub therapy: String,
    pub diagnosis_date: NaiveDate,
    pub next_infusion: NaiveDate,
    pub location: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentProfile {
    pub department: String,
    pub experience_years: u32,
    pub specializations: Vec<String>,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum RoleProfile {
    Patient(PatientProfile),
    Agent(AgentProfile),
}

/// Immutable identity record for the logged-in role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserContext {
    pub id: String,
    pub name: String,
    pub email: String,
    pub profile: RoleProfile,
}

impl UserContext {
    pub fn demo_patient() -> Self {
        Self {
            id: "patient_001".to_string(),
            name: "Sarah Parker".to_string(),
            email: "sarah.parker@example.com".to_string(),
            profile: RoleProfile::Patient(PatientProfile {
                patient_code: "SP-2025-001".to_string(),
                diagnosis: "Relapsing-Remitting MS".to_string(),
                therapy: DEFAULT_THERAPY.to_string(),
                diagnosis_date: ymd(2025, 10, 20),
                next_infusion: default_next_infusion(),
                location: "Palo Alto, CA".to_string(),
                phone: "+15551234567".to_string(),
            }),
        }
    }

    pub fn demo_agent() -> Self {
        Self {
            id: "agent_001".to_string(),
            name: "Cindy Smith".to_string(),
            email: "cindy.smith@biogen.com".to_string(),
            profile: RoleProfile::Agent(AgentProfile {
                department: "Patient Services".to_string(),
                experience_years: 5,
                specializations: vec![
                    "MS Treatment".to_string(),
                    "Tysabri Support".to_string(),
                    "Patient Education".to_string(),
                ],
                phone: "+15559876543".to_string(),
            }),
        }
    }

    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Patient => Self::demo_patient(),
            Role::Agent => Self::demo_agent(),
        }
    }

    pub fn role(&self) -> Role {
        match self.profile {
            RoleProfile::Patient(_) => Role::Patient,
            RoleProfile::Agent(_) => Role::Agent,
        }
    }

    /// First word of the full name.
    pub fn given_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    pub fn patient(&self) -> Option<&PatientProfile> {
        match &self.profile {
            RoleProfile::Patient(p) => Some(p),
            RoleProfile::Agent(_) => None,
        }
    }

    pub fn agent(&self) -> Option<&AgentProfile> {
        match &self.profile {
            RoleProfile::Agent(a) => Some(a),
            RoleProfile::Patient(_) => None,
        }
    }

    pub fn therapy(&self) -> &str {
        self.patient().map(|p| p.therapy.as_str()).unwrap_or(DEFAULT_THERAPY)
    }

    pub fn next_infusion(&self) -> NaiveDate {
        self.patient()
            .map(|p| p.next_infusion)
            .unwrap_or_else(default_next_infusion)
    }

    /// Copy with the patient's next infusion moved; agents are unchanged.
    pub fn with_next_infusion(mut self, date: NaiveDate) -> Self {
        if let RoleProfile::Patient(profile) = &mut self.profile {
            profile.next_infusion = date;
        }
        self
    }
}

pub fn default_next_infusion() -> NaiveDate {
    let (y, m, d) = DEFAULT_NEXT_INFUSION;
    ymd(y, m, d)
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// "October 25, 2025"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// "October 25th"
pub fn month_day_ordinal(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (1, n) if n != 11 => "st",
        (2, n) if n != 12 => "nd",
        (3, n) if n != 13 => "rd",
        _ => "th",
    };
    format!("{} {}{}", date.format("%B"), day, suffix)
}
