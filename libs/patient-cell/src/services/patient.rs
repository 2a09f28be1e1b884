use chrono::NaiveDate;
use tracing::debug;

use shared_models::auth::User;

use crate::models::{Interaction, PatientError, PatientRecord, Priority, QueueEntry};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Fixed demo records for the agent's caseload.
#[derive(Debug, Clone)]
pub struct PatientDirectory {
    records: Vec<PatientRecord>,
    queue: Vec<QueueEntry>,
}

impl Default for PatientDirectory {
    fn default() -> Self {
        Self::demo()
    }
}

impl PatientDirectory {
    pub fn demo() -> Self {
        let records = vec![
            PatientRecord {
                id: "patient_001".to_string(),
                name: "Sarah Parker".to_string(),
                diagnosis: "Relapsing-Remitting MS".to_string(),
                therapy: "Tysabri".to_string(),
                diagnosis_date: date(2025, 10, 20),
                next_infusion: date(2025, 10, 25),
                location: "Palo Alto, CA".to_string(),
                status: "Active".to_string(),
                priority: Priority::High,
                adherence: 95,
                satisfaction: 92,
                risk_factors: strings(&["High anxiety", "New diagnosis"]),
                total_interactions: 8,
                sentiment_trend: "+15%".to_string(),
            },
            PatientRecord {
                id: "patient_002".to_string(),
                name: "John Smith".to_string(),
                diagnosis: "Relapsing-Remitting MS".to_string(),
                therapy: "Tysabri".to_string(),
                diagnosis_date: date(2024, 3, 12),
                next_infusion: date(2025, 11, 15),
                location: "Mountain View, CA".to_string(),
                status: "Active".to_string(),
                priority: Priority::Medium,
                adherence: 88,
                satisfaction: 85,
                risk_factors: strings(&["Insurance gaps"]),
                total_interactions: 14,
                sentiment_trend: "+4%".to_string(),
            },
            PatientRecord {
                id: "patient_003".to_string(),
                name: "Maria Garcia".to_string(),
                diagnosis: "Relapsing-Remitting MS".to_string(),
                therapy: "Tysabri".to_string(),
                diagnosis_date: date(2023, 6, 2),
                next_infusion: date(2025, 11, 22),
                location: "San Jose, CA".to_string(),
                status: "Active".to_string(),
                priority: Priority::Low,
                adherence: 97,
                satisfaction: 94,
                risk_factors: Vec::new(),
                total_interactions: 21,
                sentiment_trend: "+2%".to_string(),
            },
        ];

        let queue = vec![
            QueueEntry {
                patient_id: "patient_003".to_string(),
                name: "Maria Garcia".to_string(),
                priority: Priority::Low,
                next_appointment: date(2025, 11, 22),
                last_contact: date(2025, 10, 19),
                concerns: strings(&["Transportation", "Work accommodations"]),
            },
            QueueEntry {
                patient_id: "patient_001".to_string(),
                name: "Sarah Parker".to_string(),
                priority: Priority::High,
                next_appointment: date(2025, 10, 25),
                last_contact: date(2025, 10, 21),
                concerns: strings(&["New diagnosis anxiety", "Treatment expectations"]),
            },
            QueueEntry {
                patient_id: "patient_002".to_string(),
                name: "John Smith".to_string(),
                priority: Priority::Medium,
                next_appointment: date(2025, 11, 15),
                last_contact: date(2025, 10, 20),
                concerns: strings(&["Insurance coverage", "Side effects"]),
            },
        ];

        Self { records, queue }
    }

    pub fn record(&self, patient_id: &str) -> Result<&PatientRecord, PatientError> {
        self.records
            .iter()
            .find(|record| record.id == patient_id)
            .ok_or_else(|| PatientError::NotFound { id: patient_id.to_string() })
    }

    /// Patients may only read themselves; agents read anyone.
    pub fn record_for(&self, user: &User, patient_id: &str) -> Result<&PatientRecord, PatientError> {
        if user.is_patient() && user.id != patient_id {
            debug!("{} tried to read {}", user.id, patient_id);
            return Err(PatientError::AccessDenied);
        }
        self.record(patient_id)
    }

    pub fn interactions(&self, patient_id: &str) -> Result<Vec<Interaction>, PatientError> {
        self.record(patient_id)?;

        if patient_id != "patient_001" {
            return Ok(Vec::new());
        }

        Ok(vec![
            Interaction {
                id: "int_001".to_string(),
                date: date(2025, 10, 20),
                kind: "Initial Diagnosis Call".to_string(),
                duration_minutes: 45,
                sentiment: "High Anxiety".to_string(),
                topics: strings(&["MS education", "treatment options", "anxiety management"]),
                agent: "Dr. Sarah Chen".to_string(),
            },
            Interaction {
                id: "int_002".to_string(),
                date: date(2025, 10, 21),
                kind: "Welcome Call".to_string(),
                duration_minutes: 30,
                sentiment: "Medium Anxiety".to_string(),
                topics: strings(&["treatment plan", "appointment scheduling", "support resources"]),
                agent: "Cindy Smith".to_string(),
            },
            Interaction {
                id: "int_003".to_string(),
                date: date(2025, 10, 22),
                kind: "AI Chat".to_string(),
                duration_minutes: 15,
                sentiment: "Positive".to_string(),
                topics: strings(&["side effects", "appointment questions", "transportation"]),
                agent: "AI Assistant".to_string(),
            },
        ])
    }

    /// Active patients, most urgent first.
    pub fn queue(&self) -> Vec<QueueEntry> {
        let mut queue = self.queue.clone();
        queue.sort_by(|a, b| a.priority.cmp(&b.priority).then(a.last_contact.cmp(&b.last_contact)));
        queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_models::context::Role;

    fn user(id: &str, role: Role) -> User {
        User {
            id: id.to_string(),
            name: "Test".to_string(),
            role,
            session_id: Default::default(),
        }
    }

    #[test]
    fn test_queue_is_ordered_by_priority() {
        let names: Vec<String> = PatientDirectory::demo().queue().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Sarah Parker", "John Smith", "Maria Garcia"]);
    }

    #[test]
    fn test_patient_reads_only_self() {
        let directory = PatientDirectory::demo();

        assert!(directory.record_for(&user("patient_001", Role::Patient), "patient_001").is_ok());
        assert!(matches!(
            directory.record_for(&user("patient_001", Role::Patient), "patient_002"),
            Err(PatientError::AccessDenied)
        ));
        assert!(directory.record_for(&user("agent_001", Role::Agent), "patient_002").is_ok());
    }

    #[test]
    fn test_unknown_patient() {
        assert!(matches!(
            PatientDirectory::demo().interactions("patient_404"),
            Err(PatientError::NotFound { .. })
        ));
    }
}
