use chrono::NaiveDate;

use shared_models::context::{long_date, RoleProfile, UserContext};

/// Persona and safety instruction sent ahead of every remote completion,
/// with the caller's context filled in.
pub fn system_prompt(context: &UserContext, today: NaiveDate) -> String {
    let context_lines = match &context.profile {
        RoleProfile::Patient(patient) => format!(
            "- Name: {}\n\
             - Role: patient\n\
             - Diagnosis: {}\n\
             - Therapy: {}\n\
             - Diagnosis Date: {}\n\
             - Next Infusion: {}\n\
             - Location: {}",
            context.name,
            patient.diagnosis,
            patient.therapy,
            long_date(patient.diagnosis_date),
            long_date(patient.next_infusion),
            patient.location,
        ),
        RoleProfile::Agent(agent) => format!(
            "- Name: {}\n\
             - Role: agent\n\
             - Department: {}\n\
             - Experience: {} years\n\
             - Specializations: {}",
            context.name,
            agent.department,
            agent.experience_years,
            agent.specializations.join(", "),
        ),
    };

    format!(
        "You are an AI assistant for Biogen Patient Services, specifically helping patients with Multiple \
         Sclerosis (MS) who are on Tysabri therapy. You are empathetic, knowledgeable, and supportive.\n\
         \n\
         User Context:\n\
         {context_lines}\n\
         - Current Date: {today}\n\
         \n\
         Your role is to:\n\
         1. Answer questions about MS, Tysabri treatment, side effects, appointments, and lifestyle\n\
         2. Provide emotional support and reassurance\n\
         3. Help with practical matters like transportation, insurance, and scheduling\n\
         4. Be conversational and natural, like a knowledgeable friend who happens to be an expert\n\
         5. Always prioritize patient safety and recommend contacting healthcare providers for medical concerns\n\
         6. Keep responses concise but helpful (2-4 sentences typically)\n\
         \n\
         Important guidelines:\n\
         - Be warm and empathetic\n\
         - Use the person's name naturally in conversation\n\
         - Don't provide specific medical advice - refer to healthcare providers for that\n\
         - Be encouraging about treatment and prognosis\n\
         - Offer practical help when possible\n\
         - If you don't know something, admit it and suggest who might know",
        today = long_date(today),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 22).unwrap()
    }

    #[test]
    fn patient_prompt_includes_treatment_context() {
        let prompt = system_prompt(&UserContext::demo_patient(), today());

        assert!(prompt.contains("- Name: Sarah Parker"));
        assert!(prompt.contains("- Next Infusion: October 25, 2025"));
        assert!(prompt.contains("- Current Date: October 22, 2025"));
        assert!(prompt.contains("Don't provide specific medical advice"));
    }

    #[test]
    fn agent_prompt_includes_department() {
        let prompt = system_prompt(&UserContext::demo_agent(), today());

        assert!(prompt.contains("- Department: Patient Services"));
        assert!(prompt.contains("- Experience: 5 years"));
        assert!(!prompt.contains("Next Infusion"));
    }
}
