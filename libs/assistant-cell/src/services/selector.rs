//! Canned replies for when no remote completion is available.
//!
//! The message is lower-cased and trimmed, then checked against
//! [`INTENT_KEYWORDS`] from top to bottom. The first intent with a keyword
//! contained in the message wins, so "Hello, what is Tysabri?" is a
//! medication question, not a greeting.

use shared_models::context::{long_date, month_day_ordinal, RoleProfile, UserContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Name,
    Identity,
    Medication,
    SideEffects,
    Headache,
    Appointment,
    Transportation,
    EmotionalSupport,
    Greeting,
    Thanks,
    Question,
    Fallback,
}

/// Precedence order matters; do not sort.
pub const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (Intent::Name, &["what is my name", "my name"]),
    (Intent::Identity, &["who am i", "who are you talking to"]),
    (Intent::Medication, &["what is tysabri", "tysabri"]),
    (Intent::SideEffects, &["side effects", "side effect"]),
    (Intent::Headache, &["headache", "head pain"]),
    (Intent::Appointment, &["when is my appointment", "when is my infusion", "appointment"]),
    (Intent::Transportation, &["transportation", "ride", "uber", "how do i get there"]),
    (Intent::EmotionalSupport, &["worried", "anxious", "scared", "nervous"]),
    (Intent::Greeting, &["hello", "hi", "hey"]),
    (Intent::Thanks, &["thank you", "thanks"]),
    (Intent::Question, &["?", "what", "how", "why", "when", "where"]),
];

pub fn classify(message: &str) -> Intent {
    let normalized = message.trim().to_lowercase();

    INTENT_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| normalized.contains(k)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Fallback)
}

pub fn select_response(message: &str, context: &UserContext) -> String {
    render(classify(message), message, context)
}

fn render(intent: Intent, message: &str, context: &UserContext) -> String {
    let full_name = &context.name;
    let given_name = context.given_name();
    let therapy = context.therapy();
    let next_infusion = context.next_infusion();

    match intent {
        Intent::Name => format!(
            "Your name is {full_name}. I'm here to help you with your {therapy} treatment journey."
        ),
        Intent::Identity => {
            let who = match &context.profile {
                RoleProfile::Patient(_) => format!("You're a patient starting {therapy} treatment for MS."),
                RoleProfile::Agent(agent) => format!(
                    "You're a {} agent supporting patients on {therapy} treatment.",
                    agent.department
                ),
            };
            format!("I'm talking to {full_name}. {who} How can I help you today?")
        }
        Intent::Medication => format!(
            "Tysabri (natalizumab) is a medication used to treat relapsing-remitting multiple sclerosis. \
             It's given as an IV infusion every 28 days and helps reduce MS inflammation and relapses. \
             You'll be starting this treatment on {}. Do you have any specific questions about how it \
             works, {given_name}?",
            long_date(next_infusion)
        ),
        Intent::SideEffects => format!(
            "Common side effects of {therapy} can include headache, fatigue, nausea, and sometimes mild \
             flu-like symptoms, especially in the first few infusions. Most people tolerate it well, and \
             side effects usually improve over time. Your healthcare team will monitor you closely for any \
             concerns. Are you worried about any particular side effects, {given_name}?"
        ),
        Intent::Headache => format!(
            "Headaches can happen with {therapy}, especially after infusions. You can usually take \
             acetaminophen (Tylenol) for relief. Stay hydrated and rest in a cool, dark room if needed. \
             Most infusion-related headaches improve within 24-48 hours. Is this something you're \
             experiencing, {given_name}?"
        ),
        Intent::Appointment => format!(
            "Your next infusion is scheduled for {}. After that, you'll have infusions every 28 days. \
             I can help you schedule future appointments or reschedule if needed. Would you like me to \
             help you with anything specific about your appointment, {given_name}?",
            long_date(next_infusion)
        ),
        Intent::Transportation => format!(
            "I can help you arrange transportation to your appointments! We can coordinate Uber or Lyft \
             rides, medical transportation, or help you coordinate with family or friends. Just let me \
             know your address and I can set up a ride for your {} appointment. Would you like me to \
             help arrange that now, {given_name}?",
            month_day_ordinal(next_infusion)
        ),
        Intent::EmotionalSupport => format!(
            "It's completely normal to feel worried or anxious about starting a new treatment, \
             {given_name}, especially with a new MS diagnosis. Many people feel this way. {therapy} is a \
             very effective treatment, and your healthcare team will monitor you closely. You're taking \
             the right steps by getting treatment early. Is there something specific that's worrying you? \
             I'm here to listen and help."
        ),
        Intent::Greeting => format!(
            "Hello {given_name}! I'm your AI assistant for your {therapy} treatment journey. I can help \
             you with questions about MS, your treatment, appointments, side effects, or anything else \
             you're curious about. What would you like to know?"
        ),
        Intent::Thanks => format!(
            "You're very welcome, {given_name}! I'm glad I could help. Is there anything else you'd like \
             to know about your treatment or MS?"
        ),
        Intent::Question => format!(
            "That's a great question, {given_name}. I want to make sure I give you the most accurate and \
             helpful information. Could you provide a bit more detail about what specifically you'd like \
             to know? I can help with questions about MS, {therapy} treatment, appointments, side \
             effects, lifestyle, family, work, or any other concerns you might have."
        ),
        Intent::Fallback => format!(
            "I understand you're asking about \"{message}\", {given_name}. I'm your AI assistant for your \
             {therapy} treatment journey. I can help you with questions about MS, your medication, \
             appointments, side effects, lifestyle, family, work, or anything else on your mind. Could \
             you tell me more about what you'd like to know? I'm here to support you."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify("  WHAT IS TYSABRI  "), Intent::Medication);
        assert_eq!(classify("Thanks!"), Intent::Thanks);
    }

    #[test]
    fn earlier_intents_win() {
        assert_eq!(classify("Hello, what is Tysabri?"), Intent::Medication);
        assert_eq!(classify("I'm nervous about tysabri"), Intent::Medication);
        assert_eq!(classify("hey, any side effects?"), Intent::SideEffects);
        assert_eq!(classify("I'm scared about my appointment"), Intent::Appointment);
    }

    #[test]
    fn substring_matching_is_preserved() {
        // "this" contains "hi"
        assert_eq!(classify("this"), Intent::Greeting);
        assert_eq!(classify("ok"), Intent::Fallback);
    }
}
