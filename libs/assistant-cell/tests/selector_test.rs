use assistant_cell::api::{classify, select_response, Intent};
use shared_models::context::UserContext;

#[test]
fn test_medication_question_mentions_generic_name() {
    let reply = select_response("what is tysabri", &UserContext::demo_patient());

    assert!(reply.contains("natalizumab"));
    assert!(reply.contains("October 25, 2025"));
}

#[test]
fn test_medication_beats_greeting() {
    assert_eq!(classify("Hello, what is Tysabri?"), Intent::Medication);

    let reply = select_response("Hello, what is Tysabri?", &UserContext::demo_patient());
    assert!(reply.starts_with("Tysabri (natalizumab)"));
}

#[test]
fn test_selection_is_deterministic() {
    let context = UserContext::demo_patient();
    for message in ["hi there", "When is my infusion?", "I feel anxious", "blue sky", "Thanks a lot"] {
        assert_eq!(select_response(message, &context), select_response(message, &context));
    }
}

#[test]
fn test_precedence_table() {
    let cases = [
        ("What is my name?", Intent::Name),
        ("who am I", Intent::Identity),
        ("Who are you talking to", Intent::Identity),
        ("any side effect to expect", Intent::SideEffects),
        ("I have head pain", Intent::Headache),
        ("When is my appointment?", Intent::Appointment),
        ("how do i get there", Intent::Transportation),
        ("Can you book an Uber", Intent::Transportation),
        ("I'm worried", Intent::EmotionalSupport),
        ("hey", Intent::Greeting),
        ("thank you", Intent::Thanks),
        ("where is the clinic", Intent::Question),
        ("ok", Intent::Fallback),
    ];

    for (message, expected) in cases {
        assert_eq!(classify(message), expected, "message: {}", message);
    }
}

#[test]
fn test_templates_use_given_name() {
    let patient = UserContext::demo_patient();

    assert!(select_response("hello", &patient).starts_with("Hello Sarah!"));
    assert!(select_response("thanks", &patient).contains("You're very welcome, Sarah!"));
    assert!(select_response("my name", &patient).contains("Your name is Sarah Parker."));
    assert!(select_response("can I get a ride", &patient).contains("October 25th appointment"));
    assert!(select_response("what is tysabri", &patient).ends_with("how it works, Sarah?"));

    let cases = [
        ("What is my name?", Intent::Name),
        ("who am i", Intent::Identity),
        ("what is tysabri", Intent::Medication),
        ("side effects", Intent::SideEffects),
        ("I have a headache", Intent::Headache),
        ("when is my appointment", Intent::Appointment),
        ("I need a ride", Intent::Transportation),
        ("I'm nervous", Intent::EmotionalSupport),
        ("hello", Intent::Greeting),
        ("thanks", Intent::Thanks),
        ("where do I park?", Intent::Question),
        ("blue sky", Intent::Fallback),
    ];

    for (message, intent) in cases {
        assert_eq!(classify(message), intent, "message: {}", message);
        assert!(select_response(message, &patient).contains("Sarah"), "{:?} reply lacks the name", intent);
    }
}

#[test]
fn test_fallback_quotes_original_message() {
    let reply = select_response("Blue Sky", &UserContext::demo_agent());

    assert!(reply.starts_with("I understand you're asking about \"Blue Sky\", Cindy."));
}

#[test]
fn test_identity_reflects_role() {
    let agent_reply = select_response("who am i", &UserContext::demo_agent());
    assert!(agent_reply.contains("Patient Services agent"));

    let patient_reply = select_response("who am i", &UserContext::demo_patient());
    assert!(patient_reply.contains("You're a patient starting Tysabri treatment for MS."));
}
