//! End-to-end conversation tests for the chat engine.
//!
//! Each test drives a fresh seeded session through the public API only.

use std::io::Write;
use std::sync::Arc;

use folio_chat::{ChatSession, CvProfile, KnowledgeBase, ResponseGenerator, TopicClassifier};
use folio_core::config::ChatConfig;
use folio_core::{Intent, Role, Topic};

// =============================================================================
// Helpers
// =============================================================================

fn make_session() -> ChatSession {
    ChatSession::seeded(Arc::new(ResponseGenerator::default()), 2024)
}

fn contact_answer() -> String {
    KnowledgeBase::builtin()
        .question("CONTACT", 0)
        .unwrap()
        .answer
        .clone()
}

// =============================================================================
// Typed questions
// =============================================================================

#[test]
fn test_experience_question_mentions_years() {
    let mut session = make_session();
    let reply = session
        .send("How many years of experience do you have?")
        .unwrap();
    assert!(reply.contains("10+ years"));
}

#[test]
fn test_contact_question_returns_stored_answer() {
    let mut session = make_session();
    let reply = session.send("What is Mohamed's contact information?").unwrap();
    assert_eq!(reply, contact_answer());
    assert!(reply.contains("• Phone Numbers: \n  - Primary: +971503441020"));
}

#[test]
fn test_references_answer_keeps_shipped_spacing() {
    let mut session = make_session();
    let reply = session.send("Who are Mohamed's references?").unwrap();
    assert!(reply.contains("• Direct Manager: \n"));
    assert!(reply.contains("• Majid Al-Futtaim Client: \n"));
}

#[test]
fn test_empty_query_gets_menu() {
    let generator = ResponseGenerator::default();
    let reply = generator.generate_response("");
    assert!(reply.starts_with("I can tell you about Mohamed's:"));
    assert!(reply.contains("Professional experience (10+ years)"));
}

#[test]
fn test_education_only_query_gets_menu_without_follow_up() {
    let mut session = make_session();
    let reply = session.send("What degree do you hold?").unwrap();
    assert_eq!(reply, session.generator().default_response());
    assert!(session.context().topics().contains(&Topic::Education));
}

#[test]
fn test_mixed_query_prefers_experience_intent() {
    let query = "How many years have you led your team?";
    let analysis = TopicClassifier::analyze(query);
    assert_eq!(analysis.intent, Intent::ExperienceDuration);
    assert!(analysis.topics.contains(&Topic::Leadership));
    assert!(analysis.is_question);

    let mut session = make_session();
    let reply = session.send(query).unwrap();
    assert!(reply.starts_with(&session.generator().experience_response()));
}

// =============================================================================
// Farewell
// =============================================================================

#[test]
fn test_bye_ends_with_contact_details() {
    let mut session = make_session();
    session.send("What skills do you have?");
    let reply = session.send("bye").unwrap();
    assert!(reply.contains("mohamed.fbaky@gmail.com"));
    assert!(reply.starts_with("Thank you for your interest"));
}

#[test]
fn test_thanks_is_a_farewell() {
    let mut session = make_session();
    let reply = session.send("Thank you!").unwrap();
    assert_eq!(reply, session.generator().knowledge().farewell());
}

// =============================================================================
// Memory
// =============================================================================

#[test]
fn test_window_retains_last_ten_messages() {
    let mut session = make_session();
    for i in 0..15 {
        session.send(&format!("hello number {i}"));
    }
    assert_eq!(session.context().len(), 10);

    let last = session.context().messages().last().unwrap();
    assert_eq!(last.role, Role::Bot);
    let first = session.context().messages().next().unwrap();
    assert_eq!(first.content, "hello number 10");
}

#[test]
fn test_follow_up_offered_once_per_topic() {
    let mut session = make_session();
    let skills = session.generator().skills_response();

    let first = session.send("Which skills do you have?").unwrap();
    assert_ne!(first, skills);
    assert!(first.starts_with(&skills));

    for _ in 0..5 {
        let again = session.send("Which skills do you have?").unwrap();
        assert_eq!(again, skills);
    }
    assert_eq!(session.context().offered_follow_ups(), &[Topic::Skills]);
}

#[test]
fn test_relevant_context_after_exchange() {
    let mut session = make_session();
    session.send("Tell me about your team");
    session.send("hello");

    let relevant = session.context().relevant_context("leadership?");
    assert!(!relevant.is_empty());
    assert!(relevant.len() <= 3);
    assert_eq!(relevant[0].content, "Tell me about your team");
}

// =============================================================================
// Category navigation
// =============================================================================

#[test]
fn test_category_navigation_flow() {
    let mut session = make_session();
    let questions = session.select_category("CONTACT").unwrap().questions.len();
    assert_eq!(questions, 2);

    let reply = session.ask_preset("CONTACT", 0).unwrap();
    assert_eq!(reply, contact_answer());

    session.back_to_categories();
    assert_eq!(session.selected_category(), None);
    assert_eq!(session.context().len(), 5);
}

// =============================================================================
// Custom content
// =============================================================================

#[test]
fn test_custom_catalogue_and_profile() {
    let mut catalogue = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    catalogue
        .write_all(
            br#"
farewell = "Cheers."

[[categories]]
id = "FAQ"
name = "Frequently Asked"

[[categories.questions]]
text = "Where are you based?"
answer = "Lisbon."
"#,
        )
        .unwrap();

    let mut profile = CvProfile::builtin();
    profile.name = "Ada".to_string();
    profile.total_years = 3;

    let kb = KnowledgeBase::load(catalogue.path()).unwrap();
    let generator = Arc::new(ResponseGenerator::new(profile, kb));
    let config = ChatConfig {
        seed: Some(9),
        ..ChatConfig::default()
    };
    let mut session = ChatSession::with_config(generator, &config);

    assert_eq!(session.send("where are you based?").unwrap(), "Lisbon.");
    assert_eq!(session.send("goodbye").unwrap(), "Cheers.");
    assert!(session
        .send("hmm")
        .unwrap()
        .contains("Professional experience (3+ years)"));
}
