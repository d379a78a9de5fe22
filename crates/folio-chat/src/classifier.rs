//! Keyword-based topic and intent classification.
//!
//! Matching is plain substring containment on lower-cased text, so
//! "teams" hits "team" and "leadership" hits "lead".

use std::sync::LazyLock;

use folio_core::{Intent, QueryAnalysis, Topic};
use regex::Regex;

// =============================================================================
// Keyword tables
// =============================================================================

/// Intent rules in priority order; the first rule with a hit wins.
const INTENT_RULES: &[(Intent, &[&str])] = &[
    (
        Intent::ExperienceDuration,
        &["year", "experience", "how long", "worked", "working"],
    ),
    (
        Intent::SkillsAssessment,
        &["skill", "can you", "able to", "capability", "proficient"],
    ),
    (
        Intent::Achievements,
        &["achieve", "accomplishment", "success", "improve"],
    ),
    (Intent::Leadership, &["lead", "manage", "team", "supervise"]),
];

/// Keywords that tag a text with a topic.
fn topic_keywords(topic: Topic) -> &'static [&'static str] {
    match topic {
        Topic::Experience => &["work", "job", "role", "position", "career"],
        Topic::Skills => &["skill", "ability", "technology", "tool", "expertise"],
        Topic::Education => &["study", "degree", "certification", "qualification"],
        Topic::Achievements => &["achieve", "accomplish", "success", "award"],
        Topic::Leadership => &["lead", "manage", "team", "supervise"],
    }
}

static QUESTION_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(what|how|why|can)").expect("Invalid question regex"));

static FAREWELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)bye|goodbye|end|thank").expect("Invalid farewell regex"));

// =============================================================================
// TopicClassifier
// =============================================================================

/// Stateless keyword classifier for topics, intent and question form.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopicClassifier;

impl TopicClassifier {
    /// Every topic with at least one keyword hit, in declaration order.
    pub fn identify_topics(text: &str) -> Vec<Topic> {
        let lower = text.to_lowercase();
        Topic::ALL
            .into_iter()
            .filter(|topic| topic_keywords(*topic).iter().any(|k| lower.contains(k)))
            .collect()
    }

    /// Resolve a single intent.
    ///
    /// Rules are checked experience, skills, achievements, leadership, so
    /// "years leading a team" is `ExperienceDuration`.
    pub fn determine_intent(text: &str) -> Intent {
        let lower = text.to_lowercase();
        INTENT_RULES
            .iter()
            .find(|(_, patterns)| patterns.iter().any(|p| lower.contains(p)))
            .map(|(intent, _)| *intent)
            .unwrap_or(Intent::General)
    }

    /// True if the text contains `?` or starts with what/how/why/can.
    ///
    /// Prefix match only, so "cannot" also counts. Callers trim first.
    pub fn is_question(text: &str) -> bool {
        text.contains('?') || QUESTION_START_RE.is_match(text)
    }

    /// True if the text asks to end the conversation.
    ///
    /// Substring match anywhere, so "recommend" and "attend" also end it.
    pub fn is_farewell(text: &str) -> bool {
        FAREWELL_RE.is_match(text)
    }

    /// Intent, topics and question form in one pass.
    pub fn analyze(text: &str) -> QueryAnalysis {
        if text.trim().is_empty() {
            return QueryAnalysis::default();
        }
        let analysis = QueryAnalysis {
            intent: Self::determine_intent(text),
            topics: Self::identify_topics(text),
            is_question: Self::is_question(text),
        };
        tracing::debug!(
            intent = %analysis.intent,
            topics = ?analysis.topics,
            is_question = analysis.is_question,
            "Query analyzed"
        );
        analysis
    }
}

// =============================================================================
// Tests
// =============================================================================
