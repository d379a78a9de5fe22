//! Conversation context management.
//!
//! Keeps a bounded window of recent messages, the set of topics seen in the
//! session, and which topics have already been offered a follow-up.

use std::collections::{BTreeSet, VecDeque};

use chrono::Utc;
use folio_core::{Message, Topic};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::classifier::TopicClassifier;

/// Default number of retained messages.
pub const DEFAULT_WINDOW: usize = 10;

/// Default number of messages returned by [`ConversationContext::relevant_context`].
pub const DEFAULT_RELEVANT_LIMIT: usize = 3;

/// Follow-up phrasings per topic. Topics without an entry never get one.
fn follow_up_phrasings(topic: Topic) -> &'static [&'static str] {
    match topic {
        Topic::Experience => &[
            "Would you like to know about specific projects in this role?",
            "Would you like details about my responsibilities?",
            "Should I tell you about my achievements in this position?",
        ],
        Topic::Skills => &[
            "Would you like more details about any specific technical skill?",
            "Should I explain how I apply these skills in practice?",
            "Would you like to know about the results I've achieved with these skills?",
        ],
        Topic::Leadership => &[
            "Would you like to hear about my team management approach?",
            "Should I share specific leadership challenges I've overcome?",
            "Would you like examples of successful team initiatives?",
        ],
        Topic::Education | Topic::Achievements => &[],
    }
}

// =============================================================================
// Preferences
// =============================================================================

/// Display preferences a front-end may toggle during a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub detailed_responses: bool,
    pub technical_details: bool,
}

// =============================================================================
// ConversationContext
// =============================================================================

/// Per-session conversation memory.
///
/// Generic over the random source so tests can inject a seeded generator.
pub struct ConversationContext<R: Rng = StdRng> {
    window: usize,
    relevant_limit: usize,
    recent: VecDeque<Message>,
    topics: BTreeSet<Topic>,
    offered: Vec<Topic>,
    preferences: Preferences,
    rng: R,
}

impl ConversationContext<StdRng> {
    /// Create a context with the default window and an OS-seeded generator.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Create a context whose follow-up choices are reproducible.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for ConversationContext<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ConversationContext<R> {
    /// Create a context drawing follow-up choices from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self {
            window: DEFAULT_WINDOW,
            relevant_limit: DEFAULT_RELEVANT_LIMIT,
            recent: VecDeque::with_capacity(DEFAULT_WINDOW + 1),
            topics: BTreeSet::new(),
            offered: Vec::new(),
            preferences: Preferences::default(),
            rng,
        }
    }

    /// Override the window size (minimum 1) and relevant-context limit.
    pub fn with_limits(mut self, window: usize, relevant_limit: usize) -> Self {
        self.window = window.max(1);
        self.relevant_limit = relevant_limit;
        self
    }

    /// Record a message.
    ///
    /// Derives topics when none are attached, stamps the entry time, evicts
    /// the oldest message once the window is exceeded, and folds the topics
    /// into the session-wide set.
    pub fn add_message(&mut self, mut message: Message) {
        if message.topics.is_empty() {
            message.topics = TopicClassifier::identify_topics(&message.content);
        }
        message.timestamp = Utc::now().timestamp_millis();
        self.topics.extend(message.topics.iter().copied());

        self.recent.push_back(message);
        while self.recent.len() > self.window {
            self.recent.pop_front();
        }
    }

    /// Up to the most recent `relevant_limit` retained messages sharing a
    /// topic with `query`, oldest first.
    pub fn relevant_context(&self, query: &str) -> Vec<&Message> {
        let query_topics = TopicClassifier::identify_topics(query);
        if query_topics.is_empty() {
            return Vec::new();
        }

        let mut relevant: Vec<&Message> = self
            .recent
            .iter()
            .rev()
            .filter(|m| m.shares_topic(&query_topics))
            .take(self.relevant_limit)
            .collect();
        relevant.reverse();
        relevant
    }

    /// Offer one follow-up question for `topic`, at most once per session.
    pub fn generate_follow_up(&mut self, topic: Topic) -> Option<String> {
        if self.offered.contains(&topic) {
            return None;
        }

        let follow_up = follow_up_phrasings(topic).choose(&mut self.rng)?;
        self.offered.push(topic);
        tracing::debug!(%topic, "Follow-up offered");
        Some((*follow_up).to_string())
    }

    /// Candidate phrasings for `topic`, for callers that render choices.
    pub fn follow_up_candidates(topic: Topic) -> &'static [&'static str] {
        follow_up_phrasings(topic)
    }

    /// Retained messages, oldest first.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.recent.iter()
    }

    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    /// Every topic seen in this session.
    pub fn topics(&self) -> &BTreeSet<Topic> {
        &self.topics
    }

    /// Topics already offered a follow-up, in offer order.
    pub fn offered_follow_ups(&self) -> &[Topic] {
        &self.offered
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut Preferences {
        &mut self.preferences
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Role;

    fn ctx() -> ConversationContext {
        ConversationContext::seeded(7)
    }

    // ---- Window ----

    #[test]
    fn test_add_message_derives_topics_and_stamps_time() {
        let mut c = ctx();
        c.add_message(Message::user("Tell me about your team"));
        let m = c.messages().next().unwrap();
        assert_eq!(m.topics, vec![Topic::Leadership]);
        assert!(m.timestamp > 0);
        assert_eq!(m.role, Role::User);
    }

    #[test]
    fn test_add_message_keeps_attached_topics() {
        let mut c = ctx();
        c.add_message(Message::bot("plain text").with_topics(vec![Topic::Education]));
        assert_eq!(c.messages().next().unwrap().topics, vec![Topic::Education]);
        assert!(c.topics().contains(&Topic::Education));
    }

    #[test]
    fn test_window_never_exceeds_ten() {
        let mut c = ctx();
        for i in 0..25 {
            c.add_message(Message::user(format!("message {i}")));
            assert!(c.len() <= 10);
        }
        assert_eq!(c.len(), 10);
    }

    #[test]
    fn test_window_evicts_oldest_first() {
        let mut c = ctx();
        for i in 0..15 {
            c.add_message(Message::user(format!("message {i}")));
        }
        let contents: Vec<String> = c.messages().map(|m| m.content.clone()).collect();
        let expected: Vec<String> = (5..15).map(|i| format!("message {i}")).collect();
        assert_eq!(contents, expected);
    }

    #[test]
    fn test_custom_window() {
        let mut c = ctx().with_limits(2, 3);
        for i in 0..4 {
            c.add_message(Message::user(format!("m{i}")));
        }
        assert_eq!(c.len(), 2);
        assert_eq!(c.messages().next().unwrap().content, "m2");
    }

    #[test]
    fn test_zero_window_clamped_to_one() {
        let mut c = ctx().with_limits(0, 3);
        c.add_message(Message::user("a"));
        c.add_message(Message::user("b"));
        assert_eq!(c.len(), 1);
    }

    // ---- Session topics ----

    #[test]
    fn test_session_topics_grow_and_survive_eviction() {
        let mut c = ctx();
        c.add_message(Message::user("what degree do you hold"));
        for i in 0..12 {
            c.add_message(Message::user(format!("filler {i}")));
        }
        assert!(c.topics().contains(&Topic::Education));
        assert!(c.messages().all(|m| m.topics.is_empty()));
    }

    // ---- Relevant context ----

    #[test]
    fn test_relevant_context_filters_by_shared_topic() {
        let mut c = ctx();
        c.add_message(Message::user("about your team"));
        c.add_message(Message::user("what degree"));
        c.add_message(Message::bot("I manage people"));
        let relevant = c.relevant_context("leadership style?");
        let contents: Vec<&str> = relevant.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["about your team", "I manage people"]);
    }

    #[test]
    fn test_relevant_context_keeps_three_most_recent_in_order() {
        let mut c = ctx();
        for i in 0..6 {
            c.add_message(Message::user(format!("team update {i}")));
        }
        let relevant = c.relevant_context("team");
        let contents: Vec<&str> = relevant.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(
            contents,
            vec!["team update 3", "team update 4", "team update 5"]
        );
    }

    #[test]
    fn test_relevant_context_without_query_topics_is_empty() {
        let mut c = ctx();
        c.add_message(Message::user("team"));
        assert!(c.relevant_context("hello").is_empty());
    }

    // ---- Follow-ups ----

    #[test]
    fn test_follow_up_is_one_of_the_candidates() {
        let mut c = ctx();
        let f = c.generate_follow_up(Topic::Skills).unwrap();
        assert!(ConversationContext::<StdRng>::follow_up_candidates(Topic::Skills)
            .contains(&f.as_str()));
        assert_eq!(c.offered_follow_ups(), &[Topic::Skills]);
    }

    #[test]
    fn test_follow_up_never_repeats_for_topic() {
        let mut c = ctx();
        assert!(c.generate_follow_up(Topic::Leadership).is_some());
        assert!(c.generate_follow_up(Topic::Leadership).is_none());
        assert!(c.generate_follow_up(Topic::Experience).is_some());
        assert_eq!(c.offered_follow_ups(), &[Topic::Leadership, Topic::Experience]);
    }

    #[test]
    fn test_follow_up_absent_for_unconfigured_topics() {
        let mut c = ctx();
        assert!(c.generate_follow_up(Topic::Education).is_none());
        assert!(c.generate_follow_up(Topic::Achievements).is_none());
        assert!(c.offered_follow_ups().is_empty());
    }

    #[test]
    fn test_same_seed_same_follow_up() {
        let mut a = ConversationContext::seeded(99);
        let mut b = ConversationContext::seeded(99);
        assert_eq!(
            a.generate_follow_up(Topic::Experience),
            b.generate_follow_up(Topic::Experience)
        );
    }

    #[test]
    fn test_follow_up_candidate_tables_have_three_entries() {
        for topic in [Topic::Experience, Topic::Skills, Topic::Leadership] {
            assert_eq!(follow_up_phrasings(topic).len(), 3);
        }
    }

    // ---- Preferences ----

    #[test]
    fn test_preferences_toggle() {
        let mut c = ctx();
        assert_eq!(c.preferences(), Preferences::default());
        c.preferences_mut().detailed_responses = true;
        assert!(c.preferences().detailed_responses);
        assert!(!c.preferences().technical_details);
    }
}
