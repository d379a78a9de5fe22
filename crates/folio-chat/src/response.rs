//! Response selection.
//!
//! Routes a query to a templated CV answer by intent, then to the first
//! fuzzy-matching catalogue question, then to per-topic templates, and
//! finally to the default menu.

use folio_core::{Intent, Question, Topic};

use crate::classifier::TopicClassifier;
use crate::fuzzy::FuzzyMatcher;
use crate::knowledge::KnowledgeBase;
use crate::profile::CvProfile;

// =============================================================================
// ResponseGenerator
// =============================================================================

/// Composes answers from a fixed profile and catalogue.
#[derive(Debug, Clone)]
pub struct ResponseGenerator {
    profile: CvProfile,
    knowledge: KnowledgeBase,
    matcher: FuzzyMatcher,
}

impl Default for ResponseGenerator {
    fn default() -> Self {
        Self::new(CvProfile::builtin(), KnowledgeBase::builtin())
    }
}

impl ResponseGenerator {
    pub fn new(profile: CvProfile, knowledge: KnowledgeBase) -> Self {
        Self {
            profile,
            knowledge,
            matcher: FuzzyMatcher::default(),
        }
    }

    /// Use a different fuzzy threshold for catalogue search.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.matcher = FuzzyMatcher::new(threshold);
        self
    }

    pub fn profile(&self) -> &CvProfile {
        &self.profile
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Answer a free-text query. Never fails; the worst case is the menu.
    pub fn generate_response(&self, query: &str) -> String {
        if query.trim().is_empty() {
            return self.default_response();
        }

        let intent = TopicClassifier::determine_intent(query);
        if let Some(answer) = self.intent_response(intent) {
            tracing::debug!(%intent, "Answered from intent template");
            return answer;
        }

        if let Some(question) = self.search_catalogue(query) {
            tracing::debug!(question = %question.text, "Answered from catalogue");
            return question.answer.clone();
        }

        let topics = TopicClassifier::identify_topics(query);
        if let Some(answer) = self.topic_response(&topics) {
            tracing::debug!(?topics, "Answered from topic templates");
            return answer;
        }

        tracing::debug!("No match, falling back to menu");
        self.default_response()
    }

    /// Templated answer for a specific intent; `None` for `General`.
    pub fn intent_response(&self, intent: Intent) -> Option<String> {
        match intent {
            Intent::ExperienceDuration => Some(self.experience_response()),
            Intent::SkillsAssessment => Some(self.skills_response()),
            Intent::Achievements => Some(self.achievements_response()),
            Intent::Leadership => Some(self.leadership_response()),
            Intent::General => None,
        }
    }

    /// First catalogue question, in declaration order, whose text fuzzy
    /// matches `query`. First match wins even if a later one is closer.
    pub fn search_catalogue(&self, query: &str) -> Option<&Question> {
        self.knowledge
            .questions()
            .find(|q| self.matcher.is_match(query, &q.text))
    }

    /// One templated section per topic, each followed by a blank line.
    ///
    /// `Education` has no template. Returns `None` when nothing was produced.
    pub fn topic_response(&self, topics: &[Topic]) -> Option<String> {
        let response: String = Topic::ALL
            .into_iter()
            .filter(|t| topics.contains(t))
            .filter_map(|t| self.topic_section(t))
            .map(|section| section + "\n\n")
            .collect();

        (!response.is_empty()).then_some(response)
    }

    fn topic_section(&self, topic: Topic) -> Option<String> {
        match topic {
            Topic::Experience => Some(self.experience_response()),
            Topic::Skills => Some(self.skills_response()),
            Topic::Achievements => Some(self.achievements_response()),
            Topic::Leadership => Some(self.leadership_response()),
            Topic::Education => None,
        }
    }

    // -----------------------------------------------------------------
    // Templates
    // -----------------------------------------------------------------

    pub fn experience_response(&self) -> String {
        let p = &self.profile;
        let role = &p.current_role;
        let mut lines = vec![
            format!(
                "{} has {}+ years of experience in Contact Centre operations.",
                p.name, p.total_years
            ),
            String::new(),
            "Current Role:".to_string(),
            format!("- {} at {} ({})", role.title, role.company, role.period),
        ];
        lines.extend(role.details.iter().map(|d| format!("  - {d}")));
        lines.extend([
            String::new(),
            "Key Achievements in Current Role:".to_string(),
            format!("- {}", p.improvements.join("\n• ")),
            String::new(),
            "Would you like to know more about his specific achievements or responsibilities?"
                .to_string(),
        ]);
        lines.join("\n")
    }

    pub fn skills_response(&self) -> String {
        let p = &self.profile;
        [
            format!("{}'s key skills include:", p.name),
            String::new(),
            "Technical Expertise:".to_string(),
            bullets(&p.technical_skills),
            String::new(),
            "Leadership Abilities:".to_string(),
            bullets(&p.leadership_skills),
            String::new(),
            "These skills have led to measurable results:".to_string(),
            format!("- {}", p.cost_savings),
            format!("- {}", p.improvements.join("\n• ")),
        ]
        .join("\n")
    }

    pub fn achievements_response(&self) -> String {
        let p = &self.profile;
        [
            "Key Achievements:".to_string(),
            String::new(),
            "Financial Impact:".to_string(),
            format!("- {}", p.cost_savings),
            String::new(),
            "Performance Improvements:".to_string(),
            bullets(&p.improvements),
            String::new(),
            "Would you like to know more about any specific achievement?".to_string(),
        ]
        .join("\n")
    }

    pub fn leadership_response(&self) -> String {
        let p = &self.profile;
        let mut lines = vec![
            "Leadership Capabilities:".to_string(),
            String::new(),
            "Key Leadership Skills:".to_string(),
            bullets(&p.leadership_skills),
            String::new(),
            "Leadership Achievements:".to_string(),
        ];
        if let Some(headline) = p.improvements.get(1) {
            lines.push(format!("- {headline}"));
        }
        lines.extend(
            [
                "- Successfully managed teams during peak periods",
                "- Implemented effective recognition programs",
                "- Developed comprehensive training programs",
                "",
                "Would you like specific examples of leadership success?",
            ]
            .map(String::from),
        );
        lines.join("\n")
    }

    /// The "what would you like to know" menu.
    pub fn default_response(&self) -> String {
        let p = &self.profile;
        [
            format!("I can tell you about {}'s:", p.name),
            String::new(),
            format!("- Professional experience ({}+ years)", p.total_years),
            "- Technical skills and achievements".to_string(),
            "- Leadership and management approach".to_string(),
            "- Process optimization successes".to_string(),
            String::new(),
            "What specific aspect would you like to know more about?".to_string(),
        ]
        .join("\n")
    }
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Tests
// =============================================================================
