use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// Coarse purpose of a query, derived from keyword membership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// How long / how much experience.
    ExperienceDuration,
    /// Skills and capabilities.
    SkillsAssessment,
    /// Results and accomplishments.
    Achievements,
    /// Team leadership and management.
    Leadership,
    /// Nothing specific; falls through to catalogue search.
    General,
}

impl Intent {
    /// Returns the snake_case label of the intent.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::ExperienceDuration => "experience_duration",
            Intent::SkillsAssessment => "skills_assessment",
            Intent::Achievements => "achievements",
            Intent::Leadership => "leadership",
            Intent::General => "general",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subject tag attached to a message via keyword membership.
///
/// Declaration order is significant: topic lists are always reported in
/// this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Experience,
    Skills,
    Education,
    Achievements,
    Leadership,
}

impl Topic {
    /// Every topic, in declaration order.
    pub const ALL: [Topic; 5] = [
        Topic::Experience,
        Topic::Skills,
        Topic::Education,
        Topic::Achievements,
        Topic::Leadership,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Experience => "experience",
            Topic::Skills => "skills",
            Topic::Education => "education",
            Topic::Achievements => "achievements",
            Topic::Leadership => "leadership",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who authored a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Bot,
}

// =============================================================================
// Knowledge base records
// =============================================================================

/// A pre-written question and its answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub answer: String,
}

impl Question {
    pub fn new(text: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            answer: answer.into(),
        }
    }
}

/// A browsable group of questions. Identity is `id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

// =============================================================================
// Conversation records
// =============================================================================

/// A single chat turn as retained by the conversation window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Epoch milliseconds; stamped when the message enters a conversation.
    pub timestamp: i64,
    /// Derived on entry when left empty.
    #[serde(default)]
    pub topics: Vec<Topic>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: 0,
            topics: Vec::new(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(Role::Bot, content)
    }

    /// Attach precomputed topics.
    pub fn with_topics(mut self, topics: Vec<Topic>) -> Self {
        self.topics = topics;
        self
    }

    /// Whether this message shares at least one topic with `topics`.
    pub fn shares_topic(&self, topics: &[Topic]) -> bool {
        self.topics.iter().any(|t| topics.contains(t))
    }
}

/// Result of analysing a single query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryAnalysis {
    pub intent: Intent,
    pub topics: Vec<Topic>,
    pub is_question: bool,
}

impl Default for QueryAnalysis {
    fn default() -> Self {
        Self {
            intent: Intent::General,
            topics: Vec::new(),
            is_question: false,
        }
    }
}
