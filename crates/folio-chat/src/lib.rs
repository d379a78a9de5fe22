//! Conversational core of the portfolio assistant.
//!
//! Classifies free-text queries by keyword, fuzzy-matches them against a
//! question catalogue, and composes templated answers from CV facts, with a
//! small per-session memory that offers one follow-up per topic.

pub mod classifier;
pub mod context;
pub mod error;
pub mod fuzzy;
pub mod knowledge;
pub mod profile;
pub mod response;
pub mod session;

pub use classifier::TopicClassifier;
pub use context::{ConversationContext, Preferences};
pub use error::ChatError;
pub use fuzzy::FuzzyMatcher;
pub use knowledge::KnowledgeBase;
pub use profile::{CurrentRole, CvProfile};
pub use response::ResponseGenerator;
pub use session::ChatSession;
