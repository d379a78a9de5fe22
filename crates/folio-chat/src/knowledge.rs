//! Static question catalogue and canned conversation texts.
//!
//! The built-in catalogue is the shipped CV content; a replacement can be
//! loaded from TOML or JSON.

use std::collections::HashSet;
use std::path::Path;

use folio_core::{Category, FolioError, Question};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ChatError;

pub const WELCOME_MESSAGE: &str = "Hi! 👋\x20

I'm Mohamed's AI assistant. I can help you learn about his:

• Professional Summary
• Work Experience
• Leadership & Team Management
• Technical Skills & Innovation
• Process Optimization
• Contact Information

Please select a category below or ask me any question about Mohamed's profile!";

pub const END_MESSAGE: &str = "Thank you for your interest in Mohamed's profile!\x20

If you'd like to get in touch directly:
• Phone: +971586409291
• Email: mohamed.fbaky@gmail.com
• LinkedIn: linkedin.com/in/mohamedamin2025

Have a great day! 👋";

/// On-disk catalogue layout. Missing texts fall back to the built-in ones.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogueFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    welcome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    farewell: Option<String>,
    #[serde(default)]
    categories: Vec<Category>,
}

// =============================================================================
// KnowledgeBase
// =============================================================================

/// Immutable catalogue of categories plus welcome and farewell texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBase {
    categories: Vec<Category>,
    welcome: String,
    farewell: String,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KnowledgeBase {
    /// Build a catalogue, rejecting duplicate category ids.
    pub fn new(
        categories: Vec<Category>,
        welcome: impl Into<String>,
        farewell: impl Into<String>,
    ) -> Result<Self, ChatError> {
        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.id.as_str()) {
                return Err(ChatError::DuplicateCategory(category.id.clone()));
            }
        }
        Ok(Self {
            categories,
            welcome: welcome.into(),
            farewell: farewell.into(),
        })
    }

    /// Catalogue with the given categories and the built-in texts.
    pub fn from_categories(categories: Vec<Category>) -> Result<Self, ChatError> {
        Self::new(categories, WELCOME_MESSAGE, END_MESSAGE)
    }

    /// Load a catalogue file: JSON when the extension is `.json`, TOML otherwise.
    pub fn load(path: &Path) -> Result<Self, ChatError> {
        let content = std::fs::read_to_string(path).map_err(FolioError::from)?;
        let file: CatalogueFile = if is_json(path) {
            serde_json::from_str(&content).map_err(FolioError::from)?
        } else {
            toml::from_str(&content).map_err(FolioError::from)?
        };

        let kb = Self::new(
            file.categories,
            file.welcome.unwrap_or_else(|| WELCOME_MESSAGE.to_string()),
            file.farewell.unwrap_or_else(|| END_MESSAGE.to_string()),
        )?;
        info!(
            path = %path.display(),
            categories = kb.categories.len(),
            questions = kb.question_count(),
            "Catalogue loaded"
        );
        Ok(kb)
    }

    /// Serialize the catalogue in the TOML file layout.
    pub fn to_toml_string(&self) -> Result<String, ChatError> {
        toml::to_string_pretty(&self.as_file())
            .map_err(|e| ChatError::from(FolioError::from(e)))
    }

    /// Serialize the catalogue in the JSON file layout.
    pub fn to_json_string(&self) -> Result<String, ChatError> {
        serde_json::to_string_pretty(&self.as_file())
            .map_err(|e| ChatError::from(FolioError::from(e)))
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Question `index` (zero-based) of category `id`.
    pub fn question(&self, id: &str, index: usize) -> Result<&Question, ChatError> {
        let category = self
            .category(id)
            .ok_or_else(|| ChatError::UnknownCategory(id.to_string()))?;
        category
            .questions
            .get(index)
            .ok_or_else(|| ChatError::UnknownQuestion {
                category: id.to_string(),
                index,
            })
    }

    /// Every question in catalogue order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.categories.iter().flat_map(|c| c.questions.iter())
    }

    pub fn question_count(&self) -> usize {
        self.categories.iter().map(|c| c.questions.len()).sum()
    }

    pub fn welcome(&self) -> &str {
        &self.welcome
    }

    pub fn farewell(&self) -> &str {
        &self.farewell
    }

    fn as_file(&self) -> CatalogueFile {
        CatalogueFile {
            welcome: Some(self.welcome.clone()),
            farewell: Some(self.farewell.clone()),
            categories: self.categories.clone(),
        }
    }

    /// The shipped portfolio catalogue.
    pub fn builtin() -> Self {
        Self {
            categories: builtin_categories(),
            welcome: WELCOME_MESSAGE.to_string(),
            farewell: END_MESSAGE.to_string(),
        }
    }
}

pub(crate) fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

fn category(id: &str, name: &str, icon: &str, questions: &[(&str, &str)]) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        questions: questions
            .iter()
            .map(|(text, answer)| Question::new(*text, *answer))
            .collect(),
    }
}

fn builtin_categories() -> Vec<Category> {
    vec![
        category(
            "SUMMARY",
            "Professional Summary",
            "📋",
            &[
                (
                    "What is Mohamed's professional summary?",
                    "A results-driven professional with extensive experience in leadership, system integration, and cost optimization:

• Professional Experience
  - 10+ years in Telecommunications/Loyalty/Shopping malls Contact Centre operations
  - Deep knowledge in COPC standards & Metrics
  - Advanced skills in Access, Excel, and Power BI
  - Six Sigma/DMAIC standards expertise

• Key Strengths
  - Strong background in team leadership
  - Process optimization specialist
  - Data analysis and visualization expert
  - System integration professional

• Cultural Competency
  - Deep insight into UAE culture and society
  - Bilingual proficiency (Arabic & English)
  - Strong cross-cultural communication skills
  - International business experience",
                ),
                (
                    "What makes you an ideal candidate for leadership roles?",
                    "My expertise in contact center operations, familiarity with COPC standards, and advanced technical skills like Power BI and Genesys Cloud uniquely position me to excel as a supervisor. I have a proven track record of:

• Team Development
  - Reduced attrition by 15%
  - Improved team performance by 20%
  - Enhanced employee satisfaction

• Process Optimization
  - Saved $22,000 annually
  - Reduced manual effort by 40%
  - Improved FCR to 85%

• Technical Implementation
  - Successfully migrated to Genesys Cloud
  - Implemented automated solutions
  - Developed Power BI dashboards",
                ),
            ],
        ),
        category(
            "EXPERIENCE",
            "Work Experience",
            "💼",
            &[
                (
                    "What is Mohamed's current role?",
                    "Recent Position: Operations Supervisor at Teleperformance Dubai
Period: Oct'21 till Oct'24

Role Evolution:
• Aug'23 - Oct'24: Majid Al Futtaim Shopping malls Operations
• Oct'21 - July'23: Majid Al Futtaim Loyalty Program

Key Responsibilities:
• Team Management
  - Target formulation and monitoring
  - Staff hiring and onboarding
  - Performance guidance
  - Team motivation
  - Training and development

• Operations Management
  - Call center operations oversight
  - Escalation handling
  - Process optimization
  - Quality monitoring
  - SLA compliance",
                ),
                (
                    "What significant projects have you led?",
                    "Key Project Achievements:

• System Migration
  - Led Genesys Cloud implementation
  - Managed CRM system transition
  - Completed ahead of schedule
  - Minimal operational disruption

• Process Optimization
  - Developed automated reporting
  - Created escalation platform
  - Reduced resolution time by 30%
  - Saved $29,000 annually

• Team Development
  - Implemented new training program
  - Reduced onboarding time by 20%
  - Improved team performance by 15%",
                ),
            ],
        ),
        category(
            "LEADERSHIP",
            "Leadership & Team Management",
            "👥",
            &[
                (
                    "How do you ensure team motivation and productivity?",
                    "I believe motivation comes from clear communication, recognition, and fostering a supportive environment. I set realistic yet challenging goals, celebrate achievements, and maintain open communication to address concerns. For example, in my role at Majid Al Futtaim, I implemented a recognition program where high-performing agents were rewarded monthly, which boosted team morale and productivity.",
                ),
                (
                    "What's your approach to coaching and mentoring?",
                    "My coaching style is collaborative and tailored to individual needs. I regularly hold one-on-one sessions to discuss performance, provide constructive feedback, and set improvement plans. For instance, I helped a struggling agent enhance their FCR rate by developing a personalized coaching plan, leading to a 15% improvement within three months.",
                ),
                (
                    "How do you manage underperforming team members?",
                    "I start by identifying the root cause through one-on-one discussions. Then, I create an improvement plan with clear milestones and provide ongoing coaching and support. For instance, I helped an agent improve their adherence rate by implementing a tailored coaching strategy.",
                ),
                (
                    "What's your process for conducting performance reviews?",
                    "I use performance metrics and qualitative feedback to provide a balanced assessment. Reviews include recognizing achievements, identifying areas for improvement, and setting actionable goals. For example, my structured reviews increased agent engagement and reduced attrition by 15%.",
                ),
            ],
        ),
        category(
            "TECHNICAL",
            "Technical Skills & Innovation",
            "💻",
            &[
                (
                    "What is your experience with workforce management tools?",
                    "I have extensive experience using tools like Genesys Cloud and Zendesk for workforce management. These tools helped me optimize scheduling and maintain agent availability in real time, ensuring consistent service quality during peak hours.",
                ),
                (
                    "How do you leverage Power BI in decision-making?",
                    "I use Power BI to analyze performance metrics, track trends, and present actionable insights to management. For example, I developed a dashboard that identified bottlenecks in call handling, which helped reduce average handling time by 10%.",
                ),
                (
                    "What role does automation play in your operations?",
                    "Automation streamlines repetitive tasks, improves response times, and reduces errors. For instance, I implemented an automated escalation tracking system, cutting manual intervention by 40%.",
                ),
            ],
        ),
        category(
            "PROCESS",
            "Process Optimization",
            "📈",
            &[
                (
                    "How have you improved operational efficiency?",
                    "I developed a Power BI dashboard for real-time monitoring, reducing manual reporting efforts and saving $22,000 annually. This approach maintained performance while cutting unnecessary expenses.",
                ),
                (
                    "How do you identify and resolve process bottlenecks?",
                    "At Majid Al Futtaim, I noticed delays in escalation handling due to a lack of clear ownership. I created an escalation management platform to streamline assignments and monitor progress, reducing resolution time by 30%.",
                ),
                (
                    "How do you balance efficiency with quality?",
                    "I strike this balance by focusing on agent training and process optimization. For example, I streamlined workflows and improved resolution times without compromising the quality of interactions.",
                ),
            ],
        ),
        category(
            "CONTACT",
            "Contact Information",
            "📞",
            &[
                (
                    "What is Mohamed's contact information?",
                    "You can reach Mohamed through:

• Phone Numbers:\x20
  - Primary: +971503441020
  - Secondary: +971586409291
• Email: mohamed.fbaky@gmail.com
• LinkedIn: linkedin.com/in/mohamedamin2025
• Current Location: Dubai, UAE",
                ),
                (
                    "Who are Mohamed's references?",
                    "Professional References:

• Direct Manager:\x20
  - Hossam Raslan (0544281544)
• Majid Al-Futtaim Client:\x20
  - Rima Soliman (0505608989)

References are available upon request for additional verification.",
                ),
            ],
        ),
    ]
}

// =============================================================================
// Tests
// =============================================================================
