//! Structured CV facts used by the templated answers.

use std::path::Path;

use folio_core::FolioError;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ChatError;
use crate::knowledge::is_json;

/// The role currently (or most recently) held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentRole {
    pub title: String,
    pub company: String,
    pub period: String,
    #[serde(default)]
    pub details: Vec<String>,
}

/// Facts the response templates interpolate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvProfile {
    /// First name used in third-person answers.
    pub name: String,
    pub total_years: u32,
    pub current_role: CurrentRole,
    pub cost_savings: String,
    /// Improvement highlights. The second entry doubles as the headline
    /// leadership result.
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub technical_skills: Vec<String>,
    #[serde(default)]
    pub leadership_skills: Vec<String>,
}

impl Default for CvProfile {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CvProfile {
    /// Load a profile: JSON when the extension is `.json`, TOML otherwise.
    pub fn load(path: &Path) -> Result<Self, ChatError> {
        let content = std::fs::read_to_string(path).map_err(FolioError::from)?;
        let profile: CvProfile = if is_json(path) {
            serde_json::from_str(&content).map_err(FolioError::from)?
        } else {
            toml::from_str(&content).map_err(FolioError::from)?
        };
        info!(path = %path.display(), name = %profile.name, "Profile loaded");
        Ok(profile)
    }

    /// The shipped CV facts.
    pub fn builtin() -> Self {
        Self {
            name: "Mohamed".to_string(),
            total_years: 10,
            current_role: CurrentRole {
                title: "Operations Supervisor".to_string(),
                company: "Teleperformance Dubai".to_string(),
                period: "Oct'21 - Oct'24".to_string(),
                details: strings(&[
                    "Managing Majid Al Futtaim Shopping malls Operations",
                    "Leading Loyalty Program operations",
                    "Team management and development",
                    "Process optimization and quality monitoring",
                ]),
            },
            cost_savings:
                "$51,000 annually ($29,000 through escalation platform, $22,000 via Power BI)"
                    .to_string(),
            improvements: strings(&[
                "40% reduction in manual reporting",
                "15% improvement in team performance",
                "85% FCR rate achievement",
                "98% SLA compliance",
            ]),
            technical_skills: strings(&[
                "Power BI and Advanced Analytics",
                "Excel (VBA, pivot tables)",
                "Genesys Cloud services",
                "Zendesk & Infobip platforms",
                "COPC standards implementation",
            ]),
            leadership_skills: strings(&[
                "Team management and development",
                "Performance coaching and mentoring",
                "Process optimization",
                "Change management",
            ]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
