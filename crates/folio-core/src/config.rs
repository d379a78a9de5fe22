use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{FolioError, Result};

/// Top-level configuration for the Folio assistant.
///
/// Loaded from `~/.folio/config.toml` by default. Every section is optional
/// and falls back to the shipped behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub delay: DelayConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

impl FolioConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: FolioConfig = toml::from_str(&content)?;
        config.validate()?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Reject values the chat engine cannot honor.
    pub fn validate(&self) -> Result<()> {
        let t = self.chat.fuzzy_threshold;
        if !(0.0..=1.0).contains(&t) {
            return Err(FolioError::Config(format!(
                "chat.fuzzy_threshold must be within 0.0..=1.0, got {t}"
            )));
        }
        if self.chat.memory_window == 0 {
            return Err(FolioError::Config(
                "chat.memory_window must be at least 1".to_string(),
            ));
        }
        if self.delay.typed_min_ms > self.delay.typed_max_ms
            || self.delay.preset_min_ms > self.delay.preset_max_ms
        {
            return Err(FolioError::Config(
                "delay minimums must not exceed maximums".to_string(),
            ));
        }
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Response selection and conversation memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Minimum normalized similarity for fuzzy question matching.
    pub fuzzy_threshold: f64,
    /// Number of recent messages retained per session.
    pub memory_window: usize,
    /// Maximum messages returned by a relevant-context lookup.
    pub relevant_context_limit: usize,
    /// Append a one-time follow-up suggestion per topic.
    pub follow_ups: bool,
    /// Fixed seed for follow-up selection. Random when unset.
    pub seed: Option<u64>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 0.7,
            memory_window: 10,
            relevant_context_limit: 3,
            follow_ups: true,
            seed: None,
        }
    }
}

/// Simulated typing delay applied by the front-end before showing a reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayConfig {
    pub enabled: bool,
    /// Bounds for free-text questions, in milliseconds.
    pub typed_min_ms: u64,
    pub typed_max_ms: u64,
    /// Bounds for preset question picks, in milliseconds.
    pub preset_min_ms: u64,
    pub preset_max_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            typed_min_ms: 1000,
            typed_max_ms: 1500,
            preset_min_ms: 800,
            preset_max_ms: 1200,
        }
    }
}

/// Optional replacements for the built-in knowledge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// Catalogue file (TOML, or JSON with a `.json` extension).
    pub catalogue_path: Option<String>,
    /// CV profile file (TOML, or JSON with a `.json` extension).
    pub profile_path: Option<String>,
}
