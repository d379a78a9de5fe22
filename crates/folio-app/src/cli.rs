//! CLI argument definitions for the folio assistant.
//!
//! Uses `clap` with derive macros for argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Folio: a portfolio FAQ assistant that answers questions about a CV.
#[derive(Parser, Debug)]
#[command(name = "folio", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Question catalogue to load instead of the built-in one (TOML or JSON).
    #[arg(long = "catalogue")]
    pub catalogue: Option<PathBuf>,

    /// CV profile to load instead of the built-in one (TOML or JSON).
    #[arg(long = "profile")]
    pub profile: Option<PathBuf>,

    /// Seed for follow-up selection, for reproducible conversations.
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Answer immediately instead of simulating typing.
    #[arg(long = "no-delay")]
    pub no_delay: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start an interactive conversation (the default).
    Chat,
    /// Answer one question and exit.
    Ask {
        /// The question; multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// List categories and their preset questions.
    Categories,
    /// Print the active catalogue.
    ExportCatalogue {
        /// Emit JSON instead of TOML.
        #[arg(long)]
        json: bool,
    },
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > FOLIO_CONFIG env var > platform default (~/.folio/config.toml).
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("FOLIO_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the catalogue file.
    ///
    /// Priority: --catalogue flag > `[knowledge] catalogue_path`.
    /// `None` means the built-in catalogue.
    pub fn resolve_catalogue_path(&self, configured: Option<&str>) -> Option<PathBuf> {
        self.catalogue
            .clone()
            .or_else(|| configured.map(expand_home))
    }

    /// Resolve the profile file.
    ///
    /// Priority: --profile flag > `[knowledge] profile_path`.
    pub fn resolve_profile_path(&self, configured: Option<&str>) -> Option<PathBuf> {
        self.profile.clone().or_else(|| configured.map(expand_home))
    }

    /// Resolve the follow-up seed. Priority: --seed flag > `[chat] seed`.
    pub fn resolve_seed(&self, configured: Option<u64>) -> Option<u64> {
        self.seed.or(configured)
    }

    /// Resolve the log level that takes precedence over the config file.
    ///
    /// Priority: --log-level flag > `rust_log` (the RUST_LOG value).
    /// Returns `None` when the config file value should apply.
    pub fn resolve_log_level(&self, rust_log: Option<&str>) -> Option<String> {
        self.log_level.clone().or_else(|| {
            rust_log
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
    }

    /// The subcommand to run; a bare `folio` starts a chat.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Chat)
    }
}

/// One line typed into the interactive chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput<'a> {
    Empty,
    Quit,
    Categories,
    Select(&'a str),
    /// One-based question number within the selected category.
    Ask(usize),
    Back,
    Text(&'a str),
    Invalid(&'static str),
}

impl<'a> ReplInput<'a> {
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        let Some(command) = line.strip_prefix('/') else {
            return Self::Text(line);
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };
        match name {
            "quit" | "exit" => Self::Quit,
            "categories" => Self::Categories,
            "back" => Self::Back,
            "select" if arg.is_empty() => Self::Invalid("usage: /select <ID>"),
            "select" => Self::Select(arg),
            "ask" => match arg.parse::<usize>() {
                Ok(n) if n > 0 => Self::Ask(n),
                _ => Self::Invalid("usage: /ask <N> (N starts at 1)"),
            },
            _ => Self::Invalid("commands: /categories /select <ID> /ask <N> /back /quit"),
        }
    }
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        #[cfg(target_os = "windows")]
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
        #[cfg(not(target_os = "windows"))]
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(rest)
    } else {
        PathBuf::from(path)
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".folio").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".folio").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("folio").chain(args.iter().copied())).unwrap()
    }

    // ---- Arguments ----

    #[test]
    fn test_bare_invocation_is_chat() {
        let args = parse(&[]);
        assert_eq!(args.command(), Command::Chat);
        assert!(!args.no_delay);
    }

    #[test]
    fn test_config_flag_wins() {
        let args = parse(&["--config", "/tmp/folio.toml"]);
        assert_eq!(args.resolve_config_path(), PathBuf::from("/tmp/folio.toml"));
    }

    #[test]
    fn test_ask_joins_words() {
        let args = parse(&["--no-delay", "ask", "what", "is", "your", "role?"]);
        assert!(args.no_delay);
        match args.command() {
            Command::Ask { query } => assert_eq!(query.join(" "), "what is your role?"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_ask_requires_query() {
        assert!(CliArgs::try_parse_from(["folio", "ask"]).is_err());
    }

    #[test]
    fn test_export_catalogue_json_flag() {
        let args = parse(&["export-catalogue", "--json"]);
        assert_eq!(args.command(), Command::ExportCatalogue { json: true });
    }

    #[test]
    fn test_flag_overrides_configured_paths_and_seed() {
        let args = parse(&["--catalogue", "cat.json", "--seed", "7"]);
        assert_eq!(
            args.resolve_catalogue_path(Some("other.toml")),
            Some(PathBuf::from("cat.json"))
        );
        assert_eq!(args.resolve_seed(Some(1)), Some(7));
        assert_eq!(
            args.resolve_profile_path(Some("profile.toml")),
            Some(PathBuf::from("profile.toml"))
        );
        assert_eq!(args.resolve_profile_path(None), None);
    }

    #[test]
    fn test_log_level_flag_beats_env() {
        let args = parse(&["--log-level", "debug"]);
        assert_eq!(args.resolve_log_level(Some("trace")).as_deref(), Some("debug"));
    }

    #[test]
    fn test_log_level_env_used_without_flag() {
        let args = parse(&[]);
        assert_eq!(
            args.resolve_log_level(Some("folio_chat=debug")).as_deref(),
            Some("folio_chat=debug")
        );
    }

    #[test]
    fn test_log_level_defers_to_config_when_unset() {
        let args = parse(&[]);
        assert_eq!(args.resolve_log_level(None), None);
        assert_eq!(args.resolve_log_level(Some("  ")), None);
    }

    #[test]
    fn test_expand_home_leaves_plain_paths() {
        assert_eq!(expand_home("data/cat.toml"), PathBuf::from("data/cat.toml"));
        assert!(!expand_home("~/cat.toml").starts_with("~"));
    }

    // ---- Interactive input ----

    #[test]
    fn test_repl_plain_text() {
        assert_eq!(ReplInput::parse("  hello there "), ReplInput::Text("hello there"));
        assert_eq!(ReplInput::parse("   "), ReplInput::Empty);
    }

    #[test]
    fn test_repl_commands() {
        assert_eq!(ReplInput::parse("/quit"), ReplInput::Quit);
        assert_eq!(ReplInput::parse("/categories"), ReplInput::Categories);
        assert_eq!(ReplInput::parse("/back"), ReplInput::Back);
        assert_eq!(ReplInput::parse("/select CONTACT"), ReplInput::Select("CONTACT"));
        assert_eq!(ReplInput::parse("/ask 2"), ReplInput::Ask(2));
    }

    #[test]
    fn test_repl_bad_commands() {
        assert!(matches!(ReplInput::parse("/ask 0"), ReplInput::Invalid(_)));
        assert!(matches!(ReplInput::parse("/ask two"), ReplInput::Invalid(_)));
        assert!(matches!(ReplInput::parse("/select"), ReplInput::Invalid(_)));
        assert!(matches!(ReplInput::parse("/dance"), ReplInput::Invalid(_)));
    }
}
