//! Folio application binary - composition root.
//!
//! 1. Parse CLI flags and initialize tracing at the configured level
//! 2. Load configuration from TOML
//! 3. Load the catalogue and CV profile (built-in unless overridden)
//! 4. Run the requested subcommand: interactive chat, one-shot ask,
//!    category listing or catalogue export

mod cli;

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use folio_chat::{ChatSession, CvProfile, KnowledgeBase, ResponseGenerator};
use folio_core::config::{DelayConfig, GeneralConfig};
use folio_core::FolioConfig;
use rand::Rng;
use tracing_subscriber::EnvFilter;

use cli::{CliArgs, Command, ReplInput};

/// How a question reached the bot; preset clicks answer a little faster.
#[derive(Debug, Clone, Copy)]
enum Asked {
    Typed,
    Preset,
}

/// Initialize tracing. A level from `--log-level` or `RUST_LOG` wins over the
/// config file's.
fn init_tracing(pinned: Option<&str>, configured: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(pinned.unwrap_or(configured)))
        .with_writer(io::stderr)
        .init();
}

fn load_knowledge(path: Option<&Path>) -> Result<KnowledgeBase, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(KnowledgeBase::load(path)?),
        None => Ok(KnowledgeBase::builtin()),
    }
}

fn load_profile(path: Option<&Path>) -> Result<CvProfile, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(CvProfile::load(path)?),
        None => Ok(CvProfile::builtin()),
    }
}

/// Sleep for a random duration in the configured range to mimic typing.
fn simulate_typing(delay: &DelayConfig, asked: Asked) {
    if !delay.enabled {
        return;
    }
    let (min, max) = match asked {
        Asked::Typed => (delay.typed_min_ms, delay.typed_max_ms),
        Asked::Preset => (delay.preset_min_ms, delay.preset_max_ms),
    };
    let millis = if min < max {
        rand::rng().random_range(min..=max)
    } else {
        min
    };
    std::thread::sleep(Duration::from_millis(millis));
}

fn print_categories(knowledge: &KnowledgeBase) {
    for category in knowledge.categories() {
        println!("{} {} [{}]", category.icon, category.name, category.id);
    }
}

fn print_questions(knowledge: &KnowledgeBase) {
    for category in knowledge.categories() {
        println!("{} {} [{}]", category.icon, category.name, category.id);
        for (i, question) in category.questions.iter().enumerate() {
            println!("  {}. {}", i + 1, question.text);
        }
    }
}

/// Interactive loop over stdin until EOF or `/quit`.
fn run_chat(session: &mut ChatSession, delay: &DelayConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{}\n", session.welcome());
    print_categories(session.generator().knowledge());
    println!("\nType a question, or /select <ID> to browse. /quit to leave.");

    let mut lines = stdin.lock().lines();
    loop {
        print!("\n> ");
        stdout.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match ReplInput::parse(&line) {
            ReplInput::Empty => continue,
            ReplInput::Quit => break,
            ReplInput::Categories => print_categories(session.generator().knowledge()),
            ReplInput::Back => println!("{}", session.back_to_categories()),
            ReplInput::Select(id) => {
                let id = resolve_category_id(session, id);
                match session.select_category(&id) {
                    Ok(category) => {
                        println!("Here are specific questions about {}:", category.name);
                        for (i, question) in category.questions.iter().enumerate() {
                            println!("  {}. {}", i + 1, question.text);
                        }
                    }
                    Err(e) => println!("{e}"),
                }
            }
            ReplInput::Ask(number) => {
                let Some(category) = session.selected_category().map(str::to_string) else {
                    println!("Select a category first with /select <ID>.");
                    continue;
                };
                simulate_typing(delay, Asked::Preset);
                match session.ask_preset(&category, number - 1) {
                    Ok(reply) => println!("{reply}"),
                    Err(e) => println!("{e}"),
                }
            }
            ReplInput::Text(text) => {
                if let Some(reply) = session.send(text) {
                    simulate_typing(delay, Asked::Typed);
                    println!("{reply}");
                }
            }
            ReplInput::Invalid(usage) => println!("{usage}"),
        }
    }

    tracing::info!(session = %session.id(), messages = session.context().len(), "Chat ended");
    Ok(())
}

/// Accept category ids case-insensitively.
fn resolve_category_id(session: &ChatSession, id: &str) -> String {
    session
        .generator()
        .knowledge()
        .categories()
        .iter()
        .find(|c| c.id.eq_ignore_ascii_case(id))
        .map(|c| c.id.clone())
        .unwrap_or_else(|| id.to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let rust_log = std::env::var("RUST_LOG").ok();
    let pinned = args.resolve_log_level(rust_log.as_deref());
    let config_file = args.resolve_config_path();
    // Peek at the configured level so the real load below is logged.
    let configured_level = FolioConfig::load(&config_file)
        .map(|c| c.general.log_level)
        .unwrap_or_else(|_| GeneralConfig::default().log_level);
    init_tracing(pinned.as_deref(), &configured_level);

    tracing::info!("Starting folio v{}", env!("CARGO_PKG_VERSION"));

    let mut config = FolioConfig::load_or_default(&config_file);
    config.chat.seed = args.resolve_seed(config.chat.seed);
    if args.no_delay {
        config.delay.enabled = false;
    }

    // Content.
    let catalogue_path = args.resolve_catalogue_path(config.knowledge.catalogue_path.as_deref());
    let profile_path = args.resolve_profile_path(config.knowledge.profile_path.as_deref());
    let knowledge = load_knowledge(catalogue_path.as_deref())?;
    let profile = load_profile(profile_path.as_deref())?;

    match args.command() {
        Command::Categories => print_questions(&knowledge),
        Command::ExportCatalogue { json } => {
            let out = if json {
                knowledge.to_json_string()?
            } else {
                knowledge.to_toml_string()?
            };
            println!("{out}");
        }
        Command::Ask { query } => {
            let generator = Arc::new(
                ResponseGenerator::new(profile, knowledge)
                    .with_threshold(config.chat.fuzzy_threshold),
            );
            let mut session = ChatSession::with_config(generator, &config.chat);
            if let Some(reply) = session.send(&query.join(" ")) {
                println!("{reply}");
            }
        }
        Command::Chat => {
            let generator = Arc::new(
                ResponseGenerator::new(profile, knowledge)
                    .with_threshold(config.chat.fuzzy_threshold),
            );
            let mut session = ChatSession::with_config(generator, &config.chat);
            run_chat(&mut session, &config.delay)?;
        }
    }

    Ok(())
}
