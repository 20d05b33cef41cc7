//! CLI entrypoint for Roundtable
//!
//! This is the main binary that wires together all layers using
//! dependency injection, then runs a scripted interview session.

mod demo;
mod progress;
mod render;

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use progress::ConsoleProgress;
use roundtable_application::{ConductInterviewsInput, ConductInterviewsUseCase};
use roundtable_domain::Topic;
use roundtable_infrastructure::{ConfigLoader, JsonlConversationLogger};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Full transcript plus references
    Full,
    /// Machine-readable JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "roundtable", about = "Interview a panel of editor personas against a shared expert")]
struct Cli {
    /// Research topic the panel gathers material for
    topic: Option<String>,

    /// Path to a config file (overrides discovered configs)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip config discovery and use built-in defaults
    #[arg(long)]
    no_config: bool,

    /// Run per-editor interviews concurrently
    #[arg(short, long)]
    parallel: bool,

    /// Expert answers per editor before the panel advances
    #[arg(long)]
    max_turns: Option<usize>,

    /// Concurrency ceiling for --parallel
    #[arg(long)]
    max_parallel: Option<usize>,

    /// Write a JSONL transcript log to this path
    #[arg(long)]
    log: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    output: OutputFormat,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting Roundtable");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow!("config error: {e}"))?
    };

    // Flags override file configuration
    let mut params = config.interview_params();
    if cli.parallel {
        params = params.with_parallel_interviews(true);
    }
    if let Some(max_turns) = cli.max_turns {
        params = params.with_max_turns(max_turns);
    }
    if let Some(max_parallel) = cli.max_parallel {
        params = params.with_max_parallel_interviews(max_parallel);
    }

    let registry = match config.editor_registry() {
        Some(registry) => registry?,
        None => demo::demo_panel(),
    };

    let topic = Topic::new(
        cli.topic
            .unwrap_or_else(|| "The History of Renewable Energy".to_string()),
    )?;

    // === Dependency Injection ===
    let gateway = Arc::new(demo::scripted_gateway(&registry, &topic));
    let search = Arc::new(demo::search_index());

    let mut use_case = ConductInterviewsUseCase::new(gateway, search, params.clone());
    if let Some(path) = &cli.log {
        if let Some(logger) = JsonlConversationLogger::new(path) {
            info!("Writing transcript log to {}", logger.path().display());
            use_case = use_case.with_conversation_logger(Arc::new(logger));
        }
    }

    if !cli.quiet {
        println!();
        println!(
            "Interviewing {} editors on: {} ({} mode)",
            registry.len(),
            topic,
            if params.parallel_interviews {
                "parallel"
            } else {
                "serial"
            }
        );
        println!();
    }

    let input = ConductInterviewsInput::new(topic, registry);
    let result = if cli.quiet {
        use_case.execute(input).await?
    } else {
        use_case
            .execute_with_progress(input, &ConsoleProgress)
            .await?
    };

    match cli.output {
        OutputFormat::Full => println!("{}", render::render_result(&result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    Ok(())
}
