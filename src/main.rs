//! Visi CLI entry point.
//!
//! Provides `serve`, `triage`, and `modes` subcommands for running the HTTP
//! API, analysing a single message offline, or listing the coaching modes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use visi::analytics::ProfileDigest;
use visi::coach::{history_from_value, ChatRequest, Coach, CoachSettings};
use visi::config::VisiConfig;
use visi::providers::router::build_provider;
use visi::providers::{CompletionRequest, CompletionResponse, LlmProvider, ProviderError};
use visi::server::{self, routes::mode_catalogue, AppState};
use visi::types::ChatMessage;

/// Visi: study coach that routes each message to a coaching mode.
#[derive(Parser)]
#[command(name = "visi", version, about)]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API.
    Serve,
    /// Analyse one message and print the result as JSON. The model is not called.
    Triage {
        /// Student message.
        #[arg(long, short)]
        message: String,
        /// JSON file holding the history array (`[{role, content, mod?}]`).
        #[arg(long)]
        history: Option<PathBuf>,
        /// Force a mode, e.g. `career-direction`.
        #[arg(long)]
        forced_mode: Option<String>,
    },
    /// List the coaching modes as JSON.
    Modes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("warning: failed to read .env: {e}");
        }
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve => handle_serve().await,
        Command::Triage {
            message,
            history,
            forced_mode,
        } => handle_triage(message, history, forced_mode),
        Command::Modes => handle_modes(),
    }
}

/// Run the HTTP API until Ctrl-C.
async fn handle_serve() -> anyhow::Result<()> {
    let config = VisiConfig::load().context("failed to load configuration")?;
    let _logging_guard =
        visi::logging::init_production(&config.logging.logs_path(), &config.logging.level)?;

    let provider = build_provider(&config.llm).context("failed to create text-generation provider")?;
    info!(
        model = provider.model_id(),
        bind = %config.server.bind,
        history_window = config.triage.history_window,
        match_strategy = ?config.triage.match_strategy,
        "visi starting"
    );

    let coach = Coach::new(provider, CoachSettings::from_config(&config))
        .with_formatter(Arc::new(ProfileDigest));
    let state = AppState {
        coach: Arc::new(coach),
    };

    server::serve(state, &config.server).await
}

/// Print the turn analysis for one message.
fn handle_triage(
    message: String,
    history: Option<PathBuf>,
    forced_mode: Option<String>,
) -> anyhow::Result<()> {
    let config = VisiConfig::load().context("failed to load configuration")?;
    visi::logging::init_cli(&config.logging.level);

    let history: Vec<ChatMessage> = match history {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let value: serde_json::Value = serde_json::from_str(&raw)
                .with_context(|| format!("invalid history JSON in {}", path.display()))?;
            history_from_value(&value)
        }
        None => Vec::new(),
    };

    let request = ChatRequest {
        history,
        forced_mode,
        ..ChatRequest::new(message)
    };

    let coach = Coach::new(Arc::new(Offline), CoachSettings::from_config(&config));
    let analysis = coach.prepare(&request).analysis;
    println!(
        "{}",
        serde_json::to_string_pretty(&analysis).context("failed to render analysis")?
    );
    Ok(())
}

/// Print the mode catalogue.
fn handle_modes() -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&mode_catalogue()).context("failed to render modes")?
    );
    Ok(())
}

/// Stand-in provider for offline analysis; `prepare` never calls it.
struct Offline;

#[async_trait::async_trait]
impl LlmProvider for Offline {
    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        warn!("offline provider asked to generate");
        Err(ProviderError::Empty)
    }

    fn supports_images(&self) -> bool {
        false
    }

    fn model_id(&self) -> &str {
        "offline/none"
    }
}
