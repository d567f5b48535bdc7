//! Configuration loading and management.
//!
//! Loads Visi configuration from `./visi.toml` (or `$VISI_CONFIG_PATH`).
//! Environment variables override file values; file values override defaults.
//!
//! Precedence: env vars > config file > defaults.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::providers::gemini::DEFAULT_GEMINI_URL;
use crate::providers::ollama::DEFAULT_OLLAMA_URL;
use crate::triage::lexicon::MatchStrategy;
use crate::triage::{TriageSettings, DEFAULT_HISTORY_WINDOW};

// ── Top-level config ────────────────────────────────────────────

/// Top-level Visi configuration loaded from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VisiConfig {
    /// HTTP server settings (`[server]`).
    pub server: ServerConfig,
    /// Text-generation provider settings (`[llm]`).
    pub llm: LlmConfig,
    /// Triage tuning (`[triage]`).
    pub triage: TriageConfig,
    /// Log output (`[logging]`).
    pub logging: LoggingConfig,
}

impl VisiConfig {
    /// Load configuration with precedence: env vars > TOML file > defaults.
    ///
    /// If the file does not exist, returns defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_from_file() -> Result<Self> {
        let path = Self::config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::info!(path = %path.display(), "loading config from file");
                Self::from_toml(&contents)
                    .with_context(|| format!("invalid config file {}", path.display()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("no config file found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "failed to read config file {}: {e}",
                path.display()
            )),
        }
    }

    fn config_path() -> PathBuf {
        Self::config_path_with(|key| std::env::var(key).ok())
    }

    /// Resolve the config path using a custom env resolver.
    fn config_path_with(env: impl Fn(&str) -> Option<String>) -> PathBuf {
        env("VISI_CONFIG_PATH")
            .filter(|p| !p.trim().is_empty())
            .map_or_else(|| PathBuf::from("visi.toml"), PathBuf::from)
    }

    /// Apply environment variable overrides (env > config > defaults).
    ///
    /// Takes a resolver function so tests never touch the process environment.
    pub fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        // Server.
        if let Some(v) = env("VISI_BIND") {
            self.server.bind = v;
        }
        if let Some(v) = env("VISI_CORS_ORIGINS") {
            self.server.cors_origins = v
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_owned)
                .collect();
        }

        // LLM.
        if let Some(v) = env("GEMINI_API_KEY") {
            self.llm.gemini_api_key = Some(v);
        }
        if let Some(v) = env("VISI_MODEL") {
            self.llm.model = v;
        }
        if let Some(v) = env("VISI_GEMINI_URL") {
            self.llm.gemini_url = v;
        }
        if let Some(v) = env("VISI_OLLAMA_URL") {
            self.llm.ollama_url = v;
        }
        if let Some(v) = env("VISI_REQUEST_TIMEOUT_SECS") {
            match v.parse() {
                Ok(n) => self.llm.request_timeout_secs = n,
                Err(_) => tracing::warn!(
                    var = "VISI_REQUEST_TIMEOUT_SECS",
                    value = %v,
                    "ignoring invalid env override"
                ),
            }
        }

        // Triage.
        if let Some(v) = env("VISI_HISTORY_WINDOW") {
            match v.parse() {
                Ok(n) => self.triage.history_window = n,
                Err(_) => tracing::warn!(
                    var = "VISI_HISTORY_WINDOW",
                    value = %v,
                    "ignoring invalid env override"
                ),
            }
        }
        if let Some(v) = env("VISI_MATCH_STRATEGY") {
            match MatchStrategy::parse(&v) {
                Some(strategy) => self.triage.match_strategy = strategy,
                None => tracing::warn!(
                    var = "VISI_MATCH_STRATEGY",
                    value = %v,
                    "ignoring invalid env override"
                ),
            }
        }

        // Logging.
        if let Some(v) = env("VISI_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = env("VISI_LOGS_DIR") {
            self.logging.logs_dir = Some(v);
        }
    }

    /// Parse a TOML string into config.
    ///
    /// # Errors
    ///
    /// Returns an error when the TOML is malformed or a field has the wrong type.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: VisiConfig = toml::from_str(toml_str).context("failed to parse config TOML")?;
        Ok(config)
    }
}

// ── Server config ───────────────────────────────────────────────

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
    /// Browser origins allowed by CORS. `*` allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_owned(),
            cors_origins: vec!["http://localhost:3000".to_owned()],
        }
    }
}

// ── LLM config ──────────────────────────────────────────────────

/// Text-generation provider settings.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// `provider/model` spec, e.g. `gemini/gemini-2.5-flash` or `ollama/llama3`.
    pub model: String,
    /// Gemini API key; required when the model spec names `gemini`.
    pub gemini_api_key: Option<String>,
    /// Gemini API base URL.
    pub gemini_url: String,
    /// Ollama base URL.
    pub ollama_url: String,
    /// Upper bound on one generation call, in seconds.
    pub request_timeout_secs: u64,
    /// Response token cap.
    pub max_output_tokens: Option<u32>,
}

impl LlmConfig {
    /// Generation timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("model", &self.model)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "__REDACTED__"),
            )
            .field("gemini_url", &self.gemini_url)
            .field("ollama_url", &self.ollama_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gemini/gemini-2.5-flash".to_owned(),
            gemini_api_key: None,
            gemini_url: DEFAULT_GEMINI_URL.to_owned(),
            ollama_url: DEFAULT_OLLAMA_URL.to_owned(),
            request_timeout_secs: 60,
            max_output_tokens: Some(2048),
        }
    }
}

// ── Triage config ───────────────────────────────────────────────

/// Triage tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// How many trailing history entries join the current message when scoring.
    pub history_window: usize,
    /// Lexicon matching rule.
    pub match_strategy: MatchStrategy,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            history_window: DEFAULT_HISTORY_WINDOW,
            match_strategy: MatchStrategy::default(),
        }
    }
}

impl TriageConfig {
    /// Engine settings for this configuration.
    pub fn settings(&self) -> TriageSettings {
        TriageSettings {
            history_window: self.history_window,
            match_strategy: self.match_strategy,
        }
    }
}

// ── Logging config ──────────────────────────────────────────────

/// Log output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
    /// Directory for rotated JSON logs. Defaults to the platform data dir.
    pub logs_dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            logs_dir: None,
        }
    }
}

impl LoggingConfig {
    /// Resolved logs directory: configured value, else `<data dir>/visi/logs`,
    /// else `./logs`.
    pub fn logs_path(&self) -> PathBuf {
        if let Some(dir) = self.logs_dir.as_deref().filter(|d| !d.trim().is_empty()) {
            return PathBuf::from(dir);
        }
        directories::ProjectDirs::from("", "", "visi").map_or_else(
            || PathBuf::from("logs"),
            |dirs| dirs.data_local_dir().join("logs"),
        )
    }
}

// ── Tests ───────────────────────────────────────────────────────
