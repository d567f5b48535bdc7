//! Turn orchestration: request parsing, analysis, composition and generation.
//!
//! [`Coach::prepare`] is pure and never calls the model; [`Coach::respond`]
//! adds one provider call bounded by the configured timeout.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::analytics::{render_blocks, AnalyticsFormatter};
use crate::composer::{compose, ComposeInput, ComposedPrompt};
use crate::config::VisiConfig;
use crate::providers::{
    CompletionRequest, ImageAttachment, LlmProvider, Message, ProviderError,
};
use crate::triage::safety::{RiskLevel, SafetyVerdict};
use crate::triage::transition::check_transition;
use crate::triage::{CategoryScores, EmotionalLoad, TriageEngine, TriageRule, TriageSettings};
use crate::types::{ChatMessage, ChatRole, Mode, StudentContext};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// One chat turn as sent by the client.
///
/// Parsing is lenient: history entries with an unknown role are dropped,
/// malformed student context fields are dropped one by one, and an unknown
/// forced mode is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatRequest {
    /// Current student message.
    pub message: String,
    /// Client-held history, oldest first.
    #[serde(deserialize_with = "lenient_history")]
    pub history: Vec<ChatMessage>,
    /// Self-reported student state.
    #[serde(deserialize_with = "lenient_fields")]
    pub student_context: StudentContext,
    /// Opaque analytics payload handed to the formatters.
    pub student_data: Option<Value>,
    /// Attached image as a base64 data URL.
    pub image: Option<String>,
    /// Mode chosen in the UI, e.g. `career-direction`.
    pub forced_mode: Option<String>,
}

impl ChatRequest {
    /// A request carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }
}

/// Read a history array, dropping entries without a known role. Anything
/// other than an array yields an empty history.
pub fn history_from_value(value: &Value) -> Vec<ChatMessage> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(history_entry).collect())
        .unwrap_or_default()
}

fn lenient_history<'de, D>(deserializer: D) -> Result<Vec<ChatMessage>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(history_from_value(&Value::deserialize(deserializer)?))
}

fn history_entry(value: &Value) -> Option<ChatMessage> {
    let role = match value.get("role")?.as_str()? {
        "user" => ChatRole::User,
        "model" | "assistant" => ChatRole::Model,
        _ => return None,
    };
    let content = value
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();
    let mode = value.get("mod").and_then(Value::as_str).and_then(Mode::parse);
    Some(ChatMessage {
        role,
        content,
        mode,
    })
}

fn lenient_fields<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(from_value_lenient(Value::deserialize(deserializer)?))
}

/// Deserialize an object field by field, dropping the fields that do not fit
/// `T` and keeping the rest. Anything other than an object yields the default.
///
/// `T` must fill missing fields itself (`#[serde(default)]`), otherwise every
/// field is dropped.
pub fn from_value_lenient<T>(value: Value) -> T
where
    T: DeserializeOwned + Default,
{
    let fields = match value {
        Value::Object(fields) => fields,
        Value::Null => return T::default(),
        other => {
            warn!(kind = json_kind(&other), "ignoring non-object field, using defaults");
            return T::default();
        }
    };

    let mut kept = Map::new();
    let mut dropped: Vec<String> = Vec::new();
    for (key, field) in fields {
        let mut single = Map::new();
        single.insert(key.clone(), field);
        if serde_json::from_value::<T>(Value::Object(single.clone())).is_ok() {
            kept.extend(single);
        } else {
            dropped.push(key);
        }
    }
    if !dropped.is_empty() {
        warn!(fields = ?dropped, "ignoring malformed fields");
    }

    serde_json::from_value(Value::Object(kept)).unwrap_or_default()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Everything decided about a turn before the model is called.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnAnalysis {
    /// Active mode.
    pub mode: Mode,
    /// Rule that selected the mode.
    pub rule: TriageRule,
    /// Turkish explanation of the selection.
    pub reason: String,
    /// Emotional load estimate.
    pub emotional_load: EmotionalLoad,
    /// Whether academic content may be offered.
    pub academic_ready: bool,
    /// Category hit counts.
    pub scores: CategoryScores,
    /// Risk level of the current message.
    pub safety_risk_level: RiskLevel,
    /// Full safety verdict.
    pub safety: SafetyVerdict,
    /// Transition announcement, when the mode changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub announcement: Option<String>,
    /// Icon plus display name of the active mode.
    pub mode_badge: String,
    /// Outbound prompt.
    pub composed_prompt: ComposedPrompt,
}

/// Analysis plus the provider request built from it.
#[derive(Debug, Clone)]
pub struct PreparedTurn {
    /// Turn analysis.
    pub analysis: TurnAnalysis,
    /// Request for the provider.
    pub request: CompletionRequest,
}

/// Reply to one chat turn.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    /// Model output.
    pub text: String,
    /// Mode tag the client stores on the model entry.
    #[serde(rename = "mod")]
    pub mode: Mode,
    /// Why the mode was chosen.
    pub mod_reason: String,
    /// Emotional load estimate.
    pub emotional_load: EmotionalLoad,
    /// Whether academic content may be offered.
    pub academic_ready: bool,
    /// Risk level of the current message.
    pub safety_status: RiskLevel,
    /// Transition announcement, when the mode changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub announcement: Option<String>,
    /// Icon plus display name of the active mode.
    pub mode_badge: String,
    /// Model that produced the text.
    pub model: String,
}

/// Why a turn produced no reply.
#[derive(Debug, thiserror::Error)]
pub enum CoachError {
    /// The provider failed.
    #[error("generation failed: {0}")]
    Generation(#[from] ProviderError),
    /// The provider did not answer in time.
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),
}

impl CoachError {
    /// Plain-language Turkish message for the student.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Generation(_) => "Şu anda yanıt oluşturulamadı. Lütfen biraz sonra tekrar dene.",
            Self::Timeout(_) => "Yanıt çok uzun sürdü. Lütfen tekrar dene.",
        }
    }
}

// ---------------------------------------------------------------------------
// Coach
// ---------------------------------------------------------------------------

/// Tunables for [`Coach`].
#[derive(Debug, Clone, Copy)]
pub struct CoachSettings {
    /// Triage settings.
    pub triage: TriageSettings,
    /// Upper bound on one generation call.
    pub request_timeout: Duration,
    /// Response token cap.
    pub max_tokens: Option<u32>,
}

impl Default for CoachSettings {
    fn default() -> Self {
        Self {
            triage: TriageSettings::default(),
            request_timeout: Duration::from_secs(60),
            max_tokens: Some(2048),
        }
    }
}

impl CoachSettings {
    /// Settings drawn from the loaded configuration.
    pub fn from_config(config: &VisiConfig) -> Self {
        Self {
            triage: config.triage.settings(),
            request_timeout: config.llm.request_timeout(),
            max_tokens: config.llm.max_output_tokens,
        }
    }
}

/// Stateless turn handler shared by every request.
pub struct Coach {
    provider: Arc<dyn LlmProvider>,
    engine: TriageEngine,
    formatters: Vec<Arc<dyn AnalyticsFormatter>>,
    settings: CoachSettings,
}

impl Coach {
    /// Create a coach with no analytics formatters.
    pub fn new(provider: Arc<dyn LlmProvider>, settings: CoachSettings) -> Self {
        Self {
            provider,
            engine: TriageEngine::new(settings.triage),
            formatters: Vec::new(),
            settings,
        }
    }

    /// Attach an analytics formatter. Blocks render in attachment order.
    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn AnalyticsFormatter>) -> Self {
        self.formatters.push(formatter);
        self
    }

    /// `provider/model` spec of the backing provider.
    pub fn model_id(&self) -> &str {
        self.provider.model_id()
    }

    fn attachment(&self, request: &ChatRequest) -> Option<ImageAttachment> {
        let url = request.image.as_deref().filter(|u| !u.trim().is_empty())?;
        let image = match ImageAttachment::from_data_url(url) {
            Ok(image) => image,
            Err(e) => {
                warn!(error = %e, "dropping invalid image attachment");
                return None;
            }
        };
        if !self.provider.supports_images() {
            warn!(model = self.provider.model_id(), "provider has no image input, dropping attachment");
            return None;
        }
        Some(image)
    }

    /// Analyse a turn and build the provider request. Never calls the model.
    pub fn prepare(&self, request: &ChatRequest) -> PreparedTurn {
        let context = &request.student_context;
        let assessment = self
            .engine
            .assess(&request.message, context, &request.history);

        let forced = request.forced_mode.as_deref().and_then(|raw| {
            let mode = Mode::parse(raw);
            if mode.is_none() {
                warn!(forced_mode = raw, "ignoring unknown forced mode");
            }
            mode
        });
        let triage = match forced {
            Some(mode) => assessment.triage.force(mode),
            None => assessment.triage,
        };

        let image = self.attachment(request);
        let analytics = match &request.student_data {
            Some(data) if !data.is_null() => render_blocks(&self.formatters, data),
            _ => Vec::new(),
        };

        let composed = compose(&ComposeInput {
            message: &request.message,
            context,
            history: &request.history,
            triage: &triage,
            safety: &assessment.safety,
            analytics: &analytics,
            has_image: image.is_some(),
        });
        let transition = check_transition(composed.previous_mode, triage.mode);

        let mut messages: Vec<Message> = composed
            .history
            .iter()
            .map(|turn| match turn.role {
                ChatRole::User => Message::user(turn.content.clone()),
                ChatRole::Model => Message::assistant(turn.content.clone()),
            })
            .collect();
        messages.push(Message::user(composed.final_turn.clone()));

        let completion = CompletionRequest {
            messages,
            system: None,
            image,
            max_tokens: self.settings.max_tokens,
        };

        let analysis = TurnAnalysis {
            mode: triage.mode,
            rule: triage.rule,
            reason: triage.reason,
            emotional_load: triage.emotional_load,
            academic_ready: triage.academic_ready,
            scores: triage.scores,
            safety_risk_level: assessment.safety.risk_level,
            safety: assessment.safety,
            announcement: transition.message,
            mode_badge: triage.mode.badge(),
            composed_prompt: composed,
        };

        PreparedTurn {
            analysis,
            request: completion,
        }
    }

    /// Run a full turn: analysis, composition and one generation call.
    ///
    /// # Errors
    ///
    /// Returns [`CoachError::Timeout`] when the provider exceeds the request
    /// timeout and [`CoachError::Generation`] when it fails.
    pub async fn respond(&self, request: ChatRequest) -> Result<ChatReply, CoachError> {
        let PreparedTurn { analysis, request: completion } = self.prepare(&request);
        info!(
            mode = %analysis.mode,
            rule = ?analysis.rule,
            risk = analysis.safety_risk_level.as_str(),
            message_chars = request.message.chars().count(),
            history_len = request.history.len(),
            has_image = completion.image.is_some(),
            "turn prepared"
        );

        let started = Instant::now();
        let timeout = self.settings.request_timeout;
        let response = tokio::time::timeout(timeout, self.provider.complete(completion))
            .await
            .map_err(|_| {
                warn!(model = self.provider.model_id(), ?timeout, "generation timed out");
                CoachError::Timeout(timeout)
            })?
            .inspect_err(|e| warn!(model = self.provider.model_id(), error = %e, "generation failed"))?;

        info!(
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "turn complete"
        );

        Ok(ChatReply {
            text: response.text,
            mode: analysis.mode,
            mod_reason: analysis.reason,
            emotional_load: analysis.emotional_load,
            academic_ready: analysis.academic_ready,
            safety_status: analysis.safety_risk_level,
            announcement: analysis.announcement,
            mode_badge: analysis.mode_badge,
            model: response.model,
        })
    }
}
