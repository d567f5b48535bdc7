//! Text-generation provider abstraction.
//!
//! Defines the [`LlmProvider`] trait and the shared request/response types
//! used by all provider implementations.
//!
//! Two providers are implemented:
//! - [`gemini::GeminiProvider`]: Google `generateContent` API
//! - [`ollama::OllamaProvider`]: Ollama `/api/chat` API
//!
//! [`router::build_provider`] instantiates the configured one.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub mod gemini;
pub mod ollama;
pub mod router;

// ---------------------------------------------------------------------------
// Core types
// ---------------------------------------------------------------------------

/// Conversation participant role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The student (or the composed prompt standing in for them).
    User,
    /// The model.
    Assistant,
}

/// A message in a conversation with an LLM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message author.
    pub role: Role,
    /// Plain text content.
    pub content: String,
}

impl Message {
    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// An assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Inline image sent with the final user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    /// MIME type, e.g. `image/png`.
    pub mime_type: String,
    /// Base64 payload without the data-URL prefix.
    pub data: String,
}

/// Why a data URL could not be turned into an [`ImageAttachment`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ImageError {
    /// Not of the form `data:<mime>;base64,<payload>`.
    #[error("image is not a base64 data URL")]
    NotDataUrl,
    /// MIME type is not `image/*`.
    #[error("unsupported image type '{0}'")]
    UnsupportedType(String),
    /// Payload is not valid base64.
    #[error("image payload is not valid base64")]
    InvalidBase64,
}

impl ImageAttachment {
    /// Parse a browser data URL (`data:image/png;base64,....`).
    ///
    /// # Errors
    ///
    /// Returns [`ImageError`] when the URL is malformed, not an image, or the
    /// payload does not decode.
    pub fn from_data_url(url: &str) -> Result<Self, ImageError> {
        let rest = url.trim().strip_prefix("data:").ok_or(ImageError::NotDataUrl)?;
        let (meta, payload) = rest.split_once(',').ok_or(ImageError::NotDataUrl)?;
        let mime_type = meta
            .strip_suffix(";base64")
            .ok_or(ImageError::NotDataUrl)?
            .trim()
            .to_ascii_lowercase();
        if !mime_type.starts_with("image/") {
            return Err(ImageError::UnsupportedType(mime_type));
        }
        let payload = payload.trim();
        if payload.is_empty() || STANDARD.decode(payload).is_err() {
            return Err(ImageError::InvalidBase64);
        }
        Ok(Self {
            mime_type,
            data: payload.to_owned(),
        })
    }
}

// ---------------------------------------------------------------------------
// Request / Response
// ---------------------------------------------------------------------------

/// A request to an LLM provider for a completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Conversation history including the final user turn.
    pub messages: Vec<Message>,
    /// System instruction, when the provider supports one.
    pub system: Option<String>,
    /// Image attached to the final user turn.
    pub image: Option<ImageAttachment>,
    /// Maximum tokens in the response.
    pub max_tokens: Option<u32>,
}

/// Usage statistics for a completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UsageStats {
    /// Tokens used in the prompt/input.
    pub input_tokens: u32,
    /// Tokens generated in the response.
    pub output_tokens: u32,
}

/// The response from an LLM provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    /// Generated text.
    pub text: String,
    /// Token usage.
    pub usage: UsageStats,
    /// The model identifier that served this response.
    pub model: String,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned by model providers.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP transport failure.
    #[error("provider request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Response did not match expected schema.
    #[error("provider response parse error: {0}")]
    Parse(String),
    /// Upstream provider responded with an error status.
    #[error("provider returned non-success status {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Sanitized response body.
        body: String,
    },
    /// The provider answered without any text.
    #[error("provider returned no content")]
    Empty,
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

/// Check HTTP response status and return body text or a structured error.
///
/// # Errors
///
/// Returns `ProviderError::Request` on transport failure, `ProviderError::HttpStatus` on non-2xx.
pub async fn check_http_response(response: reqwest::Response) -> Result<String, ProviderError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ProviderError::HttpStatus {
            status: status.as_u16(),
            body: sanitize_http_error_body(&body),
        });
    }
    Ok(body)
}

const MAX_ERROR_BODY_CHARS: usize = 256;

const SECRET_PATTERNS: &[&str] = &[
    r"AIza[0-9A-Za-z_\-]{30,}",
    r"ya29\.[0-9A-Za-z_\-]{20,}",
    r"sk-[A-Za-z0-9]{32,}",
    r"(?i)bearer\s+[A-Za-z0-9._\-]{16,}",
];

/// Collapse whitespace, redact token-like strings and cap the length of an
/// upstream error body.
#[doc(hidden)]
pub fn sanitize_http_error_body(raw: &str) -> String {
    let mut sanitized = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    for pattern in SECRET_PATTERNS {
        if let Ok(regex) = Regex::new(pattern) {
            sanitized = regex.replace_all(&sanitized, "[REDACTED]").into_owned();
        }
    }

    if sanitized.chars().count() > MAX_ERROR_BODY_CHARS {
        let shortened = sanitized
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect::<String>();
        return format!("{shortened}...[truncated]");
    }

    sanitized
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Core text-generation interface.
///
/// Implementations must be `Send + Sync`; one instance serves every request.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Request a completion.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on API, network, or parse failure.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError>;

    /// Whether the model accepts inline images.
    fn supports_images(&self) -> bool;

    /// The `provider/model` spec this instance serves.
    fn model_id(&self) -> &str;
}
