//! Provider construction from the configured `provider/model` spec.

use std::sync::Arc;

use url::Url;

use crate::config::LlmConfig;

use super::gemini::GeminiProvider;
use super::ollama::OllamaProvider;
use super::LlmProvider;

/// Provider routing errors.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// Model spec is not in `<provider>/<model>` format.
    #[error("invalid model spec '{spec}', expected '<provider>/<model>'")]
    InvalidModelSpec {
        /// Invalid raw spec.
        spec: String,
    },
    /// Unsupported provider type in spec prefix.
    #[error("unsupported provider '{provider}'")]
    UnsupportedProvider {
        /// Unsupported provider prefix.
        provider: String,
    },
    /// Required API credential missing for selected provider.
    #[error("missing credential for provider '{provider}': {key}")]
    MissingCredential {
        /// Provider name.
        provider: String,
        /// Missing credential key.
        key: String,
    },
    /// Configured base URL is not an absolute http(s) URL.
    #[error("invalid base url for provider '{provider}': {url}")]
    InvalidBaseUrl {
        /// Provider name.
        provider: String,
        /// Rejected value.
        url: String,
    },
}

/// A `provider/model` spec split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    /// Provider prefix, e.g. `gemini`.
    pub provider: String,
    /// Model name passed to the provider.
    pub model: String,
}

/// Split a `provider/model` spec. Only the first `/` separates; model names
/// may contain further slashes.
///
/// # Errors
///
/// Returns [`RouterError::InvalidModelSpec`] when either side is empty.
pub fn parse_model_spec(spec: &str) -> Result<ModelSpec, RouterError> {
    let mut split = spec.trim().splitn(2, '/');
    let provider = split.next().unwrap_or_default();
    let model = split.next().unwrap_or_default();
    if provider.is_empty() || model.is_empty() {
        return Err(RouterError::InvalidModelSpec {
            spec: spec.to_owned(),
        });
    }
    Ok(ModelSpec {
        provider: provider.to_ascii_lowercase(),
        model: model.to_owned(),
    })
}

fn base_url(provider: &str, raw: &str) -> Result<String, RouterError> {
    match Url::parse(raw.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {
            Ok(url.as_str().to_owned())
        }
        _ => Err(RouterError::InvalidBaseUrl {
            provider: provider.to_owned(),
            url: raw.to_owned(),
        }),
    }
}

/// Instantiate the provider named by `llm.model`.
///
/// # Errors
///
/// Returns [`RouterError`] for a malformed spec, an unknown provider, a
/// Gemini spec without an API key, or a base URL that is not http(s).
pub fn build_provider(llm: &LlmConfig) -> Result<Arc<dyn LlmProvider>, RouterError> {
    let spec = parse_model_spec(&llm.model)?;
    match spec.provider.as_str() {
        "gemini" => {
            let key = llm
                .gemini_api_key
                .as_deref()
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .ok_or_else(|| RouterError::MissingCredential {
                    provider: spec.provider.clone(),
                    key: "GEMINI_API_KEY".to_owned(),
                })?;
            let url = base_url(&spec.provider, &llm.gemini_url)?;
            Ok(Arc::new(
                GeminiProvider::new(llm.model.clone(), spec.model, key.to_owned())
                    .with_base_url(url),
            ))
        }
        "ollama" => {
            let url = base_url(&spec.provider, &llm.ollama_url)?;
            Ok(Arc::new(
                OllamaProvider::new(llm.model.clone(), spec.model).with_base_url(url),
            ))
        }
        _ => Err(RouterError::UnsupportedProvider {
            provider: spec.provider,
        }),
    }
}
