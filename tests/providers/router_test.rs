//! Provider construction from configuration.

use visi::config::LlmConfig;
use visi::providers::router::{build_provider, parse_model_spec, RouterError};

fn llm(model: &str, key: Option<&str>) -> LlmConfig {
    LlmConfig {
        model: model.to_owned(),
        gemini_api_key: key.map(str::to_owned),
        ..LlmConfig::default()
    }
}

#[test]
fn parse_model_spec_splits_on_first_slash() {
    let spec = parse_model_spec("ollama/library/qwen3:8b").expect("should parse");
    assert_eq!(spec.provider, "ollama");
    assert_eq!(spec.model, "library/qwen3:8b");
}

#[test]
fn parse_model_spec_rejects_missing_parts() {
    for raw in ["no-slash", "/model", "provider/", ""] {
        assert!(
            matches!(parse_model_spec(raw), Err(RouterError::InvalidModelSpec { .. })),
            "{raw} should be rejected"
        );
    }
}

#[test]
fn gemini_requires_api_key() {
    let err = build_provider(&llm("gemini/gemini-2.5-flash", None)).err();
    match err {
        Some(RouterError::MissingCredential { provider, key }) => {
            assert_eq!(provider, "gemini");
            assert_eq!(key, "GEMINI_API_KEY");
        }
        other => panic!("expected missing credential, got: {other:?}"),
    }
}

#[test]
fn blank_gemini_key_counts_as_missing() {
    assert!(matches!(
        build_provider(&llm("gemini/gemini-2.5-flash", Some("  "))),
        Err(RouterError::MissingCredential { .. })
    ));
}

#[test]
fn gemini_with_key_builds() {
    let provider =
        build_provider(&llm("gemini/gemini-2.5-flash", Some("AIza-key"))).expect("should build");
    assert_eq!(provider.model_id(), "gemini/gemini-2.5-flash");
}

#[test]
fn ollama_needs_no_credentials() {
    let provider = build_provider(&llm("ollama/llama3", None)).expect("should build");
    assert_eq!(provider.model_id(), "ollama/llama3");
}

#[test]
fn unknown_provider_is_rejected() {
    assert!(matches!(
        build_provider(&llm("anthropic/claude", Some("k"))),
        Err(RouterError::UnsupportedProvider { provider }) if provider == "anthropic"
    ));
}

#[test]
fn non_http_base_url_is_rejected() {
    let config = LlmConfig {
        ollama_url: "localhost:11434".to_owned(),
        ..llm("ollama/llama3", None)
    };
    assert!(matches!(
        build_provider(&config),
        Err(RouterError::InvalidBaseUrl { provider, .. }) if provider == "ollama"
    ));
}

#[test]
fn base_url_trailing_slash_is_tolerated() {
    let config = LlmConfig {
        gemini_url: "https://generativelanguage.googleapis.com/".to_owned(),
        ..llm("gemini/gemini-2.5-flash", Some("AIza-key"))
    };
    assert!(build_provider(&config).is_ok());
}
