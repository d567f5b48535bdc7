//! Full turns against a scripted provider.

use std::sync::Arc;
use std::time::Duration;

use visi::coach::{ChatRequest, Coach, CoachError, CoachSettings};
use visi::providers::ProviderError;
use visi::triage::safety::RiskLevel;
use visi::types::{ChatMessage, Mode};

use crate::fake_provider::{FakeProvider, Script};

fn settings() -> CoachSettings {
    CoachSettings {
        request_timeout: Duration::from_millis(50),
        ..CoachSettings::default()
    }
}

#[tokio::test]
async fn reply_carries_text_and_mode_metadata() {
    let provider = Arc::new(FakeProvider::new(Script::Reply("Derin bir nefes al.")));
    let coach = Coach::new(provider.clone(), settings());
    let request = ChatRequest {
        history: vec![
            ChatMessage::user("Plan lazım"),
            ChatMessage::model("İşte planın.", Mode::Academic),
        ],
        ..ChatRequest::new("Çok stresliyim")
    };

    let reply = coach.respond(request).await.expect("reply");
    assert_eq!(reply.text, "Derin bir nefes al.");
    assert_eq!(reply.mode, Mode::AnxietySupport);
    assert_eq!(reply.safety_status, RiskLevel::Medium);
    assert_eq!(reply.model, "fake-model");
    assert!(reply.announcement.is_some());

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    // history pair, transition pair, final turn
    assert_eq!(requests[0].messages.len(), 5);

    let value = serde_json::to_value(&reply).expect("serializable");
    assert_eq!(value["mod"], "focus-anxiety");
    assert_eq!(value["safetyStatus"], "medium");
    assert!(value["modReason"].is_string());
}

#[tokio::test]
async fn provider_failure_is_a_generation_error() {
    let coach = Coach::new(Arc::new(FakeProvider::new(Script::Fail)), settings());
    let err = coach
        .respond(ChatRequest::new("Selam"))
        .await
        .expect_err("provider fails");
    assert!(matches!(
        err,
        CoachError::Generation(ProviderError::HttpStatus { status: 500, .. })
    ));
    assert!(!err.user_message().contains("upstream"));
}

#[tokio::test]
async fn slow_provider_times_out() {
    let coach = Coach::new(Arc::new(FakeProvider::new(Script::Stall)), settings());
    let err = coach
        .respond(ChatRequest::new("Selam"))
        .await
        .expect_err("provider stalls");
    assert!(matches!(err, CoachError::Timeout(d) if d == Duration::from_millis(50)));
    assert_eq!(err.user_message(), "Yanıt çok uzun sürdü. Lütfen tekrar dene.");
}
