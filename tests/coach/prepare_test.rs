//! Turn preparation without a model call.

use std::sync::Arc;

use serde_json::json;
use visi::analytics::ProfileDigest;
use visi::coach::{ChatRequest, Coach, CoachSettings};
use visi::providers::Role;
use visi::triage::safety::RiskLevel;
use visi::triage::transition::{transition_message, TRANSITION_MARKER};
use visi::triage::TriageRule;
use visi::types::{ChatMessage, Mode};

use crate::fake_provider::{FakeProvider, Script};

const PNG_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgo=";

fn coach() -> Coach {
    Coach::new(
        Arc::new(FakeProvider::new(Script::Reply("ok"))),
        CoachSettings::default(),
    )
}

fn academic_history() -> Vec<ChatMessage> {
    vec![
        ChatMessage::user("Plan lazım"),
        ChatMessage::model("İşte planın.", Mode::Academic),
    ]
}

#[test]
fn first_turn_request_is_primed_and_final_turn_last() {
    let prepared = coach().prepare(&ChatRequest::new("Bugün ne çalışmalıyım?"));

    let messages = &prepared.request.messages;
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(messages[2].role, Role::User);
    assert_eq!(messages[2].content, prepared.analysis.composed_prompt.final_turn);
    assert!(prepared.request.system.is_none());
    assert_eq!(prepared.request.max_tokens, Some(2048));

    assert_eq!(prepared.analysis.mode, Mode::Academic);
    assert_eq!(prepared.analysis.safety_risk_level, RiskLevel::None);
    assert!(prepared.analysis.announcement.is_none());
    assert_eq!(prepared.analysis.mode_badge, Mode::Academic.badge());
}

#[test]
fn mode_change_is_announced() {
    let request = ChatRequest {
        history: academic_history(),
        ..ChatRequest::new("Çok stresliyim")
    };
    let analysis = coach().prepare(&request).analysis;

    assert_eq!(analysis.mode, Mode::AnxietySupport);
    let announcement = analysis.announcement.expect("mode changed");
    assert!(announcement.starts_with(TRANSITION_MARKER));
    assert!(announcement.ends_with(transition_message(Mode::AnxietySupport)));
}

#[test]
fn same_mode_is_not_announced() {
    let request = ChatRequest {
        history: academic_history(),
        ..ChatRequest::new("Matematik sorularında zorlanıyorum")
    };
    assert!(coach().prepare(&request).analysis.announcement.is_none());
}

#[test]
fn forced_mode_overrides_triage() {
    let request = ChatRequest {
        forced_mode: Some("career-direction".to_owned()),
        ..ChatRequest::new("Matematik sorularında zorlanıyorum")
    };
    let analysis = coach().prepare(&request).analysis;
    assert_eq!(analysis.mode, Mode::CareerDirection);
    assert_eq!(analysis.rule, TriageRule::Forced);
    assert!(analysis.academic_ready);
}

#[test]
fn forced_regulation_mode_holds_academic_content_back() {
    let request = ChatRequest {
        forced_mode: Some("anxiety-support".to_owned()),
        ..ChatRequest::new("Matematik sorularında zorlanıyorum")
    };
    let analysis = coach().prepare(&request).analysis;
    assert_eq!(analysis.mode, Mode::AnxietySupport);
    assert!(!analysis.academic_ready);
    assert!(analysis
        .composed_prompt
        .final_turn
        .contains("[AKADEMİK HAZIRLIK: HAYIR]"));
}

#[test]
fn forced_mode_cannot_override_crisis() {
    let request = ChatRequest {
        forced_mode: Some("academic".to_owned()),
        ..ChatRequest::new("Artık dayanamıyorum")
    };
    let analysis = coach().prepare(&request).analysis;
    assert_eq!(analysis.mode, Mode::CrisisSupport);
    assert_eq!(analysis.rule, TriageRule::CriticalSafety);
    assert_eq!(analysis.safety_risk_level, RiskLevel::Critical);
    assert!(analysis.composed_prompt.final_turn.contains("KRİTİK GÜVENLİK UYARISI"));
}

#[test]
fn young_student_keeps_restricted_career_wording_despite_bad_field() {
    let request: ChatRequest = serde_json::from_value(json!({
        "message": "Hangi meslek bana uygun?",
        "studentContext": {"level": "middle-school", "currentEnergy": "hyper"}
    }))
    .expect("lenient");
    let analysis = coach().prepare(&request).analysis;
    assert_eq!(analysis.mode, Mode::CareerDirection);
    let final_turn = &analysis.composed_prompt.final_turn;
    assert!(final_turn.contains("GELİŞİM YÖNÜ MODU AKTİF"));
    assert!(!final_turn.contains("KARİYER YÖN MODU AKTİF"));
}

#[test]
fn unknown_forced_mode_is_ignored() {
    let request = ChatRequest {
        forced_mode: Some("zen".to_owned()),
        ..ChatRequest::new("Hangi meslek bana uygun?")
    };
    let analysis = coach().prepare(&request).analysis;
    assert_eq!(analysis.mode, Mode::CareerDirection);
    assert_eq!(analysis.rule, TriageRule::CareerSignal);
}

#[test]
fn valid_image_is_attached_with_solver_directive() {
    let request = ChatRequest {
        image: Some(PNG_DATA_URL.to_owned()),
        ..ChatRequest::new("Bu soruyu çözer misin?")
    };
    let prepared = coach().prepare(&request);
    let image = prepared.request.image.expect("attached");
    assert_eq!(image.mime_type, "image/png");
    assert!(prepared
        .analysis
        .composed_prompt
        .final_turn
        .contains("GÖRSEL SORU ÇÖZÜM MODU AKTİF"));
}

#[test]
fn invalid_image_is_dropped() {
    let request = ChatRequest {
        image: Some("https://example.com/soru.png".to_owned()),
        ..ChatRequest::new("Bu soruyu çözer misin?")
    };
    let prepared = coach().prepare(&request);
    assert!(prepared.request.image.is_none());
    assert!(!prepared
        .analysis
        .composed_prompt
        .final_turn
        .contains("GÖRSEL SORU"));
}

#[test]
fn image_is_dropped_for_text_only_provider() {
    let coach = Coach::new(
        Arc::new(FakeProvider::new(Script::Reply("ok")).text_only()),
        CoachSettings::default(),
    );
    let request = ChatRequest {
        image: Some(PNG_DATA_URL.to_owned()),
        ..ChatRequest::new("Bu soruyu çözer misin?")
    };
    assert!(coach.prepare(&request).request.image.is_none());
}

#[test]
fn student_data_renders_through_formatters() {
    let coach = coach().with_formatter(Arc::new(ProfileDigest));
    let request = ChatRequest {
        student_data: Some(json!({"name": "Elif", "targetExam": "TYT"})),
        ..ChatRequest::new("Bugün ne çalışmalıyım?")
    };
    let final_turn = coach.prepare(&request).analysis.composed_prompt.final_turn;
    assert!(final_turn.contains("👤 ÖĞRENCİ PROFİL ÖZETİ\n• Ad: Elif"));
}

#[test]
fn null_student_data_renders_nothing() {
    let coach = coach().with_formatter(Arc::new(ProfileDigest));
    let request = ChatRequest {
        student_data: Some(serde_json::Value::Null),
        ..ChatRequest::new("Bugün ne çalışmalıyım?")
    };
    let final_turn = coach.prepare(&request).analysis.composed_prompt.final_turn;
    assert!(!final_turn.contains("PROFİL ÖZETİ"));
}

#[test]
fn analysis_serializes_camel_case() {
    let analysis = coach().prepare(&ChatRequest::new("Çok stresliyim")).analysis;
    let value = serde_json::to_value(&analysis).expect("serializable");
    assert_eq!(value["mode"], "focus-anxiety");
    assert_eq!(value["rule"], "anxiety_signal");
    assert_eq!(value["emotionalLoad"], "medium");
    assert_eq!(value["safetyRiskLevel"], "medium");
    assert_eq!(value["academicReady"], false);
    assert!(value["composedPrompt"]["finalTurn"].is_string());
    assert!(value.get("announcement").is_none());
}
