//! Lenient request parsing.

use serde_json::json;
use visi::coach::{history_from_value, ChatRequest};
use visi::types::{AnxietyLevel, ChatRole, Mode, StudentContext};

#[test]
fn parses_full_request() {
    let request: ChatRequest = serde_json::from_value(json!({
        "message": "Plan lazım",
        "history": [
            {"role": "user", "content": "Selam"},
            {"role": "model", "content": "Merhaba!", "mod": "academic"}
        ],
        "studentContext": {"name": "Elif", "targetExam": "TYT", "currentAnxiety": "high"},
        "studentData": {"name": "Elif"},
        "forcedMode": "career-direction"
    }))
    .expect("valid request");

    assert_eq!(request.message, "Plan lazım");
    assert_eq!(request.history.len(), 2);
    assert_eq!(request.history[1].mode, Some(Mode::Academic));
    assert_eq!(request.student_context.name.as_deref(), Some("Elif"));
    assert_eq!(request.student_context.current_anxiety, Some(AnxietyLevel::High));
    assert!(request.student_data.is_some());
    assert_eq!(request.forced_mode.as_deref(), Some("career-direction"));
}

#[test]
fn missing_fields_default() {
    let request: ChatRequest = serde_json::from_value(json!({"message": "Selam"})).expect("valid");
    assert!(request.history.is_empty());
    assert!(request.student_context.name.is_none());
    assert!(request.image.is_none());
}

#[test]
fn malformed_context_field_is_dropped_alone() {
    let request: ChatRequest = serde_json::from_value(json!({
        "message": "Selam",
        "studentContext": {
            "level": "middle-school",
            "targetExam": "LGS",
            "age": 13,
            "currentEnergy": "hyper",
            "currentAnxiety": "mild",
            "goals": "çok"
        }
    }))
    .expect("lenient");

    let context = &request.student_context;
    assert_eq!(context.level.as_deref(), Some("middle-school"));
    assert_eq!(context.target_exam.as_deref(), Some("LGS"));
    assert_eq!(context.age, Some(13));
    assert_eq!(context.current_anxiety, Some(AnxietyLevel::Mild));
    assert!(context.current_energy.is_none());
    assert!(context.goals.is_empty());
}

#[test]
fn out_of_range_age_is_dropped() {
    let request: ChatRequest = serde_json::from_value(json!({
        "message": "Selam",
        "studentContext": {"name": "Elif", "age": "on yedi"}
    }))
    .expect("lenient");
    assert!(request.student_context.age.is_none());
    assert_eq!(request.student_context.name.as_deref(), Some("Elif"));
}

#[test]
fn non_object_context_is_empty() {
    let request: ChatRequest =
        serde_json::from_value(json!({"message": "Selam", "studentContext": [1, 2]})).expect("lenient");
    assert_eq!(request.student_context, StudentContext::default());
}

#[test]
fn null_context_is_empty() {
    let request: ChatRequest =
        serde_json::from_value(json!({"message": "Selam", "studentContext": null})).expect("lenient");
    assert!(request.student_context.goals.is_empty());
}

#[test]
fn unknown_roles_are_dropped_and_aliases_kept() {
    let history = history_from_value(&json!([
        {"role": "system", "content": "gizli"},
        {"role": "assistant", "content": "Merhaba", "mod": "anxiety-support"},
        {"role": "user"},
        {"content": "rolsüz"},
        "düz metin"
    ]));
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, ChatRole::Model);
    assert_eq!(history[0].mode, Some(Mode::AnxietySupport));
    assert_eq!(history[1].role, ChatRole::User);
    assert_eq!(history[1].content, "");
}

#[test]
fn unknown_mode_tag_is_untagged() {
    let history = history_from_value(&json!([
        {"role": "model", "content": "Merhaba", "mod": "zen"}
    ]));
    assert_eq!(history[0].mode, None);
}

#[test]
fn non_array_history_is_empty() {
    assert!(history_from_value(&json!({"role": "user"})).is_empty());
    let request: ChatRequest =
        serde_json::from_value(json!({"message": "x", "history": "yok"})).expect("lenient");
    assert!(request.history.is_empty());
}
