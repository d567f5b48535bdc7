//! Mode selection.

use visi::triage::lexicon::MatchStrategy;
use visi::triage::{triage, EmotionalLoad, TriageEngine, TriageRule, TriageSettings};
use visi::types::{ChatMessage, Mode, StudentContext};

fn run(message: &str) -> visi::triage::TriageResult {
    triage(message, &StudentContext::default(), &[])
}

#[test]
fn stress_selects_anxiety_support_with_medium_load() {
    let result = run("Çok stresliyim");
    assert_eq!(result.mode, Mode::AnxietySupport);
    assert_eq!(result.rule, TriageRule::AnxietySignal);
    assert_eq!(result.emotional_load, EmotionalLoad::Medium);
    assert!(!result.academic_ready);
    assert_eq!(result.scores.anxiety, 3);
}

#[test]
fn heavy_anxiety_is_high_load() {
    let result = run("Çok stresliyim ve kaygılıyım, panik oluyorum");
    assert_eq!(result.mode, Mode::AnxietySupport);
    assert_eq!(result.emotional_load, EmotionalLoad::High);
}

#[test]
fn crisis_phrase_selects_safe_support() {
    let result = run("Hayatımın hiçbir anlamı yok");
    assert_eq!(result.mode, Mode::CrisisSupport);
    assert_eq!(result.rule, TriageRule::CriticalSafety);
    assert_eq!(result.emotional_load, EmotionalLoad::Critical);
    assert!(!result.academic_ready);
}

#[test]
fn reluctance_selects_motivation() {
    let result = run("Hiç içimden gelmiyor");
    assert_eq!(result.mode, Mode::MotivationDiscipline);
    assert_eq!(result.rule, TriageRule::MotivationSignal);
    assert_eq!(result.scores.motivation, 2);
    assert!(result.academic_ready);
}

#[test]
fn profession_question_selects_career_direction() {
    let result = run("Hangi meslek bana uygun?");
    assert_eq!(result.mode, Mode::CareerDirection);
    assert_eq!(result.rule, TriageRule::CareerSignal);
    assert!(result.academic_ready);
}

#[test]
fn subject_vocabulary_selects_academic_content() {
    let result = run("Matematik sorularında zorlanıyorum");
    assert_eq!(result.mode, Mode::Academic);
    assert_eq!(result.rule, TriageRule::AcademicContent);
    assert!(result.academic_ready);
}

#[test]
fn no_signal_defaults_to_academic() {
    let result = run("Bugün ne çalışmalıyım?");
    assert_eq!(result.mode, Mode::Academic);
    assert_eq!(result.rule, TriageRule::DefaultAcademic);
    assert_eq!(result.emotional_load, EmotionalLoad::Low);
    assert!(result.academic_ready);
    assert_eq!(result.reason, TriageRule::DefaultAcademic.reason());
}

#[test]
fn empty_message_is_academic() {
    let result = run("");
    assert_eq!(result.mode, Mode::Academic);
    assert_eq!(result.rule, TriageRule::DefaultAcademic);
}

#[test]
fn history_window_limits_scored_entries() {
    let history = vec![
        ChatMessage::user("Çok stresliyim"),
        ChatMessage::user("Tamam"),
        ChatMessage::user("Peki"),
        ChatMessage::user("Evet"),
    ];
    let context = StudentContext::default();

    let default = TriageEngine::default().assess("Tamam", &context, &history);
    assert_eq!(default.triage.mode, Mode::Academic);

    let wide = TriageEngine::new(TriageSettings {
        history_window: 4,
        ..TriageSettings::default()
    })
    .assess("Tamam", &context, &history);
    assert_eq!(wide.triage.mode, Mode::AnxietySupport);
}

#[test]
fn safety_ignores_history() {
    let history = vec![ChatMessage::user("Hayatımın hiçbir anlamı yok")];
    let assessment = TriageEngine::default().assess("Peki", &StudentContext::default(), &history);
    assert!(!assessment.safety.is_critical());
    assert_ne!(assessment.triage.mode, Mode::CrisisSupport);
}

#[test]
fn substring_strategy_counts_mid_word_hits() {
    let engine = TriageEngine::new(TriageSettings {
        match_strategy: MatchStrategy::Substring,
        ..TriageSettings::default()
    });
    let result = engine
        .assess("İnternet yavaş", &StudentContext::default(), &[])
        .triage;
    assert_eq!(result.rule, TriageRule::AcademicContent);
    assert_eq!(run("İnternet yavaş").rule, TriageRule::DefaultAcademic);
}

#[test]
fn context_never_changes_the_mode() {
    let anxious = StudentContext {
        current_anxiety: Some(visi::types::AnxietyLevel::Critical),
        ..StudentContext::default()
    };
    assert_eq!(
        triage("Bugün ne çalışmalıyım?", &anxious, &[]).mode,
        Mode::Academic
    );
}

#[test]
fn forcing_changes_mode_and_reason() {
    let forced = run("Bugün ne çalışmalıyım?").force(Mode::CareerDirection);
    assert_eq!(forced.mode, Mode::CareerDirection);
    assert_eq!(forced.rule, TriageRule::Forced);
    assert_eq!(forced.reason, "Kullanıcı tarafından seçildi: career-direction");
    assert!(forced.academic_ready);
}

#[test]
fn forcing_never_overrides_crisis() {
    let forced = run("Artık dayanamıyorum").force(Mode::Academic);
    assert_eq!(forced.mode, Mode::CrisisSupport);
    assert_eq!(forced.rule, TriageRule::CriticalSafety);
}

#[test]
fn result_serialises_camel_case() {
    let value = serde_json::to_value(run("Çok stresliyim")).expect("serializes");
    assert_eq!(value["mode"], "focus-anxiety");
    assert_eq!(value["rule"], "anxiety_signal");
    assert_eq!(value["emotionalLoad"], "medium");
    assert_eq!(value["academicReady"], false);
    assert_eq!(value["scores"]["anxiety"], 3);
}

#[test]
fn triage_is_idempotent() {
    let context = StudentContext {
        level: Some("lise".to_owned()),
        ..StudentContext::default()
    };
    let history = vec![
        ChatMessage::user("Yarın deneme var"),
        ChatMessage::model("Hazırlanalım.", Mode::Academic),
    ];
    let first = triage("Sınavdan önce gerginim", &context, &history);
    let second = triage("Sınavdan önce gerginim", &context, &history);
    assert_eq!(first, second);
}

#[test]
fn single_anxiety_hit_is_enough() {
    let result = run("Sınavdan önce gerginim");
    assert_eq!(result.scores.anxiety, 1);
    assert_eq!(result.mode, Mode::AnxietySupport);
    assert_eq!(result.rule, TriageRule::AnxietySignal);
    assert_eq!(result.emotional_load, EmotionalLoad::Low);
}

#[test]
fn zero_anxiety_hits_route_elsewhere() {
    let result = run("Sınavdan önce hazırım");
    assert_eq!(result.scores.anxiety, 0);
    assert_eq!(result.mode, Mode::Academic);
    assert_eq!(result.rule, TriageRule::AcademicContent);
}

#[test]
fn anxiety_outranks_motivation() {
    let result = run("Gerginim, yarın bakarım");
    assert_eq!(result.scores.anxiety, 1);
    assert_eq!(result.scores.motivation, 1);
    assert_eq!(result.mode, Mode::AnxietySupport);
}

#[test]
fn only_regulation_and_crisis_hold_academics_back() {
    for mode in Mode::ALL {
        let expected = !matches!(mode, Mode::AnxietySupport | Mode::CrisisSupport);
        assert_eq!(mode.is_academically_actionable(), expected, "{mode}");
    }
}
