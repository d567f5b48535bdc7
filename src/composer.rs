//! Prompt composer: builds the outbound final turn and threads history.
//!
//! The final turn is assembled in a fixed order:
//! 1. Base persona with the student block
//! 2. Mode instructions
//! 3. Mode / load / readiness header
//! 4. Supplementary blocks (exam strategy, micro plan, analytics), skipped on
//!    critical turns
//! 5. The student's message, behind the visual solver directive when an
//!    image is attached
//! 6. The safety directive on critical turns

use serde::Serialize;

use crate::prompts::{coaching, exam, modes, system_prompt};
use crate::triage::safety::SafetyVerdict;
use crate::triage::TriageResult;
use crate::types::{previous_mode, AnxietyLevel, ChatMessage, ChatRole, Mode, StudentContext};

/// Everything the composer needs for one turn.
#[derive(Debug, Clone, Copy)]
pub struct ComposeInput<'a> {
    /// Current student message.
    pub message: &'a str,
    /// Student context.
    pub context: &'a StudentContext,
    /// Client-held history, oldest first.
    pub history: &'a [ChatMessage],
    /// Triage outcome (possibly forced).
    pub triage: &'a TriageResult,
    /// Safety verdict on the current message.
    pub safety: &'a SafetyVerdict,
    /// Pre-rendered analytics blocks.
    pub analytics: &'a [String],
    /// Whether an image accompanies the message.
    pub has_image: bool,
}

/// One outbound conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    /// Author.
    pub role: ChatRole,
    /// Text.
    pub content: String,
}

impl Turn {
    fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    fn model(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            content: content.into(),
        }
    }
}

/// Output of [`compose`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedPrompt {
    /// Turns preceding the final one, including priming or transition pairs.
    pub history: Vec<Turn>,
    /// The outbound final user turn.
    pub final_turn: String,
    /// Mode of the previous model turn, if any.
    pub previous_mode: Option<Mode>,
}

const IMAGE_SOLVER_DIRECTIVE: &str = "📸 GÖRSEL SORU ÇÖZÜM MODU AKTİF

Bu görselde bir soru/problem var. Şu formatta ADIM ADIM çöz:

📖 SORU ANALİZİ
• Soru tipi: [Matematik/Fizik/Kimya/Türkçe/...]
• Konu: [Hangi konu]
• Zorluk: [Kolay/Orta/Zor]

🎯 ÇÖZÜM STRATEJİSİ
Bu soruyu çözmek için: [Strateji]

📝 ADIM ADIM ÇÖZÜM
**Adım 1:** [Açıklama ve işlem]
**Adım 2:** [Açıklama ve işlem]
...

✅ CEVAP
**Doğru Cevap:** [Şık veya değer]

💡 İPUCU & BENZER SORU
• Bu tür sorularda dikkat et: [İpucu]

NOT: Her adımı açıkça numaralandır. Formül kullanıyorsan yaz.";

const SAFETY_DIRECTIVE: &str = "⚠️ KRİTİK GÜVENLİK UYARISI: Bu mesajda yoğun duygusal içerik tespit edildi.

ZORUNLU DAVRANIŞLAR:
1. Akademik içerik verme
2. Destekleyici, güvenli dil kullan
3. Profesyonel yardım yönlendirmesi öner (okul rehberlik servisi, 182 ALO Psikiyatri Hattı, acil durumda 112)
4. Güvenilir bir yetişkine ulaşmasını hatırlat";

const WELCOME: &str = "Anlaşıldı. Ben Visi AI olarak görevime başlıyorum.";
const WELCOME_HIGH_ANXIETY: &str = " Öğrencinin duygusal durumunu öncelikli olarak ele alacağım.";

fn transition_ack(mode: Mode) -> &'static str {
    match mode {
        Mode::AnxietySupport => "Anlaşıldı. Önce duygusal durumunu ele alacağım.",
        Mode::MotivationDiscipline => {
            "Anlaşıldı. Motivasyon ve harekete geçirme odaklı devam ediyorum."
        }
        Mode::CareerDirection => "Anlaşıldı. Gelişim yönü üzerine konuşalım.",
        Mode::Academic => "Anlaşıldı. Akademik planlama moduna geçiyorum.",
        Mode::CrisisSupport => {
            "Anlaşıldı. Akademik içerik vermeden, güvenli destek odaklı devam ediyorum."
        }
    }
}

/// `[AKTİF MOD] [DUYGUSAL YÜK] [AKADEMİK HAZIRLIK]` header lines.
pub fn status_header(triage: &TriageResult) -> String {
    format!(
        "[AKTİF MOD: {}]\n[DUYGUSAL YÜK: {}]\n[AKADEMİK HAZIRLIK: {}]",
        triage.mode.as_str().to_ascii_uppercase(),
        triage.emotional_load.as_str().to_ascii_uppercase(),
        if triage.academic_ready { "EVET" } else { "HAYIR" }
    )
}

/// Drop leading model entries and blank entries; keep role and content.
pub fn clean_history(history: &[ChatMessage]) -> Vec<Turn> {
    history
        .iter()
        .skip_while(|m| m.role == ChatRole::Model)
        .filter(|m| !m.content.trim().is_empty())
        .map(|m| Turn {
            role: m.role,
            content: m.content.clone(),
        })
        .collect()
}

fn supplementary_blocks(input: &ComposeInput<'_>) -> Vec<String> {
    let mut blocks = Vec::new();
    if let Some(strategy) = exam::select_strategy(input.message, input.context.target_exam.as_deref())
    {
        blocks.push(exam::render(strategy));
    }
    if let Some(plan) = coaching::micro_plan(input.triage.mode, input.context) {
        blocks.push(plan);
    }
    blocks.extend(input.analytics.iter().cloned());
    blocks
}

/// Compose the final turn and the threaded history for one turn.
pub fn compose(input: &ComposeInput<'_>) -> ComposedPrompt {
    let mode = input.triage.mode;
    let critical = input.safety.is_critical();
    let base = system_prompt(input.context);
    let instructions = modes::mode_instructions(mode, input.context);

    let mut sections: Vec<String> = vec![
        base.clone(),
        instructions.clone(),
        status_header(input.triage),
    ];
    if !critical {
        sections.extend(supplementary_blocks(input));
    }
    let student = format!("ÖĞRENCİ MESAJI:\n{}", input.message);
    if input.has_image {
        sections.push(format!("{IMAGE_SOLVER_DIRECTIVE}\n\n{student}"));
    } else {
        sections.push(student);
    }
    if critical {
        sections.push(SAFETY_DIRECTIVE.to_owned());
    }

    let previous = previous_mode(input.history);
    let mut history = clean_history(input.history);
    if history.is_empty() {
        let mut welcome = WELCOME.to_owned();
        if matches!(
            input.context.current_anxiety,
            Some(AnxietyLevel::High | AnxietyLevel::Critical)
        ) {
            welcome.push_str(WELCOME_HIGH_ANXIETY);
        }
        history.push(Turn::user(format!("{base}\n\n{instructions}")));
        history.push(Turn::model(welcome));
    } else if previous.is_some_and(|prev| prev != mode) {
        history.push(Turn::user(format!(
            "[MOD DEĞİŞİKLİĞİ: {}]\n{instructions}",
            input.triage.reason
        )));
        history.push(Turn::model(transition_ack(mode)));
    }

    ComposedPrompt {
        history,
        final_turn: sections.join("\n\n"),
        previous_mode: previous,
    }
}
