//! Mode transition announcements and panel hand-off rules.

use serde::{Deserialize, Serialize};

use crate::types::Mode;

/// Marker prepended to every user-visible transition announcement.
pub const TRANSITION_MARKER: &str = "**[Mod Değişikliği]**";

/// Whether a turn changed mode, and what to tell the student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionEvent {
    /// True when the mode differs from the previous turn's.
    pub announce: bool,
    /// Announcement text, present only when `announce` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TransitionEvent {
    /// No transition.
    pub fn none() -> Self {
        Self {
            announce: false,
            message: None,
        }
    }
}

/// Fixed first-person sentence announcing entry into `mode`.
pub fn transition_message(mode: Mode) -> &'static str {
    match mode {
        Mode::Academic => {
            "📚 Akademik Koç moduna geçtim. Çalışma planı ve hedeflerine odaklanıyorum."
        }
        Mode::AnxietySupport => {
            "🧘 Odak & Kaygı moduna geçtim. Önce seni rahatlatalım, sonra devam ederiz."
        }
        Mode::MotivationDiscipline => {
            "⭐ Motivasyon moduna geçtim. Birlikte küçük adımlarla ilerleyeceğiz."
        }
        Mode::CareerDirection => "🧭 Gelişim Yönü moduna geçtim. Güçlü yanlarını keşfedelim.",
        Mode::CrisisSupport => "💙 Güvenli Destek moduna geçtim. Yanındayım.",
    }
}

/// Compare the previous turn's mode with the new one.
pub fn check_transition(previous: Option<Mode>, new: Mode) -> TransitionEvent {
    match previous {
        Some(prev) if prev != new => TransitionEvent {
            announce: true,
            message: Some(format!("{TRANSITION_MARKER}\n\n{}", transition_message(new))),
        },
        _ => TransitionEvent::none(),
    }
}

// ---------------------------------------------------------------------------
// Panel hand-off
// ---------------------------------------------------------------------------

/// Signals the chat UI reports about the student's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelSignal {
    /// The student calmed down.
    Regulated,
    /// The student started working.
    ActionStarted,
    /// A concrete development task was agreed.
    TaskDefined,
    /// A crisis was reported.
    Crisis,
}

/// A suggested move to another panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Handoff {
    /// Panel to switch to.
    pub target: Mode,
    /// Turkish explanation.
    pub reason: &'static str,
}

/// Suggest a panel hand-off for `signal` received while in `current`.
pub fn suggest_handoff(current: Mode, signal: PanelSignal) -> Option<Handoff> {
    let (target, reason) = match (signal, current) {
        (PanelSignal::Regulated, Mode::AnxietySupport) => (
            Mode::Academic,
            "Regülasyon sağlandı, akademik panele geçiş hazır",
        ),
        (PanelSignal::ActionStarted, Mode::MotivationDiscipline) => {
            (Mode::Academic, "Hareket başladı, akademik panele geçiş")
        }
        (PanelSignal::TaskDefined, Mode::CareerDirection) => {
            (Mode::Academic, "Görev tanımlandı, akademik panele geçiş")
        }
        (PanelSignal::Crisis, _) => (
            Mode::AnxietySupport,
            "Kriz tespit edildi, odak & kaygı paneline geçiş",
        ),
        _ => return None,
    };
    Some(Handoff { target, reason })
}
