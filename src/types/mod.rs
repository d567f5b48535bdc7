//! Core domain types shared by the triage engine, prompt assembly and transport.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Coaching modes
// ---------------------------------------------------------------------------

/// A coaching mode. Exactly one mode is active per turn.
///
/// Wire names follow the chat UI (`focus-anxiety`, `safe-support`, ...);
/// the descriptive names `anxiety-support` and `crisis-support` are accepted
/// on input as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Study planning, subject help, exam targets. The default mode.
    #[serde(rename = "academic")]
    Academic,
    /// Focus and anxiety regulation protocol.
    #[serde(rename = "focus-anxiety", alias = "anxiety-support")]
    AnxietySupport,
    /// Procrastination, reluctance and discipline support.
    #[serde(rename = "motivation-discipline")]
    MotivationDiscipline,
    /// Self-discovery and development direction.
    #[serde(rename = "career-direction")]
    CareerDirection,
    /// Crisis support with professional referral; no academic content.
    #[serde(rename = "safe-support", alias = "crisis-support")]
    CrisisSupport,
}

impl Mode {
    /// Every mode, highest priority first.
    pub const ALL: [Mode; 5] = [
        Mode::CrisisSupport,
        Mode::AnxietySupport,
        Mode::MotivationDiscipline,
        Mode::CareerDirection,
        Mode::Academic,
    ];

    /// Stable wire identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Academic => "academic",
            Self::AnxietySupport => "focus-anxiety",
            Self::MotivationDiscipline => "motivation-discipline",
            Self::CareerDirection => "career-direction",
            Self::CrisisSupport => "safe-support",
        }
    }

    /// Parse a wire identifier or alias. Unknown strings yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "academic" => Some(Self::Academic),
            "focus-anxiety" | "anxiety-support" => Some(Self::AnxietySupport),
            "motivation-discipline" => Some(Self::MotivationDiscipline),
            "career-direction" => Some(Self::CareerDirection),
            "safe-support" | "crisis-support" => Some(Self::CrisisSupport),
            _ => None,
        }
    }

    /// Priority rank, 1 = highest.
    pub fn priority(self) -> u8 {
        match self {
            Self::CrisisSupport => 1,
            Self::AnxietySupport => 2,
            Self::MotivationDiscipline => 3,
            Self::CareerDirection => 4,
            Self::Academic => 5,
        }
    }

    /// Whether the student can act on academic content in this mode. Only
    /// the regulation and crisis modes hold academic content back.
    pub fn is_academically_actionable(self) -> bool {
        matches!(
            self,
            Self::Academic | Self::MotivationDiscipline | Self::CareerDirection
        )
    }

    /// Turkish display name shown on the mode badge.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Academic => "Akademik Koç",
            Self::AnxietySupport => "Odak & Kaygı",
            Self::MotivationDiscipline => "Motivasyon & Disiplin",
            Self::CareerDirection => "Kariyer Yön",
            Self::CrisisSupport => "Güvenli Destek",
        }
    }

    /// Badge icon.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Academic => "📚",
            Self::AnxietySupport => "🧘",
            Self::MotivationDiscipline => "⭐",
            Self::CareerDirection => "🧭",
            Self::CrisisSupport => "💙",
        }
    }

    /// Badge colour as a CSS hex string.
    pub fn color(self) -> &'static str {
        match self {
            Self::Academic => "#6366f1",
            Self::AnxietySupport => "#ef4444",
            Self::MotivationDiscipline => "#fbbf24",
            Self::CareerDirection => "#a855f7",
            Self::CrisisSupport => "#3b82f6",
        }
    }

    /// Icon and name, e.g. `"📚 Akademik Koç"`.
    pub fn badge(self) -> String {
        format!("{} {}", self.icon(), self.display_name())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Conversation
// ---------------------------------------------------------------------------

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The student.
    User,
    /// The coach (model output).
    Model,
}

/// One entry of the client-held conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who wrote the message.
    pub role: ChatRole,
    /// Message text. Missing content deserializes as empty.
    #[serde(default)]
    pub content: String,
    /// Mode that produced a model-authored message.
    #[serde(default, rename = "mod", skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
}

impl ChatMessage {
    /// A student message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            mode: None,
        }
    }

    /// A coach message tagged with the mode that produced it.
    pub fn model(content: impl Into<String>, mode: Mode) -> Self {
        Self {
            role: ChatRole::Model,
            content: content.into(),
            mode: Some(mode),
        }
    }
}

/// Mode of the most recent history entry carrying a mode tag.
pub fn previous_mode(history: &[ChatMessage]) -> Option<Mode> {
    history.iter().rev().find_map(|m| m.mode)
}

// ---------------------------------------------------------------------------
// Student context
// ---------------------------------------------------------------------------

/// Self-reported energy for today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    /// High energy.
    High,
    /// Medium energy.
    Medium,
    /// Low energy.
    Low,
}

/// Self-reported focus state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusLevel {
    /// Sharp focus.
    Sharp,
    /// Scattered attention.
    Scattered,
    /// Blocked.
    Blocked,
}

/// Self-reported anxiety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnxietyLevel {
    /// Calm.
    Calm,
    /// Mild anxiety.
    Mild,
    /// High anxiety.
    High,
    /// Critical anxiety.
    Critical,
}

/// Per-conversation student context collected by the intake form.
///
/// Never used for keyword scoring; it only shapes the base prompt and the
/// career wording.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentContext {
    /// Student's first name.
    pub name: Option<String>,
    /// School level as free text (ilkokul, ortaokul, lise, middle-school ...).
    pub level: Option<String>,
    /// Target exam code (LGS, TYT, AYT, YKS, KPSS ...).
    pub target_exam: Option<String>,
    /// Age in years.
    pub age: Option<u8>,
    /// Energy today.
    pub current_energy: Option<EnergyLevel>,
    /// Focus today.
    pub current_focus: Option<FocusLevel>,
    /// Anxiety today.
    pub current_anxiety: Option<AnxietyLevel>,
    /// The subject or skill currently holding the student back.
    pub academic_bottleneck: Option<String>,
    /// Stated goals.
    pub goals: Vec<String>,
    /// Planning horizon, e.g. "3 ay".
    pub time_horizon: Option<String>,
}
