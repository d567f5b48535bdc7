//! Triage engine: picks exactly one coaching mode per turn.
//!
//! The pipeline is:
//! 1. Safety scan of the current message alone; a critical verdict forces
//!    crisis support
//! 2. Category scores over the current message plus the last
//!    `history_window` history entries
//! 3. Emotional load from the anxiety score
//! 4. The first matching rule of [`CASCADE`] selects the mode
//!
//! Everything here is a pure function of its inputs.

pub mod lexicon;
pub mod safety;
pub mod transition;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{ChatMessage, Mode, StudentContext};
use lexicon::{normalize, normalize_joined, MatchStrategy, ACADEMIC, ANXIETY, CAREER, MOTIVATION};
use safety::SafetyVerdict;

/// How many trailing history entries are scored with the current message.
pub const DEFAULT_HISTORY_WINDOW: usize = 3;

/// Tunables for [`TriageEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriageSettings {
    /// Trailing history entries included in scoring.
    pub history_window: usize,
    /// Keyword matching strategy.
    pub match_strategy: MatchStrategy,
}

impl Default for TriageSettings {
    fn default() -> Self {
        Self {
            history_window: DEFAULT_HISTORY_WINDOW,
            match_strategy: MatchStrategy::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Emotional load estimated from the anxiety score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalLoad {
    /// Fewer than two anxiety hits.
    Low,
    /// Two or three anxiety hits.
    Medium,
    /// Four or more anxiety hits.
    High,
    /// Crisis verdict.
    Critical,
}

impl EmotionalLoad {
    /// Grade an anxiety score.
    pub fn from_anxiety_score(score: usize) -> Self {
        match score {
            0 | 1 => Self::Low,
            2 | 3 => Self::Medium,
            _ => Self::High,
        }
    }

    /// Wire identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// Keyword hit counts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    /// Anxiety lexicon hits.
    pub anxiety: usize,
    /// Motivation lexicon hits.
    pub motivation: usize,
    /// Career lexicon hits.
    pub career: usize,
    /// Academic lexicon hits.
    pub academic: usize,
}

/// The rule that selected the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriageRule {
    /// Crisis phrase in the current message.
    CriticalSafety,
    /// Any anxiety signal.
    AnxietySignal,
    /// Motivation signal with little anxiety.
    MotivationSignal,
    /// Career signal with little anxiety.
    CareerSignal,
    /// Academic vocabulary present.
    AcademicContent,
    /// No strong emotional signal; academic by default.
    DefaultAcademic,
    /// Nothing else matched.
    Fallback,
    /// The caller pinned the mode.
    Forced,
}

impl TriageRule {
    /// Turkish explanation attached to the result.
    pub fn reason(self) -> &'static str {
        match self {
            Self::CriticalSafety => "Kritik duygusal durum tespit edildi, güvenli destek modu aktif",
            Self::AnxietySignal => "Öğrenci stres, kaygı veya odaklanma sorunu yaşıyor",
            Self::MotivationSignal => "Öğrenci motivasyon veya disiplin sorunu yaşıyor",
            Self::CareerSignal => "Öğrenci kariyer/gelişim yönü hakkında soru soruyor",
            Self::AcademicContent => "Akademik içerik veya çalışma planı konuşuluyor",
            Self::DefaultAcademic => "Belirgin duygusal sinyal yok, akademik destekle devam ediliyor",
            Self::Fallback => "Genel akademik destek modu",
            Self::Forced => "Kullanıcı tarafından seçildi",
        }
    }
}

/// Outcome of triage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageResult {
    /// Selected mode.
    pub mode: Mode,
    /// Rule that fired.
    pub rule: TriageRule,
    /// Turkish explanation.
    pub reason: String,
    /// Estimated emotional load.
    pub emotional_load: EmotionalLoad,
    /// Whether academic content is appropriate this turn.
    pub academic_ready: bool,
    /// Per-category hit counts.
    pub scores: CategoryScores,
}

impl TriageResult {
    fn from_rule(
        rule: TriageRule,
        mode: Mode,
        emotional_load: EmotionalLoad,
        scores: CategoryScores,
    ) -> Self {
        Self {
            mode,
            rule,
            reason: rule.reason().to_owned(),
            emotional_load,
            academic_ready: mode.is_academically_actionable(),
            scores,
        }
    }

    /// Replace the mode with a caller-chosen one.
    ///
    /// Critical results are returned unchanged: crisis support cannot be
    /// overridden.
    pub fn force(self, mode: Mode) -> Self {
        if self.rule == TriageRule::CriticalSafety {
            return self;
        }
        Self {
            mode,
            rule: TriageRule::Forced,
            reason: format!("{}: {}", TriageRule::Forced.reason(), mode.as_str()),
            academic_ready: mode.is_academically_actionable(),
            ..self
        }
    }
}

/// Safety verdict and triage result for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    /// Verdict on the current message.
    pub safety: SafetyVerdict,
    /// Selected mode.
    pub triage: TriageResult,
}

// ---------------------------------------------------------------------------
// Rule cascade
// ---------------------------------------------------------------------------

/// One row of the cascade.
#[derive(Debug, Clone, Copy)]
pub struct CascadeRule {
    /// Rule identity.
    pub rule: TriageRule,
    /// Mode selected when the predicate holds.
    pub mode: Mode,
    applies: fn(&CategoryScores) -> bool,
}

impl CascadeRule {
    /// Whether this row fires for `scores`.
    pub fn applies(&self, scores: &CategoryScores) -> bool {
        (self.applies)(scores)
    }
}

fn any_anxiety(s: &CategoryScores) -> bool {
    s.anxiety >= 1
}

fn motivation_without_anxiety(s: &CategoryScores) -> bool {
    s.motivation >= 1 && s.anxiety < 2
}

fn career_without_anxiety(s: &CategoryScores) -> bool {
    s.career >= 1 && s.anxiety < 2
}

fn academic_content(s: &CategoryScores) -> bool {
    s.academic >= 1
}

fn calm_enough(s: &CategoryScores) -> bool {
    s.anxiety < 2 && s.motivation < 2
}

fn always(_: &CategoryScores) -> bool {
    true
}

/// Mode selection rules, evaluated top to bottom. The last row always fires.
pub const CASCADE: [CascadeRule; 6] = [
    CascadeRule {
        rule: TriageRule::AnxietySignal,
        mode: Mode::AnxietySupport,
        applies: any_anxiety,
    },
    CascadeRule {
        rule: TriageRule::MotivationSignal,
        mode: Mode::MotivationDiscipline,
        applies: motivation_without_anxiety,
    },
    CascadeRule {
        rule: TriageRule::CareerSignal,
        mode: Mode::CareerDirection,
        applies: career_without_anxiety,
    },
    CascadeRule {
        rule: TriageRule::AcademicContent,
        mode: Mode::Academic,
        applies: academic_content,
    },
    CascadeRule {
        rule: TriageRule::DefaultAcademic,
        mode: Mode::Academic,
        applies: calm_enough,
    },
    CascadeRule {
        rule: TriageRule::Fallback,
        mode: Mode::Academic,
        applies: always,
    },
];

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Stateless triage engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriageEngine {
    settings: TriageSettings,
}

impl TriageEngine {
    /// Create an engine with the given settings.
    pub fn new(settings: TriageSettings) -> Self {
        Self { settings }
    }

    /// Active settings.
    pub fn settings(&self) -> TriageSettings {
        self.settings
    }

    /// Safety scan of `message`.
    pub fn check_safety(&self, message: &str) -> SafetyVerdict {
        safety::classify(&normalize(message), self.settings.match_strategy)
    }

    /// Hit counts over the message and the trailing history window.
    pub fn score(&self, message: &str, history: &[ChatMessage]) -> CategoryScores {
        let skip = history.len().saturating_sub(self.settings.history_window);
        let text = normalize_joined(
            std::iter::once(message).chain(history.iter().skip(skip).map(|m| m.content.as_str())),
        );
        let strategy = self.settings.match_strategy;
        CategoryScores {
            anxiety: ANXIETY.count_hits(&text, strategy),
            motivation: MOTIVATION.count_hits(&text, strategy),
            career: CAREER.count_hits(&text, strategy),
            academic: ACADEMIC.count_hits(&text, strategy),
        }
    }

    /// Run safety and triage for one turn.
    ///
    /// The student context is accepted for parity with prompt assembly; it
    /// never influences scoring.
    pub fn assess(
        &self,
        message: &str,
        _context: &StudentContext,
        history: &[ChatMessage],
    ) -> Assessment {
        let safety = self.check_safety(message);

        if safety.is_critical() {
            debug!(risk = safety.risk_level.as_str(), "critical safety verdict");
            let triage = TriageResult::from_rule(
                TriageRule::CriticalSafety,
                Mode::CrisisSupport,
                EmotionalLoad::Critical,
                CategoryScores::default(),
            );
            return Assessment { safety, triage };
        }

        let scores = self.score(message, history);
        let load = EmotionalLoad::from_anxiety_score(scores.anxiety);
        let triage = select(&scores, load);

        debug!(
            mode = %triage.mode,
            rule = ?triage.rule,
            anxiety = scores.anxiety,
            motivation = scores.motivation,
            career = scores.career,
            academic = scores.academic,
            "triage complete"
        );

        Assessment { safety, triage }
    }
}

fn select(scores: &CategoryScores, load: EmotionalLoad) -> TriageResult {
    let row = CASCADE
        .iter()
        .find(|row| row.applies(scores))
        .copied()
        .unwrap_or(CascadeRule {
            rule: TriageRule::Fallback,
            mode: Mode::Academic,
            applies: always,
        });

    let load = if row.rule == TriageRule::Fallback {
        EmotionalLoad::Low
    } else {
        load
    };
    TriageResult::from_rule(row.rule, row.mode, load, *scores)
}

/// Triage with default settings.
pub fn triage(message: &str, context: &StudentContext, history: &[ChatMessage]) -> TriageResult {
    TriageEngine::default().assess(message, context, history).triage
}

/// Safety scan with default settings.
pub fn check_safety(message: &str) -> SafetyVerdict {
    safety::check_safety(message)
}
