//! Safety classifier: crisis detection and risk grading of a single message.

use serde::{Deserialize, Serialize};

use super::lexicon::{normalize, MatchStrategy, NormalizedText, ANXIETY, CRISIS};

/// Anxiety hits at or above this grade the message `High`.
const HIGH_RISK_ANXIETY_HITS: usize = 5;
/// Anxiety hits at or above this grade the message `Medium`.
const MEDIUM_RISK_ANXIETY_HITS: usize = 2;

/// Graded risk of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// No risk signal.
    None,
    /// Reserved for externally graded low risk; the keyword scan never emits it.
    Low,
    /// Several anxiety signals.
    Medium,
    /// Many anxiety signals.
    High,
    /// Crisis phrase present.
    Critical,
}

impl RiskLevel {
    /// Wire identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// Outcome of the safety scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyVerdict {
    /// False only for critical verdicts.
    pub is_safe: bool,
    /// Graded risk.
    pub risk_level: RiskLevel,
    /// The reply must point to professional help.
    pub requires_referral: bool,
    /// Operator-facing note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SafetyVerdict {
    /// The verdict for a message with no risk signal.
    pub fn safe() -> Self {
        Self {
            is_safe: true,
            risk_level: RiskLevel::None,
            requires_referral: false,
            message: None,
        }
    }

    /// True when the verdict forces crisis support.
    pub fn is_critical(&self) -> bool {
        self.risk_level == RiskLevel::Critical
    }
}

/// Classify a raw message with the default match strategy.
pub fn check_safety(message: &str) -> SafetyVerdict {
    classify(&normalize(message), MatchStrategy::default())
}

/// Classify already-normalised text.
///
/// Crisis phrases short-circuit; otherwise the anxiety hit count grades the
/// risk.
pub fn classify(text: &NormalizedText, strategy: MatchStrategy) -> SafetyVerdict {
    if text.is_empty() {
        return SafetyVerdict::safe();
    }

    if CRISIS.any_hit(text, strategy) {
        return SafetyVerdict {
            is_safe: false,
            risk_level: RiskLevel::Critical,
            requires_referral: true,
            message: Some(
                "Kritik duygusal içerik tespit edildi. Profesyonel destek yönlendirmesi gerekli."
                    .to_owned(),
            ),
        };
    }

    let anxiety = ANXIETY.count_hits(text, strategy);
    if anxiety >= HIGH_RISK_ANXIETY_HITS {
        SafetyVerdict {
            is_safe: true,
            risk_level: RiskLevel::High,
            requires_referral: false,
            message: Some("Yüksek duygusal yük tespit edildi.".to_owned()),
        }
    } else if anxiety >= MEDIUM_RISK_ANXIETY_HITS {
        SafetyVerdict {
            is_safe: true,
            risk_level: RiskLevel::Medium,
            requires_referral: false,
            message: None,
        }
    } else {
        SafetyVerdict::safe()
    }
}
