//! Student analytics: formatters that turn the opaque `studentData` payload
//! into prompt text blocks.
//!
//! Formatters are collaborators. A failing formatter is logged and skipped;
//! it never fails the turn.

use std::sync::Arc;

use anyhow::bail;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Renders one prompt block from the client-supplied analytics payload.
pub trait AnalyticsFormatter: Send + Sync {
    /// Formatter name for log fields.
    fn name(&self) -> &str;

    /// Render a text block. An empty string means "nothing to add".
    fn render(&self, data: &Value) -> anyhow::Result<String>;
}

/// Run every formatter, dropping empty output and logging failures.
pub fn render_blocks(formatters: &[Arc<dyn AnalyticsFormatter>], data: &Value) -> Vec<String> {
    formatters
        .iter()
        .filter_map(|formatter| match formatter.render(data) {
            Ok(block) if block.trim().is_empty() => None,
            Ok(block) => Some(block),
            Err(e) => {
                warn!(formatter = formatter.name(), error = %e, "analytics formatter failed, block omitted");
                None
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Profile digest
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StudentProfile {
    name: Option<String>,
    level: Option<String>,
    grade: Option<u8>,
    target_exam: Option<String>,
    recent_exams: Vec<ExamResult>,
    topic_performance: Vec<TopicPerformance>,
    study_stats: Option<StudyStats>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ExamResult {
    exam_type: String,
    total_correct: u32,
    total_wrong: u32,
    total_empty: u32,
    total_net: f64,
    subject_results: Vec<SubjectResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SubjectResult {
    subject: String,
    success_rate: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TopicPerformance {
    subject: String,
    topic: String,
    success_rate: f64,
    status: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StudyStats {
    average_daily_study_minutes: u32,
    current_streak: u32,
}

/// How many weak topics the digest lists.
const WEAK_TOPIC_LIMIT: usize = 3;

/// Built-in formatter: a short profile with the latest exam and weak topics.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProfileDigest;

impl AnalyticsFormatter for ProfileDigest {
    fn name(&self) -> &str {
        "profile_digest"
    }

    fn render(&self, data: &Value) -> anyhow::Result<String> {
        if !data.is_object() {
            bail!("studentData must be a JSON object");
        }
        let profile: StudentProfile = serde_json::from_value(data.clone())?;

        let mut lines: Vec<String> = Vec::new();
        if let Some(name) = profile.name.as_deref().filter(|n| !n.trim().is_empty()) {
            lines.push(format!("• Ad: {name}"));
        }
        if let Some(level) = profile.level.as_deref().filter(|l| !l.trim().is_empty()) {
            match profile.grade {
                Some(grade) => lines.push(format!("• Seviye: {level} ({grade}. sınıf)")),
                None => lines.push(format!("• Seviye: {level}")),
            }
        }
        if let Some(exam) = profile.target_exam.as_deref().filter(|e| !e.trim().is_empty()) {
            lines.push(format!("• Hedef sınav: {exam}"));
        }

        if let Some(last) = profile.recent_exams.first() {
            lines.push(format!(
                "• Son deneme ({}): {:.2} net, D/Y/B {}/{}/{}",
                last.exam_type, last.total_net, last.total_correct, last.total_wrong, last.total_empty
            ));
            let best = last
                .subject_results
                .iter()
                .max_by(|a, b| a.success_rate.total_cmp(&b.success_rate));
            let worst = last
                .subject_results
                .iter()
                .min_by(|a, b| a.success_rate.total_cmp(&b.success_rate));
            if let (Some(best), Some(worst)) = (best, worst) {
                lines.push(format!(
                    "• En güçlü ders: {} (%{:.0}), en zayıf ders: {} (%{:.0})",
                    best.subject, best.success_rate, worst.subject, worst.success_rate
                ));
            }
        }

        if let Some(stats) = &profile.study_stats {
            lines.push(format!(
                "• Günlük ortalama çalışma: {} dakika, seri: {} gün",
                stats.average_daily_study_minutes, stats.current_streak
            ));
        }

        let mut weak: Vec<&TopicPerformance> = profile
            .topic_performance
            .iter()
            .filter(|t| t.status != "mastered")
            .collect();
        weak.sort_by(|a, b| {
            (b.status == "struggling")
                .cmp(&(a.status == "struggling"))
                .then(a.success_rate.total_cmp(&b.success_rate))
        });
        if !weak.is_empty() {
            lines.push("• Öncelikli konular:".to_owned());
            for (i, topic) in weak.iter().take(WEAK_TOPIC_LIMIT).enumerate() {
                lines.push(format!(
                    "  {}. {} - {} (%{:.0})",
                    i.saturating_add(1),
                    topic.subject,
                    topic.topic,
                    topic.success_rate
                ));
            }
        }

        if lines.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("👤 ÖĞRENCİ PROFİL ÖZETİ\n{}", lines.join("\n")))
    }
}
