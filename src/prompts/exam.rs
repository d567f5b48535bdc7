//! Exam-specific coaching strategies (TYT, AYT, LGS, KPSS).

use std::fmt::Write as _;

/// Weight of a subject inside an exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectPriority {
    /// Decides the ranking.
    Critical,
    /// Large share of questions.
    High,
    /// Supporting subject.
    Medium,
    /// Small share.
    Low,
}

impl SubjectPriority {
    fn label(self) -> &'static str {
        match self {
            Self::Critical => "🔴 KRİTİK",
            Self::High => "🟠 YÜKSEK",
            Self::Medium | Self::Low => "🟡 ORTA",
        }
    }
}

/// One subject of an exam.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExamSubject {
    /// Subject name.
    pub name: &'static str,
    /// Number of questions.
    pub questions: u16,
    /// Target seconds per question.
    pub seconds_per_question: u16,
    /// Priority in preparation.
    pub priority: SubjectPriority,
    /// Share of the target score, in percent.
    pub weight_percent: f32,
}

/// Fixed strategy table for one exam.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExamStrategy {
    /// Exam code (`TYT`, `AYT`, ...).
    pub code: &'static str,
    /// Full Turkish name.
    pub full_name: &'static str,
    /// Total duration, human readable.
    pub duration: &'static str,
    /// Subjects in booklet order.
    pub subjects: &'static [ExamSubject],
    /// What decides the result.
    pub success_factors: &'static [&'static str],
    /// Focus per weekday.
    pub weekly_focus: &'static [(&'static str, &'static str)],
    /// How to grow the net score.
    pub net_target_strategy: &'static str,
    /// Short motivation tips.
    pub motivation_tips: &'static [&'static str],
}

const fn subject(
    name: &'static str,
    questions: u16,
    seconds_per_question: u16,
    priority: SubjectPriority,
    weight_percent: f32,
) -> ExamSubject {
    ExamSubject {
        name,
        questions,
        seconds_per_question,
        priority,
        weight_percent,
    }
}

use SubjectPriority::{Critical, High, Low, Medium};

/// Every known exam strategy.
pub const STRATEGIES: &[ExamStrategy] = &[
    ExamStrategy {
        code: "TYT",
        full_name: "Temel Yeterlilik Testi",
        duration: "135 dakika",
        subjects: &[
            subject("Türkçe", 40, 60, Critical, 33.0),
            subject("Matematik", 40, 90, Critical, 33.0),
            subject("Fen Bilimleri", 20, 75, High, 17.0),
            subject("Sosyal Bilimler", 20, 60, High, 17.0),
        ],
        success_factors: &[
            "Türkçe ve Matematik eşit öncelik - ikisi de 40 soru",
            "Paragraf sorularında hız kritik - 1 dakika/soru hedefle",
            "Matematik temellerini tam öğren, zor konulara sonra geç",
            "Fen-Sosyal netlerini 15+ çıkar, düşük efor yüksek getiri",
            "Yanlış sayısını minimumda tut",
        ],
        weekly_focus: &[
            ("Pazartesi", "Matematik temel, problem çözme"),
            ("Salı", "Türkçe paragraf, dil bilgisi"),
            ("Çarşamba", "Fen Bilimleri, formül tekrarı"),
            ("Perşembe", "Matematik orta düzey"),
            ("Cuma", "Sosyal Bilimler, genel kültür"),
            ("Cumartesi", "TYT denemesi ve analizi"),
            ("Pazar", "Zayıf konular, hafif tekrar"),
        ],
        net_target_strategy: "Haftalık +3-4 net artış hedefle. İlk 80 nete kadar artış hızlıdır, sonra yavaşlar.",
        motivation_tips: &[
            "120 net altındaysan matematiğe odaklan - en hızlı net artışı oradan gelir",
            "Her gün en az 1 paragraf çöz - alışkanlık hız getirir",
            "Deneme analizi yapmadan yeni deneme çözme",
        ],
    },
    ExamStrategy {
        code: "AYT",
        full_name: "Alan Yeterlilik Testi",
        duration: "180 dakika",
        subjects: &[
            subject("Matematik", 40, 120, Critical, 50.0),
            subject("Fizik", 14, 120, High, 17.0),
            subject("Kimya", 13, 100, High, 16.0),
            subject("Biyoloji", 13, 80, High, 17.0),
        ],
        success_factors: &[
            "AYT Matematik sıralamanın yarısını belirler",
            "Türev-İntegral mutlaka öğrenilmeli",
            "Fizik formüllerini ezberle, mantığı sonra gelir",
            "Kimyada organik konular yaklaşık %30 ağırlıkta",
            "Biyoloji en hızlı net artışı sağlar",
        ],
        weekly_focus: &[
            ("Pazartesi", "Matematik türev/integral"),
            ("Salı", "Fizik modern/optik"),
            ("Çarşamba", "Kimya organik"),
            ("Perşembe", "Matematik geometri"),
            ("Cuma", "Biyoloji, genetik"),
            ("Cumartesi", "AYT denemesi"),
            ("Pazar", "Deneme analizi, zayıf konular"),
        ],
        net_target_strategy: "Matematikte 25+ net için limit-türev-integral üçlüsü şart. Biyolojide 10+ net kolay hedef.",
        motivation_tips: &[
            "AYT'de 10 net artış binlerce sıra atlatır",
            "Matematiği bırakma - en az 20 net çıkarmadan diğerlerine geçme",
            "Fen derslerinde formül kartları kullan",
        ],
    },
    ExamStrategy {
        code: "LGS",
        full_name: "Liselere Geçiş Sınavı",
        duration: "150 dakika (75+75)",
        subjects: &[
            subject("Türkçe", 20, 90, Critical, 25.0),
            subject("Matematik", 20, 120, Critical, 25.0),
            subject("Fen Bilimleri", 20, 90, High, 25.0),
            subject("İnkılap Tarihi", 10, 60, Medium, 12.5),
            subject("Din Kültürü", 10, 45, Medium, 6.25),
            subject("İngilizce", 10, 45, Medium, 6.25),
        ],
        success_factors: &[
            "Türkçe ve Matematik sıralamanın yarısını belirler",
            "Paragraf sorularını dikkatli oku - tuzak kelimelere dikkat",
            "Matematikte geometri soruların yaklaşık %30'u",
            "8. sınıf konularına ağırlık ver",
            "Zaman yönetimi kritik - hepsine yetişmeli",
        ],
        weekly_focus: &[
            ("Pazartesi", "Matematik cebirsel ifadeler"),
            ("Salı", "Türkçe paragraf anlama"),
            ("Çarşamba", "Fen madde ve ısı"),
            ("Perşembe", "Matematik geometri"),
            ("Cuma", "İnkılap Tarihi ve Din Kültürü"),
            ("Cumartesi", "LGS denemesi"),
            ("Pazar", "Hafif tekrar"),
        ],
        net_target_strategy: "Her derste 18+ doğru hedefle. Önce Matematik ve Türkçe, sonra Fen.",
        motivation_tips: &[
            "8. sınıf zor ama yılın sonunda biter - biraz daha dayan",
            "Her gün 2 saat çalış, hafta sonu deneme çöz",
            "Konuları küçük parçalara böl, hepsini birden çalışma",
        ],
    },
    ExamStrategy {
        code: "KPSS",
        full_name: "Kamu Personeli Seçme Sınavı",
        duration: "130 dakika (GY-GK)",
        subjects: &[
            subject("Türkçe", 30, 65, Critical, 25.0),
            subject("Matematik", 30, 80, Critical, 25.0),
            subject("Tarih", 30, 50, High, 20.0),
            subject("Coğrafya", 15, 50, High, 12.0),
            subject("Vatandaşlık", 15, 50, Medium, 10.0),
            subject("Güncel", 10, 30, Low, 8.0),
        ],
        success_factors: &[
            "Türkçe-Matematik düşerse sıralama düşer",
            "Tarihi kronolojik çalış - akılda kalır",
            "Vatandaşlıkta anayasa maddeleri önemli",
            "Güncel için haber takibi yap",
            "Alan sınavı varsa ona özelleş",
        ],
        weekly_focus: &[
            ("Pazartesi", "Türkçe dil bilgisi"),
            ("Salı", "Matematik problemler"),
            ("Çarşamba", "Tarih Osmanlı/Cumhuriyet"),
            ("Perşembe", "Türkiye coğrafyası"),
            ("Cuma", "Vatandaşlık ve güncel"),
            ("Cumartesi", "KPSS denemesi"),
            ("Pazar", "Deneme analizi"),
        ],
        net_target_strategy: "GY-GK 80+ puan için Türkçe 25+, Matematik 22+, Tarih 25+ hedefle.",
        motivation_tips: &[
            "Atama için 75+ gerekli - hedefe odaklan",
            "Alan sınavı puanı da önemli, ikisini dengele",
            "Güncel olayları haftada bir güncelle",
        ],
    },
];

/// Look up a strategy by exam code, ignoring case and whitespace.
pub fn strategy_for(code: &str) -> Option<&'static ExamStrategy> {
    let code: String = code.chars().filter(|c| !c.is_whitespace()).collect();
    STRATEGIES
        .iter()
        .find(|strategy| strategy.code.eq_ignore_ascii_case(&code))
}

/// First exam code mentioned as a standalone word in `message`.
pub fn mentioned_exam(message: &str) -> Option<&'static ExamStrategy> {
    message
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .find_map(strategy_for)
}

/// Strategy for this turn: an exam named in the message wins over the
/// student's target exam.
pub fn select_strategy(message: &str, target_exam: Option<&str>) -> Option<&'static ExamStrategy> {
    mentioned_exam(message).or_else(|| target_exam.and_then(strategy_for))
}

/// Render the strategy as a prompt block.
pub fn render(strategy: &ExamStrategy) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🎯 {} ÖZEL KOÇLUK STRATEJİSİ", strategy.code);
    let _ = writeln!(
        out,
        "📋 SINAV BİLGİSİ: {} ({})",
        strategy.full_name, strategy.duration
    );

    out.push_str("\n📚 DERS ÖNCELİKLERİ:\n");
    for s in strategy.subjects {
        let _ = writeln!(
            out,
            "• {}: {} soru, {} öncelik (%{})",
            s.name,
            s.questions,
            s.priority.label(),
            s.weight_percent
        );
    }

    out.push_str("\n⚡ BAŞARI FAKTÖRLERİ:\n");
    for (i, factor) in strategy.success_factors.iter().enumerate() {
        let _ = writeln!(out, "{}. {factor}", i.saturating_add(1));
    }

    out.push_str("\n🗓 HAFTALIK ODAK:\n");
    for (day, focus) in strategy.weekly_focus {
        let _ = writeln!(out, "• {day}: {focus}");
    }

    let _ = writeln!(
        out,
        "\n📊 NET HEDEFİ STRATEJİSİ:\n{}",
        strategy.net_target_strategy
    );

    out.push_str("\n💪 MOTİVASYON:\n");
    for tip in strategy.motivation_tips {
        let _ = writeln!(out, "• {tip}");
    }
    out
}
