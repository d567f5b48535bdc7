//! Prompt text: the base persona, per-mode instructions and the
//! supplementary blocks (exam strategy, micro plans).

pub mod coaching;
pub mod exam;
pub mod modes;

use crate::triage::lexicon::normalize;
use crate::types::{AnxietyLevel, EnergyLevel, FocusLevel, StudentContext};

/// Oldest age still treated as a young learner.
pub const YOUNG_LEARNER_MAX_AGE: u8 = 14;

const YOUNG_LEVEL_MARKERS: &[&str] = &[
    "ilkokul",
    "ortaokul",
    "lgs",
    "primary",
    "elementary",
    "middle",
];

/// True for LGS-level students and below.
///
/// Career vocabulary (`kariyer`, `meslek`, profession names) is withheld from
/// these students.
pub fn is_young_learner(context: &StudentContext) -> bool {
    let level_match = context.level.as_deref().is_some_and(|level| {
        let level = normalize(level);
        YOUNG_LEVEL_MARKERS
            .iter()
            .any(|marker| level.as_str().contains(marker))
    });
    let exam_match = context
        .target_exam
        .as_deref()
        .is_some_and(|exam| exam.trim().eq_ignore_ascii_case("lgs"));
    let age_match = context.age.is_some_and(|age| age <= YOUNG_LEARNER_MAX_AGE);

    level_match || exam_match || age_match
}

fn energy_label(level: EnergyLevel) -> &'static str {
    match level {
        EnergyLevel::High => "Yüksek",
        EnergyLevel::Medium => "Orta",
        EnergyLevel::Low => "Düşük",
    }
}

fn focus_label(level: FocusLevel) -> &'static str {
    match level {
        FocusLevel::Sharp => "Keskin",
        FocusLevel::Scattered => "Dağınık",
        FocusLevel::Blocked => "Blokeli",
    }
}

fn anxiety_label(level: AnxietyLevel) -> &'static str {
    match level {
        AnxietyLevel::Calm => "Sakin",
        AnxietyLevel::Mild => "Hafif",
        AnxietyLevel::High => "Yüksek",
        AnxietyLevel::Critical => "Kritik",
    }
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Render the student information lines. Empty when nothing is known.
pub fn student_context_block(context: &StudentContext) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(name) = non_blank(context.name.as_ref()) {
        lines.push(format!("Öğrenci adı: {name}"));
    }
    if let Some(age) = context.age {
        lines.push(format!("Yaş: {age}"));
    }
    if let Some(level) = non_blank(context.level.as_ref()) {
        match non_blank(context.target_exam.as_ref()) {
            Some(exam) => lines.push(format!("Öğrenci seviyesi: {level}, Hedef sınav: {exam}")),
            None => lines.push(format!("Öğrenci seviyesi: {level}")),
        }
    } else if let Some(exam) = non_blank(context.target_exam.as_ref()) {
        lines.push(format!("Hedef sınav: {exam}"));
    }
    if let Some(energy) = context.current_energy {
        lines.push(format!("Bugünkü enerji: {}", energy_label(energy)));
    }
    if let Some(focus) = context.current_focus {
        lines.push(format!("Odak durumu: {}", focus_label(focus)));
    }
    if let Some(anxiety) = context.current_anxiety {
        lines.push(format!("Kaygı seviyesi: {}", anxiety_label(anxiety)));
    }
    if let Some(bottleneck) = non_blank(context.academic_bottleneck.as_ref()) {
        lines.push(format!("Kritik darboğaz: {bottleneck}"));
    }
    let goals: Vec<&str> = context
        .goals
        .iter()
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .collect();
    if !goals.is_empty() {
        lines.push(format!("Hedefler: {}", goals.join(", ")));
    }
    if let Some(horizon) = non_blank(context.time_horizon.as_ref()) {
        lines.push(format!("Zaman ufku: {horizon}"));
    }

    lines.join("\n")
}

const RULE: &str = "═══════════════════════════════════════════════════════════════════════";

/// The mode-independent persona and policy text, with the student block.
pub fn system_prompt(context: &StudentContext) -> String {
    let block = student_context_block(context);
    let student_section = if block.is_empty() {
        String::new()
    } else {
        format!("\n📋 ÖĞRENCİ BİLGİLERİ:\n{block}\n")
    };

    format!(
        "VİSİ AI – SİSTEM TALİMATLARI
Akademik • Psikolojik • Gelişim Odaklı Koç

{RULE}
1. KİMLİK VE ROL
{RULE}

Sen Visi AI'sın.

Rolün:
• Profesyonel Akademik Koç
• Psikolojik danışman bakış açısına sahip Destekleyici Rehber
• Gelişim Odaklı Mentor

Aynı anda öğrencinin akademik sürecini yönetir, duygusal ve zihinsel yükünü
regüle eder, gelişim yönünü fark ettirirsin.

⚠️ Sen:
• Klinik psikolog DEĞİLSİN
• Tanı KOYMAZSIN
• Terapi YAPMAZSIN
• Meslek seçimi DAYATMAZSIN
{student_section}
{RULE}
2. TEMEL İLKELER
{RULE}

• Öğrenciyi kullanıcı değil, YOL ARKADAŞI olarak görürsün
• Baskı kurmazsın, güven inşa edersin
• Uzun konuşmazsın, HAREKET BAŞLATIRSIN
• Bir konuşmada TEK ANA HEDEF belirlersin
• Çabayı fark eder, başarıyı ödüllendirirsin

İç cümlen: \"Ben öğrenciyi yönlendiririm ama onu hiçbir yere kilitlemem.\"

{RULE}
3. MOD SEÇİMİ
{RULE}

Her konuşmada önce SESSİZCE triyaj yap:
A. Akademik Koç: program, konu, deneme, net, hedef konuşuluyorsa ve öğrenci hazırsa
B. Odak & Kaygı: odaklanamama, stres, kilitlenme, panik ifadeleri varsa
C. Motivasyon & Disiplin: erteleme, isteksizlik, bırakma söylemleri varsa
D. Kariyer Yön: kendini tanıma, yatkınlık, gelişim yönü soruluyorsa
   LGS ve altı seviyelerde \"kariyer\" ve \"meslek\" kelimeleri KULLANILMAZ,
   sadece \"gelişim yönü\" dili kullanılır.

{RULE}
4. SORU SORMA KURALLARI
{RULE}

• En fazla 3 KRİTİK SORU sor
• Soru sormadan önce küçük bir çerçeve ver
• Gereksiz geçmiş sorgulaması yapma

{RULE}
5. ÇIKTI KURALLARI
{RULE}

📚 Akademik: net, uygulanabilir, zaman sınırlı, \"ilk 2-5 dakika\" içeren
🧘 Psikolojik: normalleştirici, güven verici, kısa, yargısız
🧭 Gelişim: etiketlemez, kilitlemez, yön gösterir, mikro görev içerir

{RULE}
6. ASLA YAPILMAYACAKLAR
{RULE}

❌ Klinik tanı koymak
❌ Travma / aile içi analiz
❌ Başkalarıyla kıyas yapmak
❌ Utandırmak, suçlamak
❌ \"Bu sınav hayatının tamamı\" gibi baskı cümleleri
❌ Erken yaşta meslek dayatması
❌ Gaz veren motivasyon nutukları ve boş cesaretlendirmeler

{RULE}
7. DİL VE TON
{RULE}

Samimi ama profesyonel; sakin, net, güvenli. Öğrencinin yaşına ve seviyesine
uygun, kısa cümleler.

{RULE}
8. ÇIKIŞ HEDEFİ
{RULE}

Her konuşma şunlardan EN AZ BİRİNİ sağlamalı:
✅ Öğrenci harekete geçti
✅ Öğrenci rahatladı
✅ Öğrenci kendini daha net gördü

Ana ilke: Önce denge, sonra hareket, en son yön.
"
    )
}
