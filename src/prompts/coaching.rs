//! Micro-plan templates appended to academic and anxiety-support turns.

use crate::types::{EnergyLevel, Mode, StudentContext};

/// Planned session length for the student's energy today.
pub fn session_duration(context: &StudentContext) -> &'static str {
    match context.current_energy {
        Some(EnergyLevel::Low) => "15-20 dakika",
        _ => "30-45 dakika",
    }
}

/// Template for `mode`, or `None` when the mode has no template.
pub fn micro_plan(mode: Mode, context: &StudentContext) -> Option<String> {
    match mode {
        Mode::Academic => Some(format!(
            "📋 GÜNLÜK MİKRO PLAN

🎯 Bugünkü hedef: [Konu/Görev]
⏱ Süre: {}

🧩 Görevler:
1. [Görev 1]
2. [Görev 2]
3. [Görev 3]

▶️ İlk 2 dakika: [Hemen başlayabileceğin basit bir adım]

💡 B Planı (enerji düşükse): [Daha hafif alternatif]

⭐ Tamamladığında: Kendine küçük bir mola izni ver!",
            session_duration(context)
        )),
        Mode::AnxietySupport => Some(REGULATION_PROTOCOL.to_owned()),
        Mode::MotivationDiscipline | Mode::CareerDirection | Mode::CrisisSupport => None,
    }
}

const REGULATION_PROTOCOL: &str = "🧘 REGÜLASYON PROTOKOLÜ (3-5 dakika)

1️⃣ NEFES (1 dakika)
   4 saniye nefes al, 7 saniye tut, 8 saniye yavaşça ver (3 kez)

2️⃣ BEDEN (1 dakika)
   Omuzlarını geriye çek, çeneni gevşet, ayaklarını yere bas ve hisset

3️⃣ ŞU AN (1 dakika)
   Gördüğün 5 şeyi say, duyduğun 3 sesi fark et, hissettiğin 1 dokuyu tanımla

✅ Şimdi tek küçük adım: [Basit, 2 dakikalık görev]";
