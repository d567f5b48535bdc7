//! Keyword lexicons and the text normalisation shared by every scan.
//!
//! Lexicon entries and inbound text pass through the same [`normalize`]
//! function, so matching is insensitive to case and Turkish diacritics
//! (`ç ğ ı İ ö ş ü` fold to `c g i i o s u`). A known consequence of folding is
//! that a few distinct words collide (`sınır` and `sinir` both read `sinir`).

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

// ---------------------------------------------------------------------------
// Normalisation
// ---------------------------------------------------------------------------

/// Text that has been through [`normalize`]. Scans only accept this type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// The folded text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when nothing is left after folding.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Lowercase, fold Turkish diacritics and collapse whitespace runs.
pub fn normalize(text: &str) -> NormalizedText {
    let lowered: String = text
        .chars()
        .map(|c| if c == 'ı' { 'i' } else { c })
        .flat_map(char::to_lowercase)
        .collect();
    let folded: String = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();
    NormalizedText(folded.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Normalise several pieces of text as one space-joined document.
pub fn normalize_joined<'a, I>(parts: I) -> NormalizedText
where
    I: IntoIterator<Item = &'a str>,
{
    let joined = parts.into_iter().collect::<Vec<_>>().join(" ");
    normalize(&joined)
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// How a lexicon entry is located inside normalised text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStrategy {
    /// The entry must start at a word boundary. Suffixed forms still match
    /// (`stres` hits `stresliyim`), mid-word hits do not (`net` in `internet`).
    #[default]
    WordPrefix,
    /// Plain substring containment anywhere in the text.
    Substring,
}

impl MatchStrategy {
    /// Parse a config value (`word-prefix` / `substring`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "word-prefix" | "prefix" => Some(Self::WordPrefix),
            "substring" | "contains" => Some(Self::Substring),
            _ => None,
        }
    }

    fn matches(self, haystack: &str, needle: &str) -> bool {
        match self {
            Self::Substring => haystack.contains(needle),
            Self::WordPrefix => haystack.match_indices(needle).any(|(at, _)| {
                haystack[..at]
                    .chars()
                    .next_back()
                    .is_none_or(|prev| !prev.is_alphanumeric())
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Lexicons
// ---------------------------------------------------------------------------

/// A named, deduplicated list of normalised keyword entries.
#[derive(Debug, Clone)]
pub struct Lexicon {
    name: &'static str,
    entries: Vec<String>,
}

impl Lexicon {
    /// Build a lexicon, normalising and deduplicating the raw entries.
    pub fn new(name: &'static str, raw: &[&str]) -> Self {
        let mut entries: Vec<String> = Vec::with_capacity(raw.len());
        for term in raw {
            let folded = normalize(term).0;
            if !folded.is_empty() && !entries.contains(&folded) {
                entries.push(folded);
            }
        }
        Self { name, entries }
    }

    /// Lexicon name, used in log fields.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Normalised entries in declaration order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of distinct entries present in `text`. Each entry counts once.
    pub fn count_hits(&self, text: &NormalizedText, strategy: MatchStrategy) -> usize {
        self.entries
            .iter()
            .filter(|entry| strategy.matches(text.as_str(), entry))
            .count()
    }

    /// Whether any entry is present in `text`.
    pub fn any_hit(&self, text: &NormalizedText, strategy: MatchStrategy) -> bool {
        self.entries
            .iter()
            .any(|entry| strategy.matches(text.as_str(), entry))
    }
}

const CRISIS_TERMS: &[&str] = &[
    // hopelessness
    "hayatım bitti",
    "hiçbir anlamı yok",
    "anlam yok",
    "neden yaşıyorum",
    "yaşamak istemiyorum",
    "hayatıma son",
    // self-harm
    "ölmek",
    "ölsem",
    "intihar",
    "kendime zarar",
    "canıma kıy",
    // entrapment
    "hiçbir çıkış yok",
    "kurtuluş yok",
    "dayanamıyorum",
    "tahammül edemiyorum",
    // worthlessness
    "herkes bensiz daha iyi",
    "yük oluyorum",
    "değersiz",
    "işe yaramaz",
];

const ANXIETY_TERMS: &[&str] = &[
    "stres",
    "stresli",
    "stresliyim",
    "kaygı",
    "kaygılı",
    "panik",
    "korku",
    "korkuyorum",
    "endişe",
    "endişeli",
    "kilitlen",
    "kilitlendim",
    "kilitleniyorum",
    "donakal",
    "dondum",
    "takıldım",
    "odaklanamıyorum",
    "odaklanamama",
    "dikkat",
    "konsantre",
    "dağınık",
    "dağıldım",
    "yapamıyorum",
    "başaramıyorum",
    "çok zor",
    "imkansız",
    "çıkmaz",
    "umutsuz",
    "çözemiyorum",
    "anlamıyorum",
    "kafam karışık",
    "beynim durdu",
    "aklım almıyor",
    "kafam dolu",
    "kafam çok dolu",
    "sinir",
    "sinirli",
    "gergin",
    "huzursuz",
    "rahatsız",
    "kötü hissediyorum",
    "kendimi kötü",
    "çok kötü",
    "berbat",
    "rezalet",
    "yetersiz",
    "yetersizim",
    "başarısız",
    "beceriksiz",
    "aptal",
    "hiçbir şey",
    "hiçbir şey yapamıyorum",
    "çalışamıyorum",
    "okuyamıyorum",
    "ders yapamıyorum",
    "kitap açamıyorum",
];

const MOTIVATION_TERMS: &[&str] = &[
    "istemiyorum",
    "yapmak istemiyorum",
    "çalışmak istemiyorum",
    "içimden gelmiyor",
    "içinden gelmiyor",
    "hiç içimden gelmiyor",
    "ertele",
    "erteliyorum",
    "yarın",
    "sonra",
    "daha sonra",
    "biraz sonra",
    "bırak",
    "bırakmak",
    "bırakacağım",
    "vazgeç",
    "vazgeçtim",
    "yapamayacağım",
    "boşver",
    "boş ver",
    "umursamıyorum",
    "ne anlamı var",
    "motivasyon",
    "motivasyonum yok",
    "isteksiz",
    "tembel",
    "tembellik",
    "başlamak",
    "başlayamıyorum",
    "nasıl başlarım",
    "nereden başlamalıyım",
    "başlangıç",
    "disiplin",
    "düzen",
    "düzensiz",
    "dağınık",
    "plansız",
    "devam edemiyorum",
    "sürdüremiyorum",
    "hep bırakıyorum",
    "başlıyorum ama",
    "yarıda",
    "yarım bırakıyorum",
    "yoruldum",
    "çok yoruldum",
    "bitkinim",
    "tükendim",
    "çalışmıyorum",
    "hiç çalışmıyorum",
    "tembellik yapıyorum",
];

const CAREER_TERMS: &[&str] = &[
    "ne olmak istiyorum",
    "hangi meslek",
    "kariyer",
    "gelecek",
    "ileride",
    "yetenek",
    "yeteneklerim",
    "yatkınlık",
    "yatkın",
    "ilgi",
    "ilgilerim",
    "güçlü yön",
    "neye yatkınım",
    "yatkınım",
    "kendimi tanımak",
    "kim olduğum",
    "ne istediğim",
    "neye uygun",
    "gelişim yönü",
    "hangi alan",
    "ne yapmalıyım",
    "yönlendir",
    "ne yapacağımı bilmiyorum",
    "ne yapacağımı",
    "bölüm",
    "bölüm seçimi",
    "üniversite seçimi",
    "alan seçimi",
    "sayısal mı sözel mi",
    "sayısalcı mıyım",
    "sözelci mi",
    "sayısalcı",
    "sözelci",
    "neyi severim",
    "neye yatkınım",
    "hangi alanlarda",
    "iyi olduğum",
    "güçlü yanım",
    "daha iyiyim",
    "daha iyi olduğum",
];

const ACADEMIC_TERMS: &[&str] = &[
    "soru",
    "problem",
    "çöz",
    "çözüm",
    "çözümle",
    "nasıl çözerim",
    "konu",
    "ders",
    "matematik",
    "fizik",
    "kimya",
    "biyoloji",
    "tarih",
    "coğrafya",
    "edebiyat",
    "türkçe",
    "ingilizce",
    "geometri",
    "paragraf",
    "dil bilgisi",
    "program",
    "plan",
    "çalışma planı",
    "çalışma programı",
    "günlük plan",
    "haftalık plan",
    "deneme",
    "net",
    "hedef",
    "sınav",
    "test",
    "puan",
    "sıralama",
    "soru çöz",
    "konu çalış",
    "tekrar",
    "özet",
    "not",
    "formül",
    "kural",
    "nasıl çalışmalıyım",
    "ne çalışayım",
    "bugün ne yapayım",
    "bu hafta",
];

/// Crisis phrases. Any hit makes the safety verdict critical.
pub static CRISIS: LazyLock<Lexicon> = LazyLock::new(|| Lexicon::new("crisis", CRISIS_TERMS));

/// Stress, anxiety, blockage and inadequacy vocabulary.
pub static ANXIETY: LazyLock<Lexicon> =
    LazyLock::new(|| Lexicon::new("anxiety", ANXIETY_TERMS));

/// Procrastination, reluctance and quitting vocabulary.
pub static MOTIVATION: LazyLock<Lexicon> =
    LazyLock::new(|| Lexicon::new("motivation", MOTIVATION_TERMS));

/// Self-discovery and direction vocabulary.
pub static CAREER: LazyLock<Lexicon> = LazyLock::new(|| Lexicon::new("career", CAREER_TERMS));

/// Subjects, planning and exam vocabulary.
pub static ACADEMIC: LazyLock<Lexicon> =
    LazyLock::new(|| Lexicon::new("academic", ACADEMIC_TERMS));
