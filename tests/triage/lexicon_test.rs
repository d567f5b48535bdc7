//! Normalisation and keyword matching.

use visi::triage::lexicon::{
    normalize, normalize_joined, MatchStrategy, ACADEMIC, ANXIETY, CAREER, CRISIS, MOTIVATION,
};

#[test]
fn dotted_and_dotless_i_fold_together() {
    assert_eq!(normalize("KIZGIN").as_str(), normalize("kızgın").as_str());
    assert_eq!(normalize("İSTEMİYORUM").as_str(), "istemiyorum");
}

#[test]
fn joined_text_is_space_separated() {
    let text = normalize_joined(["Çok  stresliyim", "", "Sınav yarın"]);
    assert_eq!(text.as_str(), "cok stresliyim sinav yarin");
}

#[test]
fn empty_input_normalises_to_empty() {
    assert!(normalize("   \n").is_empty());
}

#[test]
fn each_entry_counts_once() {
    let text = normalize("stres stres stres");
    // "stres" hits once; "stresli" and "stresliyim" do not occur.
    assert_eq!(ANXIETY.count_hits(&text, MatchStrategy::WordPrefix), 1);
}

#[test]
fn suffixed_forms_match_by_prefix() {
    let text = normalize("Kaygılıyım ve sorularda kilitleniyorum");
    let strategy = MatchStrategy::WordPrefix;
    assert!(ANXIETY.count_hits(&text, strategy) >= 3);
    assert!(ACADEMIC.any_hit(&text, strategy));
}

#[test]
fn word_prefix_skips_hits_inside_words() {
    let text = normalize("İnternet yavaş");
    assert!(!ACADEMIC.any_hit(&text, MatchStrategy::WordPrefix));
    assert!(ACADEMIC.any_hit(&text, MatchStrategy::Substring));
}

#[test]
fn lexicons_are_named_and_non_empty() {
    for lexicon in [&*CRISIS, &*ANXIETY, &*MOTIVATION, &*CAREER, &*ACADEMIC] {
        assert!(!lexicon.entries().is_empty(), "{} is empty", lexicon.name());
        assert!(lexicon
            .entries()
            .iter()
            .all(|e| e.as_str() == normalize(e).as_str()));
    }
}

#[test]
fn match_strategy_parses_config_spellings() {
    assert_eq!(MatchStrategy::parse("word_prefix"), Some(MatchStrategy::WordPrefix));
    assert_eq!(MatchStrategy::parse(" Substring "), Some(MatchStrategy::Substring));
    assert_eq!(MatchStrategy::parse("regex"), None);
}
