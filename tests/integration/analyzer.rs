//! End-to-end analyzer behavior over the sample dictionary.

use std::sync::Arc;
use std::thread;

use lexidawg::binary::{decode_completion_dawg, encode_completion_dawg};
use lexidawg::{
    AnalyzerConfig, CompletionDawg, DictError, Guide, MorphAnalyzer, MorphInterp, WordPayload,
};

use super::common::{sample_analyzer, sample_builder, sorted_pairs, MorphDictBuilder};

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut out: Vec<_> = items
        .iter()
        .map(|(l, t)| (l.to_string(), t.to_string()))
        .collect();
    out.sort();
    out
}

// ============================================================================
// TAGGING
// ============================================================================

#[test]
fn test_full_paradigm_resolves_to_lemma() {
    let analyzer = sample_analyzer();

    let cases = [
        ("кіт", "noun:m:v_naz"),
        ("кота", "noun:m:v_rod"),
        ("коти", "noun:m:v_naz:p"),
    ];
    for (form, tag) in cases {
        assert_eq!(
            analyzer.tag(form).unwrap(),
            vec![MorphInterp::new("кіт", tag)],
            "form {form}"
        );
    }
}

#[test]
fn test_homonym_gets_every_reading() {
    let analyzer = sample_analyzer();
    assert_eq!(
        sorted_pairs(&analyzer.tag("мати").unwrap()),
        pairs(&[("мати", "noun:f:v_naz"), ("мати", "verb:inf")])
    );
    assert_eq!(
        sorted_pairs(&analyzer.tag("маю").unwrap()),
        pairs(&[("мати", "verb:pres:s:1")])
    );
}

#[test]
fn test_tag_is_total() {
    let analyzer = sample_analyzer();
    for form in ["", " ", "кіт", "0", "1a", "!!!", "МАТИ", "ß", "日本"] {
        let interps = analyzer.tag(form).unwrap();
        assert!(!interps.is_empty(), "tag({form:?}) should never be empty");
    }
}

#[test]
fn test_empty_string_is_unknown() {
    let analyzer = sample_analyzer();
    assert_eq!(analyzer.tag("").unwrap(), vec![MorphInterp::new("", "x")]);
}

#[test]
fn test_uppercase_keeps_original_for_unknown() {
    let analyzer = sample_analyzer();
    assert_eq!(
        analyzer.tag("Київ").unwrap(),
        vec![MorphInterp::new("Київ", "x")]
    );
}

#[test]
fn test_lookup_variants_dedups_across_spellings() {
    let analyzer = sample_analyzer();
    let interps = analyzer.lookup_variants(["кота", "кота", "пса"]).unwrap();
    assert_eq!(
        sorted_pairs(&interps),
        pairs(&[("кіт", "noun:m:v_rod"), ("пес", "noun:m:v_rod")])
    );
}

#[test]
fn test_tag_batch_large_input() {
    let analyzer = sample_analyzer();
    let forms: Vec<String> = (0..500)
        .map(|i| match i % 4 {
            0 => "коти".to_string(),
            1 => i.to_string(),
            2 => format!("невідоме{i}"),
            _ => "Мати".to_string(),
        })
        .collect();

    let batch = analyzer.tag_batch(&forms).unwrap();
    assert_eq!(batch.len(), forms.len());
    for (form, interps) in forms.iter().zip(&batch) {
        assert_eq!(interps, &analyzer.tag(form).unwrap());
    }
}

// ============================================================================
// LOWER LAYERS THROUGH THE ANALYZER
// ============================================================================

#[test]
fn test_words_dawg_records() {
    let analyzer = sample_analyzer();
    let records: Vec<WordPayload> = analyzer.words().get("коти").unwrap();
    assert_eq!(records.len(), 1);

    let paradigm = analyzer.paradigms().get(records[0].paradigm_id).unwrap();
    assert_eq!(paradigm.len(), 3);
    assert_eq!(records[0].slot, 2);
}

#[test]
fn test_prefix_completion_over_words() {
    let analyzer = sample_analyzer();
    let dawg = analyzer.words().bytes_dawg().completion_dawg();
    let separator = analyzer.words().bytes_dawg().separator();

    // Every stored key under "ко" is a form followed by its payload
    let forms: Vec<String> = dawg
        .completions("ко".as_bytes())
        .map(|c| {
            let c = c.unwrap();
            let end = c.iter().position(|&b| b == separator).unwrap();
            String::from_utf8(c[..end].to_vec()).unwrap()
        })
        .collect();
    assert_eq!(forms, vec!["та", "ти"]);
}

#[test]
fn test_broken_guide_under_form_is_an_error_not_unknown() {
    let [words, paradigms, suffixes, tags] = sample_builder().encode_assets().unwrap();
    let dawg = decode_completion_dawg(&words).unwrap();
    let dictionary = dawg.dictionary().clone();

    // Drop the guide child of the state right after "пса" + separator
    let key = [&"пса".as_bytes()[..], &[0x01]].concat();
    let state = dictionary.follow_bytes(&key, dictionary.root()).unwrap();
    let mut guide = dawg.guide().as_bytes().to_vec();
    guide[state as usize * 2] = 0;

    let mut corrupted = Vec::new();
    encode_completion_dawg(&CompletionDawg::new(dictionary, Guide::new(guide)), &mut corrupted);
    let analyzer = MorphAnalyzer::from_parts(
        &corrupted,
        &paradigms,
        &suffixes,
        &tags,
        &AnalyzerConfig::default(),
    )
    .unwrap();

    assert!(matches!(
        analyzer.tag("пса"),
        Err(DictError::BrokenGuide { label: 0, .. })
    ));
    assert!(matches!(
        analyzer.lookup("пса"),
        Err(DictError::BrokenGuide { .. })
    ));
    // Other forms are untouched
    assert_eq!(analyzer.tag("пес").unwrap(), vec![MorphInterp::new("пес", "noun:m:v_naz")]);
}

// ============================================================================
// SHARING
// ============================================================================

#[test]
fn test_analyzer_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MorphAnalyzer>();

    let analyzer = Arc::new(sample_analyzer());
    let expected = analyzer.tag("пси").unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let analyzer = Arc::clone(&analyzer);
            thread::spawn(move || analyzer.tag("пси").unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_clone_shares_tables() {
    let analyzer = sample_analyzer();
    let clone = analyzer.clone();
    assert_eq!(clone.tag("кота").unwrap(), analyzer.tag("кота").unwrap());
}

#[test]
fn test_larger_generated_dictionary() {
    let mut builder = MorphDictBuilder::new();
    let stems: Vec<String> = (0..200).map(|i| format!("слово{i:03}")).collect();
    for stem in &stems {
        builder.add_lexeme(stem, &[("", "noun:v_naz"), ("а", "noun:v_rod"), ("ами", "noun:v_oru:p")]);
    }
    let analyzer = builder.build().unwrap();

    for stem in &stems {
        let form = format!("{stem}ами");
        assert_eq!(
            analyzer.tag(&form).unwrap(),
            vec![MorphInterp::new(stem.clone(), "noun:v_oru:p")]
        );
    }
    assert_eq!(analyzer.paradigms().len(), 1);
}
