//! Corrupted and adversarial input.
//!
//! Assets are untrusted. Garbage must produce errors (or wrong answers for
//! garbage that happens to parse), never panics. Walks over corrupted
//! guides end on their own; `take` only keeps each case fast.

use lexidawg::binary::{decode_completion_dawg, encode_completion_dawg};
use lexidawg::{AnalyzerConfig, Bundle, MorphAnalyzer, ParadigmTable};
use proptest::prelude::*;

use super::common::{build_completion_dawg, sample_builder};

const WALK_LIMIT: usize = 256;

fn encoded_sample_dawg() -> Vec<u8> {
    let dawg = build_completion_dawg(["car", "cart", "cat", "dog", "do", "кіт"]);
    let mut buf = Vec::new();
    encode_completion_dawg(&dawg, &mut buf);
    buf
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: decoding arbitrary bytes never panics.
    #[test]
    fn prop_decode_dawg_total(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode_completion_dawg(&data);
    }

    /// Property: mutated unit and guide bytes never make lookups panic.
    #[test]
    fn prop_mutated_dawg_lookups_total(
        mutations in prop::collection::vec((any::<prop::sample::Index>(), any::<u8>()), 1..8),
        probe in "[a-zкіт]{0,5}",
    ) {
        let mut buf = encoded_sample_dawg();
        let unit_count = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]) as usize;
        let guide_count_pos = 4 + unit_count * 4;

        for (index, byte) in mutations {
            let pos = index.index(buf.len());
            // Keep the two count fields intact so the file still decodes
            if pos < 4 || (guide_count_pos..guide_count_pos + 4).contains(&pos) {
                continue;
            }
            buf[pos] = byte;
        }

        let dawg = decode_completion_dawg(&buf).unwrap();
        let _ = dawg.has(probe.as_bytes());
        let _ = dawg.has_completions(probe.as_bytes());
        let _: Vec<_> = dawg.completions(probe.as_bytes()).take(WALK_LIMIT).collect();
        let _: Vec<_> = dawg.completions(b"").take(WALK_LIMIT).collect();
    }

    /// Property: parsing arbitrary bytes as a bundle never panics.
    #[test]
    fn prop_bundle_parse_total(data in prop::collection::vec(any::<u8>(), 0..128)) {
        let _ = Bundle::from_bytes(&data);
    }

    /// Property: paradigm decoding never panics and never over-reads.
    #[test]
    fn prop_paradigm_decode_total(data in prop::collection::vec(any::<u8>(), 0..128)) {
        if let Ok(table) = ParadigmTable::decode(&data) {
            let mut buf = Vec::new();
            table.encode(&mut buf);
            prop_assert_eq!(buf, data);
        }
    }

    /// Property: an analyzer over mutated paradigm bytes either refuses to
    /// load or answers every query with Ok/Err, never a panic.
    #[test]
    fn prop_mutated_paradigms_total(
        mutations in prop::collection::vec((any::<prop::sample::Index>(), any::<u8>()), 1..4),
        word in "[кіотапесми]{1,5}",
    ) {
        let [words, mut paradigms, suffixes, tags] = sample_builder().encode_assets().unwrap();
        for (index, byte) in mutations {
            let pos = index.index(paradigms.len());
            paradigms[pos] = byte;
        }

        if let Ok(analyzer) =
            MorphAnalyzer::from_parts(&words, &paradigms, &suffixes, &tags, &AnalyzerConfig::default())
        {
            let _ = analyzer.tag(&word);
            let _ = analyzer.dict_has(&word);
        }
    }
}
