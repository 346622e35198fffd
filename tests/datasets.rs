// Dataset invariants for the built-in character list.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use hanzi_sketch::dataset::{self, CHARACTERS};

#[test]
fn simplified_entries_are_unique_single_characters() {
    let mut seen = HashSet::new();
    for (s, t, _, _) in CHARACTERS {
        assert!(seen.insert(*s), "duplicate character '{}' in CHARACTERS", s);
        assert_eq!(s.chars().count(), 1, "'{}' should be a single character", s);
        assert_eq!(t.chars().count(), 1, "traditional form '{}' of '{}' should be a single character", t, s);
    }
}

#[test]
fn every_entry_has_pinyin_and_meaning() {
    for (s, _, p, m) in CHARACTERS {
        assert!(!p.trim().is_empty(), "empty pinyin for '{}'", s);
        assert!(!m.trim().is_empty(), "empty meaning for '{}'", s);
        for c in p.chars() {
            assert!(c.is_alphabetic(), "invalid char '{}' in pinyin '{}' for '{}'", c, p, s);
            assert!(!c.is_ascii_digit(), "pinyin '{}' for '{}' should use tone marks", p, s);
        }
    }
}

#[test]
fn meanings_identify_a_single_target() {
    // The quiz shows only the meaning, so two entries must not share one.
    let mut seen = HashSet::new();
    for (s, _, _, m) in CHARACTERS {
        assert!(seen.insert(*m), "meaning '{}' of '{}' is ambiguous", m, s);
    }
}

#[test]
fn builtin_records_mirror_table() {
    let records = dataset::builtin();
    assert_eq!(records.len(), CHARACTERS.len());
    let person = records.iter().find(|r| r.simplified == "人").unwrap();
    assert_eq!(person.pinyin, "rén");
    assert_eq!(person.meaning, "person");
}

#[test]
fn random_pick_comes_from_pool() {
    let records = dataset::builtin();
    for _ in 0..50 {
        let pick = dataset::pick_random(&records).unwrap();
        assert!(records.contains(pick));
    }
    assert!(dataset::pick_random(&[]).is_none());
}
