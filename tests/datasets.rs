// Additional integration tests for static table invariants.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use cyber_grid::puzzle::WORD_BANK;
use cyber_grid::{MISSION_LINES, SPEECH_LINES};

fn sorted_letters(s: &str) -> Vec<char> {
    let mut v: Vec<char> = s.chars().collect();
    v.sort_unstable();
    v
}

#[test]
fn word_bank_entries_are_true_anagrams() {
    let mut seen = HashSet::new();
    for (jumbled, word) in WORD_BANK {
        assert!(seen.insert(*word), "duplicate word '{}' in WORD_BANK", word);
        assert!(!word.is_empty());
        assert_ne!(jumbled, word, "'{}' is not scrambled", word);
        assert_eq!(sorted_letters(jumbled), sorted_letters(word), "'{}' is not an anagram of '{}'", jumbled, word);
        for c in jumbled.chars().chain(word.chars()) {
            assert!(c.is_ascii_uppercase(), "invalid char '{}' in '{}'/'{}'", c, jumbled, word);
        }
    }
}

#[test]
fn narration_tables_are_nonempty_and_unique() {
    for table in [SPEECH_LINES, MISSION_LINES] {
        assert!(!table.is_empty());
        let unique: HashSet<&str> = table.iter().copied().collect();
        assert_eq!(unique.len(), table.len());
        assert!(table.iter().all(|l| !l.trim().is_empty()));
    }
}
