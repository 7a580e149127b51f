//! Tokenization and one-hop concept expansion

use crate::concepts::CONCEPT_MAP;
use std::collections::BTreeSet;

/// A set of expanded search words
pub type ConceptSet = BTreeSet<String>;

/// Words shorter than this are dropped
const MIN_TOKEN_LEN: usize = 3;

/// Split text into lowercase search words.
///
/// Everything outside `[a-z0-9]` and whitespace is removed before splitting,
/// so "don't" becomes "dont". Words shorter than three characters are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| word.len() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

/// Expand words through the concept table.
///
/// The result holds every input word, the synonyms of every input word that
/// is a concept key, and for every input word that is a synonym, its key plus
/// all sibling synonyms. Expanded words are not expanded again.
pub fn expand<S: AsRef<str>>(words: &[S]) -> ConceptSet {
    let mut expanded: ConceptSet = words.iter().map(|w| w.as_ref().to_string()).collect();

    for word in words {
        let word = word.as_ref();
        for (key, synonyms) in CONCEPT_MAP {
            if *key == word {
                expanded.extend(synonyms.iter().map(|s| s.to_string()));
            }
            if synonyms.contains(&word) {
                expanded.insert(key.to_string());
                expanded.extend(synonyms.iter().map(|s| s.to_string()));
            }
        }
    }

    expanded
}

/// Tokenize then expand
pub fn expand_text(text: &str) -> ConceptSet {
    expand(&tokenize(text))
}

/// Number of words the two sets share
pub fn overlap(a: &ConceptSet, b: &ConceptSet) -> usize {
    a.intersection(b).count()
}
