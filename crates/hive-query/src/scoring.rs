//! Scoring engine ranking hexes against a free-text intent

use crate::tokenizer::{expand_text, overlap, ConceptSet};
use hive_domain::Hex;
use serde::Serialize;

/// Weight of one overlapping word in an entry hint
pub const HINT_WEIGHT: f64 = 1.0;

/// Weight of one overlapping word in the name
pub const NAME_WEIGHT: f64 = 0.5;

/// Weight of one overlapping word in the description
pub const DESCRIPTION_WEIGHT: f64 = 0.3;

/// Flat bonus for each tag found in the expanded intent
pub const TAG_BONUS: f64 = 0.5;

/// A hex ranked against an intent
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult<'a> {
    /// The matched hex
    pub hex: &'a Hex,

    /// Relevance score (always > 0)
    pub score: f64,

    /// Entry hints that overlapped the intent
    pub matched_hints: Vec<String>,
}

/// Score one hex against an already expanded intent.
///
/// Returns the score and the entry hints that contributed to it.
pub fn score_hex(hex: &Hex, expanded_intent: &ConceptSet) -> (f64, Vec<String>) {
    let mut score = 0.0;
    let mut matched_hints = Vec::new();

    for hint in &hex.entry_hints {
        let hits = overlap(expanded_intent, &expand_text(hint));
        if hits > 0 {
            matched_hints.push(hint.clone());
            score += hits as f64 * HINT_WEIGHT;
        }
    }

    score += overlap(expanded_intent, &expand_text(&hex.name)) as f64 * NAME_WEIGHT;

    if let Some(description) = &hex.description {
        score += overlap(expanded_intent, &expand_text(description)) as f64 * DESCRIPTION_WEIGHT;
    }

    for tag in &hex.tags {
        if expanded_intent.contains(&tag.to_lowercase()) {
            score += TAG_BONUS;
        }
    }

    (score, matched_hints)
}

/// Rank `hexes` against `intent`.
///
/// Returns at most `limit` results with a positive score, best first. Equal
/// scores keep corpus order.
pub fn query_hexes<'a>(hexes: &'a [Hex], intent: &str, limit: usize) -> Vec<QueryResult<'a>> {
    let expanded_intent = expand_text(intent);

    let mut results: Vec<QueryResult<'a>> = hexes
        .iter()
        .filter_map(|hex| {
            let (score, matched_hints) = score_hex(hex, &expanded_intent);
            (score > 0.0).then_some(QueryResult {
                hex,
                score,
                matched_hints,
            })
        })
        .collect();

    // Vec::sort_by is stable, which keeps ties in corpus order
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results.truncate(limit);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use hive_domain::HexKind;

    fn hex(id: &str, name: &str, hints: &[&str]) -> Hex {
        Hex::new(
            id,
            name,
            HexKind::Data,
            hints.iter().map(|h| h.to_string()).collect(),
        )
    }

    #[test]
    fn test_hint_overlap_counts_fully() {
        let h = hex("deploy-guide", "Zzz", &["deploy pipeline"]);
        let intent = expand_text("deploy");
        let (score, matched) = score_hex(&h, &intent);
        // "deploy" expands to itself plus 7 synonyms, all shared with the hint
        assert_eq!(score, 8.0);
        assert_eq!(matched, vec!["deploy pipeline".to_string()]);
    }

    #[test]
    fn test_name_and_description_weights() {
        let h = hex("x", "pipeline", &["unrelated words"]).with_description("pipeline notes");
        let intent = expand_text("pipeline");
        let (score, matched) = score_hex(&h, &intent);
        assert!((score - (NAME_WEIGHT + DESCRIPTION_WEIGHT)).abs() < 1e-9);
        assert!(matched.is_empty());
    }

    #[test]
    fn test_tag_bonus_is_case_insensitive() {
        let h = hex("x", "Zzz", &["qqq"]).with_tags(["UI"]);
        let (score, _) = score_hex(&h, &expand_text("button"));
        assert_eq!(score, TAG_BONUS);
    }

    #[test]
    fn test_zero_scores_are_excluded() {
        let hexes = vec![hex("a", "Alpha", &["nothing here"])];
        assert!(query_hexes(&hexes, "kubernetes", 5).is_empty());
    }

    #[test]
    fn test_results_sorted_and_limited() {
        let hexes = vec![
            hex("weak", "Weak", &["pipeline"]),
            hex("strong", "Strong", &["pipeline stages", "pipeline stages overview"]),
            hex("tie", "Tie", &["pipeline"]),
        ];
        let results = query_hexes(&hexes, "pipeline stages", 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].hex.id, "strong");
        // "weak" and "tie" score the same; corpus order wins
        assert_eq!(results[1].hex.id, "weak");
    }

    #[test]
    fn test_hints_dominate_name() {
        let hexes = vec![
            hex("by-name", "Database Schema", &["unrelated"]),
            hex("by-hint", "Other", &["database schema"]),
        ];
        let results = query_hexes(&hexes, "database schema", 5);
        assert_eq!(results[0].hex.id, "by-hint");
    }
}
