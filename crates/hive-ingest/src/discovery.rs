//! Relationship discovery between new hexes and the existing corpus

use crate::ids::unique_edge_id;
use hive_domain::{Edge, EdgeCondition, Hex};
use hive_query::query_hexes;
use tracing::debug;

/// Priority of the best related edge
pub const RELATED_BASE_PRIORITY: i32 = 50;

/// Priority lost per rank
pub const RELATED_RANK_STEP: i32 = 10;

/// Hints of a hex that go into its search intent
const INTENT_HINTS: usize = 3;

/// Search intent standing in for a hex: name, description, first hints
pub fn discovery_intent(hex: &Hex) -> String {
    let mut parts: Vec<&str> = vec![hex.name.as_str(), hex.description.as_deref().unwrap_or("")];
    parts.extend(hex.entry_hints.iter().take(INTENT_HINTS).map(String::as_str));
    parts.join(" ")
}

/// Link every new hex to its best matches in `corpus`.
///
/// Results below `min_score` and the hex itself are dropped. The remaining
/// results get `related-` edges with priority `50 - 10 * rank`, not clamped.
/// Destinations the hex already links to are skipped. Edges are only ever
/// added. Returns the number of edges added.
pub fn discover(new_hexes: &mut [Hex], corpus: &[Hex], limit: usize, min_score: f64) -> usize {
    let mut added = 0;

    for hex in new_hexes.iter_mut() {
        let intent = discovery_intent(hex);
        let related: Vec<(String, String)> = query_hexes(corpus, &intent, limit)
            .into_iter()
            .filter(|result| result.score >= min_score && result.hex.id != hex.id)
            .map(|result| (result.hex.id.clone(), result.hex.name.clone()))
            .collect();

        for (rank, (to, name)) in related.into_iter().enumerate() {
            if hex.has_edge_to(&to) {
                continue;
            }
            let id = unique_edge_id(hex, &format!("related-{}", to));
            let priority = RELATED_BASE_PRIORITY - RELATED_RANK_STEP * rank as i32;
            hex.edges.push(Edge::new(
                id,
                to,
                EdgeCondition::intent(format!("explore {}", name.to_lowercase())),
                priority,
                format!("Related: {}", name),
            ));
            added += 1;
        }
    }

    debug!("Discovered {} related edges", added);
    added
}
