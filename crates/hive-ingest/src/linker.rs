//! Ordering edges between hexes from consecutive chunks

use crate::ids::{sanitize, truncate_chars, unique_edge_id};
use hive_domain::{Edge, EdgeCondition, Hex};

/// Priority of previous/next section edges
pub const SECTION_EDGE_PRIORITY: i32 = 80;

/// Intent that follows an edge to the preceding hex
pub const PREVIOUS_SECTION_INTENT: &str = "previous section";

/// Intent that follows an edge to the following hex
pub const NEXT_SECTION_INTENT: &str = "next section";

/// Tag grouping every hex of one document
pub fn provenance_tag(source_label: &str, max_len: usize) -> String {
    let tag = sanitize(source_label);
    truncate_chars(&tag, max_len).trim_end_matches('-').to_string()
}

/// Chain `hexes` in order with previous/next section edges and tag each with
/// the provenance of `source_label`.
///
/// The first hex gets no previous edge and the last no next edge. The tag is
/// only added where missing.
pub fn link_chunks(hexes: &mut [Hex], source_label: &str, tag_max_len: usize) {
    let tag = provenance_tag(source_label, tag_max_len);
    let neighbours: Vec<(String, String)> = hexes
        .iter()
        .map(|hex| (hex.id.clone(), hex.name.clone()))
        .collect();
    let last = hexes.len().saturating_sub(1);

    for (i, hex) in hexes.iter_mut().enumerate() {
        if i > 0 {
            let (id, name) = &neighbours[i - 1];
            push_section_edge(hex, "prev-section", id, PREVIOUS_SECTION_INTENT, "Previous", name);
        }
        if i < last {
            let (id, name) = &neighbours[i + 1];
            push_section_edge(hex, "next-section", id, NEXT_SECTION_INTENT, "Next", name);
        }
        hex.add_tag(tag.as_str());
    }
}

fn push_section_edge(
    hex: &mut Hex,
    base_id: &str,
    to: &str,
    intent: &str,
    label: &str,
    target_name: &str,
) {
    let id = unique_edge_id(hex, base_id);
    hex.edges.push(Edge::new(
        id,
        to,
        EdgeCondition::intent(intent),
        SECTION_EDGE_PRIORITY,
        format!("{} section: {}", label, target_name),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use hive_domain::HexKind;

    fn hexes(ids: &[&str]) -> Vec<Hex> {
        ids.iter()
            .map(|id| Hex::new(*id, id.to_uppercase(), HexKind::Data, vec![id.to_string()]))
            .collect()
    }

    fn edge_to<'a>(hex: &'a Hex, to: &str, intent: &str) -> Option<&'a Edge> {
        hex.edges
            .iter()
            .find(|e| e.to == to && e.when.intent.as_deref() == Some(intent))
    }

    #[test]
    fn test_two_hexes_link_both_ways() {
        let mut nodes = hexes(&["n1", "n2"]);
        link_chunks(&mut nodes, "guide.md", 20);

        let next = edge_to(&nodes[0], "n2", NEXT_SECTION_INTENT).unwrap();
        assert_eq!(next.priority, SECTION_EDGE_PRIORITY);
        assert_eq!(next.description, "Next section: N2");

        let prev = edge_to(&nodes[1], "n1", PREVIOUS_SECTION_INTENT).unwrap();
        assert_eq!(prev.priority, SECTION_EDGE_PRIORITY);

        assert_eq!(nodes[0].edges.len(), 1);
        assert_eq!(nodes[1].edges.len(), 1);
        assert_eq!(nodes[0].tags, vec!["guide-md".to_string()]);
        assert_eq!(nodes[0].tags, nodes[1].tags);
    }

    #[test]
    fn test_middle_hex_has_both_edges() {
        let mut nodes = hexes(&["a", "b", "c"]);
        link_chunks(&mut nodes, "doc", 20);

        assert!(edge_to(&nodes[0], "b", NEXT_SECTION_INTENT).is_some());
        assert!(edge_to(&nodes[0], "c", NEXT_SECTION_INTENT).is_none());
        assert!(edge_to(&nodes[1], "a", PREVIOUS_SECTION_INTENT).is_some());
        assert!(edge_to(&nodes[1], "c", NEXT_SECTION_INTENT).is_some());
        assert!(nodes[2]
            .edges
            .iter()
            .all(|e| e.when.intent.as_deref() != Some(NEXT_SECTION_INTENT)));
    }

    #[test]
    fn test_tag_not_duplicated() {
        let mut nodes = hexes(&["a", "b"]);
        nodes[0].add_tag("doc");
        link_chunks(&mut nodes, "doc", 20);
        assert_eq!(nodes[0].tags, vec!["doc".to_string()]);
    }

    #[test]
    fn test_existing_edge_ids_are_not_reused() {
        let mut nodes = hexes(&["a", "b"]);
        nodes[0].edges.push(Edge::new(
            "next-section",
            "elsewhere",
            EdgeCondition::always(),
            10,
            "",
        ));
        link_chunks(&mut nodes, "doc", 20);
        assert_eq!(nodes[0].edges[1].id, "next-section-1");
        assert!(nodes[0].validate().is_ok());
    }

    #[test]
    fn test_provenance_tag_is_capped() {
        let tag = provenance_tag("A Very Long Document Name.pdf", 20);
        assert_eq!(tag, "a-very-long-document");
        assert!(tag.len() <= 20);

        // Never ends on a hyphen after the cut
        assert_eq!(provenance_tag("abcd efgh", 5), "abcd");
    }
}
