//! Edge module - conditional, payload-transforming links between hexes

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Runtime payload an agent carries while walking the graph
pub type Payload = Map<String, Value>;

/// Condition under which an edge may be followed.
///
/// Every specified clause must hold. Unspecified clauses are ignored, and a
/// condition with no clause at all never matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeCondition {
    /// Intent must contain this substring (case-insensitive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,

    /// Payload must have all of these keys
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub has_data: Vec<String>,

    /// Payload must lack all of these keys
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lacks: Vec<String>,

    /// Payload values must equal these exactly
    #[serde(default, rename = "match", skip_serializing_if = "Map::is_empty")]
    pub match_values: Payload,

    /// Unconditional fallback
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub always: bool,
}

impl EdgeCondition {
    /// Condition matching an intent substring
    pub fn intent(intent: impl Into<String>) -> Self {
        Self {
            intent: Some(intent.into()),
            ..Self::default()
        }
    }

    /// Condition that always matches
    pub fn always() -> Self {
        Self {
            always: true,
            ..Self::default()
        }
    }

    /// Whether no clause is specified
    pub fn is_empty(&self) -> bool {
        self.intent.is_none()
            && self.has_data.is_empty()
            && self.lacks.is_empty()
            && self.match_values.is_empty()
            && !self.always
    }

    /// Evaluate the condition against an intent and payload
    pub fn matches(&self, intent: &str, payload: &Payload) -> bool {
        if self.is_empty() {
            return false;
        }

        if let Some(wanted) = &self.intent {
            if !intent.to_lowercase().contains(&wanted.to_lowercase()) {
                return false;
            }
        }

        if !self.has_data.iter().all(|key| payload.contains_key(key)) {
            return false;
        }

        if self.lacks.iter().any(|key| payload.contains_key(key)) {
            return false;
        }

        self.match_values
            .iter()
            .all(|(key, expected)| payload.get(key) == Some(expected))
    }
}

/// How the payload is reshaped when an edge is followed.
///
/// Steps run strictly in the order pick, omit, inject, rename.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeTransform {
    /// Keep only these keys
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pick: Vec<String>,

    /// Drop these keys
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub omit: Vec<String>,

    /// Merge in these static values
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub inject: Payload,

    /// Rename keys (old name -> new name)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rename: BTreeMap<String, String>,
}

impl EdgeTransform {
    /// Apply the transform to a payload
    pub fn apply(&self, payload: &Payload) -> Payload {
        let mut out = if self.pick.is_empty() {
            payload.clone()
        } else {
            payload
                .iter()
                .filter(|(key, _)| self.pick.contains(key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        };

        for key in &self.omit {
            out.remove(key);
        }

        for (key, value) in &self.inject {
            out.insert(key.clone(), value.clone());
        }

        for (from, to) in &self.rename {
            if let Some(value) = out.remove(from) {
                out.insert(to.clone(), value);
            }
        }

        out
    }
}

/// An outbound edge of a hex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Identifier, unique within the owning hex
    pub id: String,

    /// Destination hex identifier
    pub to: String,

    /// When the edge may be followed
    pub when: EdgeCondition,

    /// Optional payload reshaping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<EdgeTransform>,

    /// Tie-break priority, higher preferred.
    ///
    /// Extracted edges are held to 0..=100 when they are read. Edges
    /// synthesized by relationship discovery keep their computed value, which
    /// may be negative, and are stored as is.
    pub priority: i32,

    /// Human-readable description
    pub description: String,
}

impl Edge {
    /// Create an edge without a transform
    pub fn new(
        id: impl Into<String>,
        to: impl Into<String>,
        when: EdgeCondition,
        priority: i32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            to: to.into(),
            when,
            transform: None,
            priority,
            description: description.into(),
        }
    }

    /// Attach a transform
    pub fn with_transform(mut self, transform: EdgeTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Follow the edge, producing the destination and reshaped payload
    pub fn traverse(&self, payload: &Payload) -> Traversal {
        let payload = match &self.transform {
            Some(transform) => transform.apply(payload),
            None => payload.clone(),
        };
        Traversal {
            edge_id: self.id.clone(),
            to: self.to.clone(),
            priority: self.priority,
            payload,
        }
    }
}

/// Outcome of following one edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Traversal {
    /// Edge that was followed
    pub edge_id: String,

    /// Destination hex
    pub to: String,

    /// Priority of the edge
    pub priority: i32,

    /// Payload as it arrives at the destination
    pub payload: Payload,
}
