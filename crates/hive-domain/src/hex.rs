//! Hex module - the typed knowledge node of the graph

use crate::edge::{Edge, Payload, Traversal};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Maximum length of a hex identifier
pub const MAX_HEX_ID_LEN: usize = 50;

/// Maximum length of a hex display name
pub const MAX_HEX_NAME_LEN: usize = 100;

/// The four kinds of hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HexKind {
    /// Information to be read
    Data,

    /// Something actionable
    Tool,

    /// An entry point into a region of the graph
    Gateway,

    /// A decision point between several paths
    Junction,
}

impl HexKind {
    /// Get the kind as its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            HexKind::Data => "data",
            HexKind::Tool => "tool",
            HexKind::Gateway => "gateway",
            HexKind::Junction => "junction",
        }
    }
}

impl fmt::Display for HexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HexKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "data" => Ok(HexKind::Data),
            "tool" => Ok(HexKind::Tool),
            "gateway" => Ok(HexKind::Gateway),
            "junction" => Ok(HexKind::Junction),
            other => Err(format!(
                "Invalid hex type '{}'. Must be one of: data, tool, gateway, junction",
                other
            )),
        }
    }
}

/// Opaque content payload carried by a hex.
///
/// The pipeline never looks inside; it is stored and returned as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentData(Value);

impl ContentData {
    /// Wrap an arbitrary JSON value
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Plain-text content
    pub fn text(text: impl Into<String>) -> Self {
        Self(Value::String(text.into()))
    }

    /// Borrow the underlying value
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// The content as text, if it is a plain string
    pub fn as_text(&self) -> Option<&str> {
        self.0.as_str()
    }

    /// Unwrap into the underlying value
    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Declared type of a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum ParameterType {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

/// A single tool parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDef {
    /// Parameter type
    #[serde(rename = "type")]
    pub param_type: ParameterType,

    /// What the parameter means
    pub description: String,

    /// Whether callers must supply it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Value used when the caller omits it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// A tool a hex exposes to agents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name
    pub name: String,

    /// What the tool does
    pub description: String,

    /// Parameters keyed by name
    #[serde(default)]
    pub parameters: BTreeMap<String, ParameterDef>,

    /// Handler reference resolved by the host
    pub handler: String,
}

/// Contents of a hex
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HexContents {
    /// Opaque payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ContentData>,

    /// References to external material
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub refs: Vec<String>,

    /// Tool definitions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
}

impl HexContents {
    /// Contents holding only a data payload
    pub fn with_data(data: ContentData) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }
}

/// A hex - one node of the knowledge graph
///
/// Identifiers are lowercase alphanumeric with hyphens and unique across the
/// whole corpus. Entry hints are the curated search triggers that dominate
/// ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hex {
    /// Corpus-wide unique identifier
    pub id: String,

    /// Display name (1-100 chars)
    pub name: String,

    /// Kind of hex
    #[serde(rename = "type")]
    pub kind: HexKind,

    /// Contents payload
    #[serde(default)]
    pub contents: HexContents,

    /// Search trigger phrases (at least one)
    pub entry_hints: Vec<String>,

    /// Outbound edges in declaration order
    #[serde(default)]
    pub edges: Vec<Edge>,

    /// Grouping and provenance labels
    #[serde(default)]
    pub tags: Vec<String>,

    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Creation time (seconds since Unix epoch)
    #[serde(default)]
    pub created: u64,

    /// Last update time (seconds since Unix epoch)
    #[serde(default)]
    pub updated: u64,
}

impl Hex {
    /// Create a hex with no contents, edges, tags or description
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: HexKind,
        entry_hints: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            contents: HexContents::default(),
            entry_hints,
            edges: Vec::new(),
            tags: Vec::new(),
            description: None,
            created: 0,
            updated: 0,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add tags, skipping ones already present
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tag in tags {
            self.add_tag(tag);
        }
        self
    }

    /// Append an edge
    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    /// Set the contents
    pub fn with_contents(mut self, contents: HexContents) -> Self {
        self.contents = contents;
        self
    }

    /// Whether the hex carries the given tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Add a tag unless already present. Returns true when it was added.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.has_tag(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Whether any outbound edge already points at `destination`
    pub fn has_edge_to(&self, destination: &str) -> bool {
        self.edges.iter().any(|e| e.to == destination)
    }

    /// Whether an outbound edge with this identifier exists
    pub fn has_edge_id(&self, edge_id: &str) -> bool {
        self.edges.iter().any(|e| e.id == edge_id)
    }

    /// Stamp creation and update time
    pub fn stamp(&mut self, now: u64) {
        if self.created == 0 {
            self.created = now;
        }
        self.updated = now;
    }

    /// Edges whose condition holds for this intent and payload, highest
    /// priority first. Equal priorities keep declaration order.
    pub fn matching_edges(&self, intent: &str, payload: &Payload) -> Vec<&Edge> {
        let mut matching: Vec<&Edge> = self
            .edges
            .iter()
            .filter(|edge| edge.when.matches(intent, payload))
            .collect();
        matching.sort_by(|a, b| b.priority.cmp(&a.priority));
        matching
    }

    /// Follow every matching edge, reshaping the payload for each destination
    pub fn traverse(&self, intent: &str, payload: &Payload) -> Vec<Traversal> {
        self.matching_edges(intent, payload)
            .into_iter()
            .map(|edge| edge.traverse(payload))
            .collect()
    }
}
