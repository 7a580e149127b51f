//! Request, response and progress types for ingestion

use hive_domain::{Hex, HexKind, SourceType, MAX_HEX_NAME_LEN};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A document handed to the pipeline as plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Full plain text
    pub text: String,

    /// Label of the source (file name, URL, ...)
    pub source_name: String,

    /// What the text was extracted from
    pub source_type: SourceType,
}

impl Document {
    /// Create a document
    pub fn new(
        text: impl Into<String>,
        source_name: impl Into<String>,
        source_type: SourceType,
    ) -> Self {
        Self {
            text: text.into(),
            source_name: source_name.into(),
            source_type,
        }
    }
}

/// A titled, ordered slice of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentChunk {
    /// Heading text, "Section N" or "Main Content"
    pub title: String,

    /// Chunk text
    pub content: String,

    /// Position in the document (0-based)
    pub index: usize,
}

/// Shape of the extractor's JSON response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResponse {
    /// Candidate hexes
    pub hexes: Vec<HexCandidate>,

    /// Short description of what was extracted
    pub summary: String,
}

/// A hex as proposed by the extractor, before identifiers are fixed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HexCandidate {
    /// Proposed identifier, sanitized before use
    pub id: String,

    /// Display name
    pub name: String,

    /// Kind of hex
    #[serde(rename = "type")]
    pub kind: HexKind,

    /// One or two sentence summary
    pub description: String,

    /// Search trigger phrases
    pub entry_hints: Vec<String>,

    /// Categorization labels
    pub tags: Vec<String>,

    /// Extracted information
    pub contents: ContentsCandidate,

    /// Links to other hexes
    pub edges: Vec<EdgeCandidate>,
}

/// Contents of a candidate hex
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentsCandidate {
    /// Opaque payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// An edge as proposed by the extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeCandidate {
    /// Proposed edge identifier
    pub id: String,

    /// Proposed destination identifier
    pub to: String,

    /// Traversal condition
    pub when: ConditionCandidate,

    /// Priority as returned; must turn out integral
    pub priority: f64,

    /// Human-readable description
    pub description: String,
}

/// Condition of a candidate edge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionCandidate {
    /// Intent substring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,

    /// Unconditional flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub always: Option<bool>,
}

impl HexCandidate {
    /// Check the fields the response shape constrains beyond their types
    pub fn validate(&self) -> Result<(), String> {
        let name_len = self.name.chars().count();
        if name_len == 0 || name_len > MAX_HEX_NAME_LEN {
            return Err(format!(
                "hex '{}': name must be 1-{} chars, got {}",
                self.id, MAX_HEX_NAME_LEN, name_len
            ));
        }
        if self.entry_hints.is_empty() {
            return Err(format!("hex '{}': entryHints must not be empty", self.id));
        }
        Ok(())
    }
}

/// Hexes produced from one chunk
#[derive(Debug, Clone)]
pub struct ChunkExtraction {
    /// Assembled and validated hexes, in response order
    pub hexes: Vec<Hex>,

    /// Extractor's summary for the chunk
    pub summary: String,
}

/// A chunk whose extraction failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkFailure {
    /// Chunk position
    pub index: usize,

    /// Chunk title
    pub title: String,

    /// Why it failed
    pub reason: String,
}

impl fmt::Display for ChunkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chunk {} \"{}\": {}", self.index, self.title, self.reason)
    }
}

/// Result of ingesting one document
#[derive(Debug, Clone)]
pub struct IngestResult {
    /// Source the hexes came from
    pub source_name: String,

    /// New hexes in chunk order, ready to persist
    pub hexes: Vec<Hex>,

    /// Human-readable summary, naming failed chunks
    pub summary: String,

    /// Number of chunks the document was split into
    pub chunk_count: usize,

    /// Chunks that contributed nothing
    pub failures: Vec<ChunkFailure>,
}

/// Result of ingesting several documents
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Every new hex, document by document
    pub hexes: Vec<Hex>,

    /// "Processed N documents: ..." summary
    pub summary: String,

    /// Per-document results
    pub documents: Vec<IngestResult>,
}

/// Progress notification emitted while ingesting
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum IngestEvent {
    /// A chunk was handed to the extractor
    #[serde(rename_all = "camelCase")]
    ChunkStarted {
        /// Source label
        source_name: String,
        /// Chunk position
        index: usize,
        /// Total chunks in the document
        total: usize,
        /// Chunk title
        title: String,
    },

    /// A chunk produced hexes
    #[serde(rename_all = "camelCase")]
    ChunkCompleted {
        /// Source label
        source_name: String,
        /// Chunk position
        index: usize,
        /// Hexes produced
        hexes: usize,
    },

    /// A chunk failed
    #[serde(rename_all = "camelCase")]
    ChunkFailed {
        /// Source label
        source_name: String,
        /// What failed
        failure: ChunkFailure,
    },

    /// A document finished
    #[serde(rename_all = "camelCase")]
    DocumentCompleted {
        /// Source label
        source_name: String,
        /// Hexes produced
        hexes: usize,
        /// Document summary
        summary: String,
    },

    /// A document was rejected before chunking
    #[serde(rename_all = "camelCase")]
    DocumentSkipped {
        /// Source label
        source_name: String,
        /// Why
        reason: String,
    },
}
