//! Per-chunk extraction: call the extractor, then turn its answer into hexes

use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::ids::{allocate_unique, sanitize, IdAllocator};
use crate::parser::parse_extraction_response;
use crate::types::{ChunkExtraction, EdgeCandidate, ExtractionResponse, HexCandidate};
use hive_domain::traits::DocumentExtractor;
use hive_domain::{
    check_extracted_priority, ContentData, Edge, EdgeCondition, Hex, HexContents, SchemaError,
    SchemaViolation, SourceType,
};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OwnedSemaphorePermit;
use tokio::time::timeout;
use tracing::debug;

/// Appended to text cut at the extraction budget
pub const TRUNCATION_MARKER: &str = "\n\n[Document truncated...]";

/// Cut `text` to `max_chars` characters, marking the cut
pub fn truncate_for_extraction(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => Cow::Owned(format!("{}{}", &text[..idx], TRUNCATION_MARKER)),
        None => Cow::Borrowed(text),
    }
}

/// Drives the extractor for single chunks.
///
/// Clones share the extractor and the identifier allocator.
pub struct Orchestrator<E> {
    extractor: Arc<E>,
    allocator: IdAllocator,
    max_extraction_chars: usize,
    extraction_timeout: Duration,
}

impl<E> Clone for Orchestrator<E> {
    fn clone(&self) -> Self {
        Self {
            extractor: Arc::clone(&self.extractor),
            allocator: self.allocator.clone(),
            max_extraction_chars: self.max_extraction_chars,
            extraction_timeout: self.extraction_timeout,
        }
    }
}

impl<E> Orchestrator<E>
where
    E: DocumentExtractor + Send + Sync + 'static,
    E::Error: Display,
{
    /// Create an orchestrator allocating identifiers from `allocator`
    pub fn new(extractor: Arc<E>, allocator: IdAllocator, config: &IngestConfig) -> Self {
        Self {
            extractor,
            allocator,
            max_extraction_chars: config.max_extraction_chars,
            extraction_timeout: config.extraction_timeout(),
        }
    }

    /// The allocator identifiers are reserved in
    pub fn allocator(&self) -> &IdAllocator {
        &self.allocator
    }

    /// Extract, parse and assemble the hexes of one chunk.
    ///
    /// Transport errors, timeouts and malformed responses fail only this
    /// chunk. A hex failing the final schema check is a fatal
    /// [`IngestError::Schema`].
    pub async fn extract_chunk(
        &self,
        text: &str,
        source_name: &str,
        source_type: SourceType,
    ) -> Result<ChunkExtraction, IngestError> {
        self.run(text, source_name, source_type, None).await
    }

    /// Like [`Orchestrator::extract_chunk`], holding a worker-pool permit.
    ///
    /// The permit is released when the extractor call returns, not when the
    /// timeout fires.
    pub async fn extract_chunk_with_permit(
        &self,
        text: &str,
        source_name: &str,
        source_type: SourceType,
        permit: OwnedSemaphorePermit,
    ) -> Result<ChunkExtraction, IngestError> {
        self.run(text, source_name, source_type, Some(permit)).await
    }

    async fn run(
        &self,
        text: &str,
        source_name: &str,
        source_type: SourceType,
        permit: Option<OwnedSemaphorePermit>,
    ) -> Result<ChunkExtraction, IngestError> {
        let text = truncate_for_extraction(text, self.max_extraction_chars).into_owned();
        let raw = self
            .call_extractor(text, source_name, source_type, permit)
            .await?;
        let response = parse_extraction_response(&raw)?;
        self.assemble(response)
    }

    /// Call the extractor on the blocking pool, bounded by the timeout
    async fn call_extractor(
        &self,
        text: String,
        source_name: &str,
        source_type: SourceType,
        permit: Option<OwnedSemaphorePermit>,
    ) -> Result<String, IngestError> {
        let extractor = Arc::clone(&self.extractor);
        let source_name = source_name.to_string();

        // DocumentExtractor is synchronous and cannot be cancelled
        let call = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            extractor
                .extract(&text, &source_name, source_type)
                .map_err(|e| IngestError::Extractor(e.to_string()))
        });

        timeout(self.extraction_timeout, call)
            .await
            .map_err(|_| IngestError::Timeout(self.extraction_timeout.as_secs()))?
            .map_err(|e| IngestError::Extractor(format!("Task join error: {}", e)))?
    }

    /// Turn a parsed response into schema-valid hexes with reserved ids
    pub fn assemble(&self, response: ExtractionResponse) -> Result<ChunkExtraction, IngestError> {
        // Reserve every hex id first so edges between siblings can follow renames
        let mut renamed: HashMap<String, String> = HashMap::new();
        let mut ids = Vec::with_capacity(response.hexes.len());
        for candidate in &response.hexes {
            let sanitized = sanitize(&candidate.id);
            let id = self.allocator.reserve(&sanitized);
            renamed.entry(sanitized).or_insert_with(|| id.clone());
            ids.push(id);
        }

        let hexes = response
            .hexes
            .into_iter()
            .zip(ids)
            .map(|(candidate, id)| build_hex(candidate, id, &renamed))
            .collect::<Result<Vec<_>, _>>()?;

        for hex in &hexes {
            hex.validate()?;
        }

        debug!("Assembled {} hexes", hexes.len());
        Ok(ChunkExtraction {
            hexes,
            summary: response.summary,
        })
    }
}

fn build_hex(
    candidate: HexCandidate,
    id: String,
    renamed: &HashMap<String, String>,
) -> Result<Hex, SchemaError> {
    let mut edge_ids = HashSet::new();
    let edges = candidate
        .edges
        .into_iter()
        .map(|edge| build_edge(edge, &id, &mut edge_ids, renamed))
        .collect::<Result<Vec<_>, _>>()?;

    let mut hex = Hex::new(id, candidate.name, candidate.kind, candidate.entry_hints);
    hex.tags = candidate.tags;
    hex.edges = edges;
    if !candidate.description.trim().is_empty() {
        hex.description = Some(candidate.description);
    }
    if let Some(data) = candidate.contents.data {
        hex.contents = HexContents::with_data(ContentData::new(data));
    }
    Ok(hex)
}

fn build_edge(
    edge: EdgeCandidate,
    hex_id: &str,
    edge_ids: &mut HashSet<String>,
    renamed: &HashMap<String, String>,
) -> Result<Edge, SchemaError> {
    let id = allocate_unique(&sanitize(&edge.id), edge_ids);

    if !edge.priority.is_finite() || edge.priority.fract() != 0.0 {
        return Err(SchemaError {
            hex_id: hex_id.to_string(),
            violations: vec![SchemaViolation::NonIntegralPriority {
                edge_id: id,
                priority: edge.priority.to_string(),
            }],
        });
    }

    let to = sanitize(&edge.to);
    let to = renamed.get(&to).cloned().unwrap_or(to);

    let when = EdgeCondition {
        intent: edge.when.intent,
        always: edge.when.always.unwrap_or(false),
        ..EdgeCondition::default()
    };

    // Out-of-range values saturate before the range check
    let priority = edge.priority as i32;
    check_extracted_priority(&id, priority).map_err(|violation| SchemaError {
        hex_id: hex_id.to_string(),
        violations: vec![violation],
    })?;

    Ok(Edge::new(id, to, when, priority, edge.description))
}
