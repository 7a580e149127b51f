//! Hive Ingest
//!
//! Turns plain-text documents into typed, cross-linked hexes.
//!
//! # Overview
//!
//! A document is split into titled chunks. Every chunk goes to the external
//! extractor (usually a language model) concurrently, bounded by a worker
//! limit. Candidate hexes get sanitized identifiers that are unique across the
//! whole corpus, are checked against the node schema, chained with
//! previous/next section edges and finally linked to related hexes already in
//! the corpus.
//!
//! # Architecture
//!
//! ```text
//! Text → Chunker → [Chunk]* → Orchestrator (Extractor, IdAllocator)
//!      → Chunk Linker → Relationship Discovery → Vec<Hex> (caller persists)
//! ```
//!
//! # Failure model
//!
//! - A transport error, timeout or malformed response fails only its chunk;
//!   failed chunks are listed in the result summary
//! - A hex that fails the final schema check fails the whole run
//! - Input below the minimum length is rejected before chunking
//!
//! # Example Usage
//!
//! ```no_run
//! use hive_domain::SourceType;
//! use hive_ingest::{Document, IngestConfig, LlmExtractor, Pipeline};
//! use hive_llm::OllamaProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = LlmExtractor::new(OllamaProvider::default_endpoint("llama3.1"));
//! let pipeline = Pipeline::new(extractor, IngestConfig::default())?;
//!
//! let document = Document::new("# Intro\n...", "guide.md", SourceType::Markdown);
//! let existing = Vec::new();
//! let result = pipeline.ingest(&document, &existing).await?;
//!
//! println!("Created {} hexes: {}", result.hexes.len(), result.summary);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod discovery;
mod error;
mod extractor;
mod ids;
mod linker;
mod orchestrator;
mod parser;
mod pipeline;
mod prompt;
mod types;

pub use chunking::{chunk, Chunker, DEFAULT_MIN_CHUNK_CHARS};
pub use config::IngestConfig;
pub use discovery::{discover, discovery_intent, RELATED_BASE_PRIORITY, RELATED_RANK_STEP};
pub use error::IngestError;
pub use extractor::LlmExtractor;
pub use ids::{allocate_unique, sanitize, unique_edge_id, IdAllocator, FALLBACK_PREFIX};
pub use linker::{
    link_chunks, provenance_tag, NEXT_SECTION_INTENT, PREVIOUS_SECTION_INTENT,
    SECTION_EDGE_PRIORITY,
};
pub use orchestrator::{truncate_for_extraction, Orchestrator, TRUNCATION_MARKER};
pub use parser::parse_extraction_response;
pub use pipeline::Pipeline;
pub use prompt::PromptBuilder;
pub use types::{
    BatchResult, ChunkExtraction, ChunkFailure, ConditionCandidate, ContentsCandidate, Document,
    DocumentChunk, EdgeCandidate, ExtractionResponse, HexCandidate, IngestEvent, IngestResult,
};
