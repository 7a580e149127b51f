//! Error types for the ingestion pipeline

use crate::types::ChunkFailure;
use hive_domain::SchemaError;
use thiserror::Error;

/// Errors that can occur during ingestion
#[derive(Error, Debug)]
pub enum IngestError {
    /// Extractor collaborator failed (transport, model, ...)
    #[error("Extractor error: {0}")]
    Extractor(String),

    /// Extraction did not finish in time
    #[error("Extraction timed out after {0}s")]
    Timeout(u64),

    /// Response could not be parsed as JSON
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Response parsed but does not have the expected shape
    #[error("Invalid extraction response: {0}")]
    InvalidResponse(String),

    /// A produced hex failed the final schema check
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Input text is too short to ingest
    #[error("Insufficient content in '{source_name}': {len} chars after trimming (min: {min})")]
    InsufficientContent {
        /// Source label of the rejected document
        source_name: String,
        /// Trimmed length of the input
        len: usize,
        /// Configured minimum
        min: usize,
    },

    /// No chunk of the document could be extracted
    #[error("All {} chunks failed: {}", .0.len(), describe(.0))]
    AllChunksFailed(Vec<ChunkFailure>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl IngestError {
    /// Whether the error ends the whole run rather than a single chunk
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            IngestError::Schema(_)
                | IngestError::InsufficientContent { .. }
                | IngestError::AllChunksFailed(_)
                | IngestError::Config(_)
        )
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(e: serde_json::Error) -> Self {
        IngestError::JsonParse(e.to_string())
    }
}

fn describe(failures: &[ChunkFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
