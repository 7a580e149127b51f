//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the ingestion core and its
//! collaborators. Implementations live in other crates.

use crate::{Hex, SourceType};

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (hive-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate with structured output (if supported)
    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error>;
}

/// Trait for the collaborator that turns a slice of text into candidate hexes
///
/// Returns the raw response text. The ingestion core parses and validates it,
/// so a misbehaving implementation can only fail the chunk it was given.
pub trait DocumentExtractor {
    /// Error type for extraction calls (transport, model availability, ...)
    type Error;

    /// Extract candidate hexes from `text`
    fn extract(
        &self,
        text: &str,
        source_name: &str,
        source_type: SourceType,
    ) -> Result<String, Self::Error>;
}

/// Trait for reading the existing corpus
///
/// Implemented by the infrastructure layer (hive-store)
pub trait CorpusReader {
    /// Error type for read operations
    type Error;

    /// Every hex currently known
    fn all_hexes(&self) -> Result<Vec<Hex>, Self::Error>;

    /// Get a hex by identifier
    fn get_hex(&self, id: &str) -> Result<Option<Hex>, Self::Error>;

    /// Whether a hex with this identifier exists
    fn hex_exists(&self, id: &str) -> Result<bool, Self::Error> {
        Ok(self.get_hex(id)?.is_some())
    }
}

/// Trait for persisting hexes
///
/// Implemented by the infrastructure layer (hive-store)
pub trait HexWriter {
    /// Error type for write operations
    type Error;

    /// Create or replace a single hex
    fn save_hex(&mut self, hex: Hex) -> Result<(), Self::Error>;

    /// Create or replace many hexes at once
    fn bulk_save_hexes(&mut self, hexes: Vec<Hex>) -> Result<(), Self::Error>;

    /// Delete a hex. Returns false when it did not exist.
    fn delete_hex(&mut self, id: &str) -> Result<bool, Self::Error>;

    /// Remove every hex
    fn clear(&mut self) -> Result<(), Self::Error>;
}
