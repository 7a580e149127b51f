//! Configuration for the ingestion pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the ingestion pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Trimmed input shorter than this is rejected before chunking
    pub min_content_length: usize,

    /// Per-chunk character budget sent to the extractor
    pub max_extraction_chars: usize,

    /// Documents longer than this are split into paragraph groups
    pub max_chunk_size: usize,

    /// Chunks whose trimmed content is this short or shorter are discarded
    pub min_chunk_chars: usize,

    /// Maximum time for a single extraction call (seconds)
    pub extraction_timeout_secs: u64,

    /// Extraction calls allowed in flight at once
    pub max_concurrent_extractions: usize,

    /// Corpus results requested per hex by relationship discovery
    pub related_limit: usize,

    /// Results scoring below this are not linked
    pub min_related_score: f64,

    /// Length cap of the provenance tag added by chunk linking
    pub provenance_tag_max_len: usize,
}

impl IngestConfig {
    /// Get the extraction timeout as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_extraction_chars == 0 {
            return Err("max_extraction_chars must be greater than 0".to_string());
        }
        if self.max_chunk_size == 0 {
            return Err("max_chunk_size must be greater than 0".to_string());
        }
        if self.min_chunk_chars >= self.max_chunk_size {
            return Err("min_chunk_chars must be smaller than max_chunk_size".to_string());
        }
        if self.extraction_timeout_secs == 0 {
            return Err("extraction_timeout_secs must be greater than 0".to_string());
        }
        if self.max_concurrent_extractions == 0 {
            return Err("max_concurrent_extractions must be greater than 0".to_string());
        }
        if !self.min_related_score.is_finite() || self.min_related_score < 0.0 {
            return Err(format!(
                "min_related_score must be a non-negative number, got {}",
                self.min_related_score
            ));
        }
        if self.provenance_tag_max_len == 0 {
            return Err("provenance_tag_max_len must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for IngestConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            min_content_length: 10,
            max_extraction_chars: 50_000,
            max_chunk_size: 8_000,
            min_chunk_chars: 100,
            extraction_timeout_secs: 120,
            max_concurrent_extractions: 4,
            related_limit: 3,
            min_related_score: 2.0,
            provenance_tag_max_len: 20,
        }
    }
}

impl IngestConfig {
    /// Aggressive preset: smaller chunks, shorter timeouts, more parallel calls
    pub fn aggressive() -> Self {
        Self {
            max_extraction_chars: 20_000,
            max_chunk_size: 4_000,
            extraction_timeout_secs: 60,
            max_concurrent_extractions: 8,
            ..Self::default()
        }
    }

    /// Lenient preset: larger chunks and longer timeouts for better quality
    pub fn lenient() -> Self {
        Self {
            max_extraction_chars: 100_000,
            max_chunk_size: 20_000,
            extraction_timeout_secs: 300,
            max_concurrent_extractions: 2,
            min_related_score: 1.0,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
