//! Structural validation of hexes before they leave the pipeline

use crate::hex::{Hex, MAX_HEX_ID_LEN, MAX_HEX_NAME_LEN};
use std::collections::HashSet;
use thiserror::Error;

/// Lowest priority an extracted edge may carry
pub const MIN_EDGE_PRIORITY: i32 = 0;

/// Highest priority an extracted edge may carry
pub const MAX_EDGE_PRIORITY: i32 = 100;

/// A single schema rule a hex breaks
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    /// Identifier is empty
    #[error("id is empty")]
    EmptyId,

    /// Identifier has characters outside `[a-z0-9-]`
    #[error("id '{0}' must be lowercase alphanumeric with hyphens")]
    InvalidIdFormat(String),

    /// Identifier exceeds the length cap
    #[error("id is {len} chars (max: {max})")]
    IdTooLong {
        /// Actual length
        len: usize,
        /// Allowed maximum
        max: usize,
    },

    /// Name is empty or too long
    #[error("name must be 1-{max} chars, got {len}")]
    InvalidNameLength {
        /// Actual length
        len: usize,
        /// Allowed maximum
        max: usize,
    },

    /// No entry hints
    #[error("at least one entry hint is required")]
    MissingEntryHints,

    /// Edge with an empty required field
    #[error("edge #{index} has an empty '{field}'")]
    EmptyEdgeField {
        /// Position of the edge
        index: usize,
        /// Field name
        field: &'static str,
    },

    /// Edge priority outside the allowed range
    #[error("edge '{edge_id}' priority {priority} is outside 0..=100")]
    PriorityOutOfRange {
        /// Offending edge
        edge_id: String,
        /// Its priority
        priority: i32,
    },

    /// Edge priority is not a whole number
    #[error("edge '{edge_id}' priority {priority} is not an integer")]
    NonIntegralPriority {
        /// Offending edge
        edge_id: String,
        /// Its raw priority
        priority: String,
    },

    /// Two edges of the same hex share an identifier
    #[error("edge id '{0}' is not unique within the hex")]
    DuplicateEdgeId(String),
}

/// A hex that failed validation, with every rule it breaks
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Hex \"{hex_id}\" failed validation: {}", describe(.violations))]
pub struct SchemaError {
    /// Identifier of the offending hex
    pub hex_id: String,

    /// Rules broken
    pub violations: Vec<SchemaViolation>,
}

fn describe(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Whether `id` is a well-formed hex identifier
pub fn is_valid_hex_id(id: &str) -> bool {
    id_violations(id).is_empty()
}

fn id_violations(id: &str) -> Vec<SchemaViolation> {
    let mut violations = Vec::new();
    if id.is_empty() {
        violations.push(SchemaViolation::EmptyId);
        return violations;
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        violations.push(SchemaViolation::InvalidIdFormat(id.to_string()));
    }
    let len = id.chars().count();
    if len > MAX_HEX_ID_LEN {
        violations.push(SchemaViolation::IdTooLong {
            len,
            max: MAX_HEX_ID_LEN,
        });
    }
    violations
}

/// Check the priority of an edge read from an extraction response.
///
/// Only extracted edges are held to the range. Stored hexes may carry
/// discovered edges whose priority falls below it.
pub fn check_extracted_priority(edge_id: &str, priority: i32) -> Result<(), SchemaViolation> {
    if (MIN_EDGE_PRIORITY..=MAX_EDGE_PRIORITY).contains(&priority) {
        Ok(())
    } else {
        Err(SchemaViolation::PriorityOutOfRange {
            edge_id: edge_id.to_string(),
            priority,
        })
    }
}

impl Hex {
    /// Check the hex against the full node schema
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut violations = id_violations(&self.id);

        let name_len = self.name.chars().count();
        if name_len == 0 || name_len > MAX_HEX_NAME_LEN {
            violations.push(SchemaViolation::InvalidNameLength {
                len: name_len,
                max: MAX_HEX_NAME_LEN,
            });
        }

        if self.entry_hints.is_empty() {
            violations.push(SchemaViolation::MissingEntryHints);
        }

        let mut seen = HashSet::new();
        for (index, edge) in self.edges.iter().enumerate() {
            if edge.id.is_empty() {
                violations.push(SchemaViolation::EmptyEdgeField { index, field: "id" });
            } else if !seen.insert(edge.id.as_str()) {
                violations.push(SchemaViolation::DuplicateEdgeId(edge.id.clone()));
            }
            if edge.to.is_empty() {
                violations.push(SchemaViolation::EmptyEdgeField { index, field: "to" });
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaError {
                hex_id: self.id.clone(),
                violations,
            })
        }
    }
}
