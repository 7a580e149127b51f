//! Hive Domain Layer
//!
//! This crate contains the data model shared by every other Hive crate:
//! hexes, their conditional edges, schema validation and the trait
//! interfaces for the external collaborators (language model, extractor,
//! corpus reader, persistence writer).
//!
//! ## Key Concepts
//!
//! - **Hex**: a typed knowledge node with entry hints, tags and outbound edges
//! - **Edge**: a conditional, payload-transforming link between two hexes
//! - **Corpus**: every hex known to the system, existing plus newly created
//! - **Source type**: the kind of document a hex was extracted from
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - Pure data and rules only, no I/O
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod edge;
pub mod hex;
pub mod source;
pub mod traits;
pub mod validation;

// Re-exports for convenience
pub use edge::{Edge, EdgeCondition, EdgeTransform, Payload, Traversal};
pub use hex::{
    ContentData, Hex, HexContents, HexKind, ParameterDef, ParameterType, ToolDefinition,
    MAX_HEX_ID_LEN, MAX_HEX_NAME_LEN,
};
pub use source::SourceType;
pub use validation::{check_extracted_priority, is_valid_hex_id, SchemaError, SchemaViolation};
