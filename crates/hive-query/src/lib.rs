//! Hive Query
//!
//! Intent-based ranking of hexes.
//!
//! # Overview
//!
//! An intent ("how do I style a button?") is tokenized and expanded through a
//! fixed concept table, then compared against every hex. Entry hints carry
//! the most weight, followed by the name, the description and finally tags.
//!
//! ```text
//! intent → tokenize → expand → overlap per hex → score → top N
//! ```
//!
//! # Example Usage
//!
//! ```
//! use hive_domain::{Hex, HexKind};
//! use hive_query::query_hexes;
//!
//! let hexes = vec![Hex::new(
//!     "interactive-rules",
//!     "Interactive Elements",
//!     HexKind::Data,
//!     vec!["interactive element design rules".to_string()],
//! )];
//!
//! let results = query_hexes(&hexes, "button styling", 5);
//! assert_eq!(results.len(), 1);
//! assert!(results[0].score > 0.0);
//! ```

#![warn(missing_docs)]

mod concepts;
mod scoring;
mod tokenizer;

pub use concepts::CONCEPT_MAP;
pub use scoring::{
    query_hexes, score_hex, QueryResult, DESCRIPTION_WEIGHT, HINT_WEIGHT, NAME_WEIGHT, TAG_BONUS,
};
pub use tokenizer::{expand, expand_text, overlap, tokenize, ConceptSet};
