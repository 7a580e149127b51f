//! Hive Storage Layer
//!
//! Implements the `CorpusReader` and `HexWriter` traits.
//!
//! # Architecture
//!
//! - `SqliteStore`: one `hexes` table keyed by id, each hex stored as JSON
//! - `MemoryStore`: an ordered map, used by tests and dry runs
//!
//! Both stores validate a hex against the node schema before writing it and
//! list hexes ordered by id.
//!
//! # Examples
//!
//! ```no_run
//! use hive_domain::traits::CorpusReader;
//! use hive_store::SqliteStore;
//!
//! let store = SqliteStore::new("hive.db").unwrap();
//! let hexes = store.all_hexes().unwrap();
//! println!("{} hexes in the corpus", hexes.len());
//! ```

#![warn(missing_docs)]

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use hive_domain::SchemaError;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored hex body could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Hex rejected by the node schema
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
