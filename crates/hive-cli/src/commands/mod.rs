//! Command implementations.
//!
//! Each command returns its rendered output; `main` prints it.

pub mod ingest;
pub mod list;
pub mod query;
pub mod show;
pub mod traverse;

pub use self::ingest::{execute_ingest, ollama_pipeline, read_documents};
pub use self::list::execute_list;
pub use self::query::execute_query;
pub use self::show::execute_show;
pub use self::traverse::execute_traverse;
