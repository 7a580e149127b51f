//! Query command implementation.

use crate::cli::QueryArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use hive_domain::traits::CorpusReader;
use hive_query::query_hexes;
use hive_store::StoreError;

/// Execute the query command.
pub fn execute_query<S>(args: &QueryArgs, store: &S, formatter: &Formatter) -> Result<String>
where
    S: CorpusReader<Error = StoreError>,
{
    if args.intent.trim().is_empty() {
        return Err(CliError::InvalidInput("Intent must not be empty".to_string()));
    }

    let hexes = store.all_hexes()?;
    let results = query_hexes(&hexes, &args.intent, usize::from(args.limit));
    formatter.format_query_results(&results)
}
