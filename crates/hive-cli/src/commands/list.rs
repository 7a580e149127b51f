//! List command implementation.

use crate::error::Result;
use crate::output::Formatter;
use hive_domain::traits::CorpusReader;
use hive_store::StoreError;

/// Execute the list command.
pub fn execute_list<S>(store: &S, formatter: &Formatter) -> Result<String>
where
    S: CorpusReader<Error = StoreError>,
{
    let hexes = store.all_hexes()?;
    formatter.format_hexes(&hexes)
}
