//! Show command implementation.

use crate::cli::ShowArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use hive_domain::traits::CorpusReader;
use hive_store::StoreError;

/// Execute the show command.
pub fn execute_show<S>(args: &ShowArgs, store: &S, formatter: &Formatter) -> Result<String>
where
    S: CorpusReader<Error = StoreError>,
{
    let hex = store
        .get_hex(&args.id)?
        .ok_or_else(|| CliError::NotFound(args.id.clone()))?;
    formatter.format_hex(&hex)
}
