//! Ingest command implementation.

use crate::cli::IngestArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use hive_domain::traits::{CorpusReader, DocumentExtractor, HexWriter};
use hive_domain::SourceType;
use hive_ingest::{Document, IngestError, IngestEvent, LlmExtractor, Pipeline};
use hive_llm::OllamaProvider;
use hive_store::StoreError;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Source name used for text given on the command line
pub const PASTED_TEXT_NAME: &str = "Pasted Text";

/// Build the Ollama-backed pipeline described by `config`.
pub fn ollama_pipeline(
    config: &Config,
    model: Option<&str>,
) -> Result<Pipeline<LlmExtractor<OllamaProvider>>> {
    let model = model.unwrap_or(&config.llm.model);
    let provider = OllamaProvider::new(&config.llm.endpoint, model)
        .with_max_retries(config.llm.max_retries)
        .with_timeout(config.ingest.extraction_timeout());
    info!("Extracting with {} at {}", model, config.llm.endpoint);

    let pipeline = Pipeline::new(LlmExtractor::new(provider), config.ingest.clone())?
        .with_progress(spawn_progress_logger());
    Ok(pipeline)
}

/// Log progress events as they arrive
fn spawn_progress_logger() -> mpsc::UnboundedSender<IngestEvent> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                IngestEvent::ChunkStarted { index, total, title, .. } => {
                    info!("Extracting chunk {}/{}: {}", index + 1, total, title);
                }
                IngestEvent::ChunkCompleted { index, hexes, .. } => {
                    debug!("Chunk {} produced {} hex(es)", index + 1, hexes);
                }
                other => debug!("{:?}", other),
            }
        }
    });
    tx
}

/// Turn the command arguments into documents.
///
/// Files must be Markdown or plain text; other formats need an external
/// text extractor first.
pub fn read_documents(args: &IngestArgs) -> Result<Vec<Document>> {
    let override_type: Option<SourceType> = args.source_type.map(Into::into);

    if let Some(text) = &args.text {
        let name = args.name.as_deref().unwrap_or(PASTED_TEXT_NAME);
        let source_type = override_type.unwrap_or(SourceType::Text);
        return Ok(vec![Document::new(text.clone(), name, source_type)]);
    }

    if args.files.is_empty() {
        return Err(CliError::InvalidInput(
            "Must specify either --file or --text".to_string(),
        ));
    }
    if args.name.is_some() && args.files.len() > 1 {
        return Err(CliError::InvalidInput(
            "--name can only be used with a single file".to_string(),
        ));
    }

    args.files
        .iter()
        .map(|path| {
            let inferred = text_source_type(path)?;
            let text = fs::read_to_string(path)?;
            let name = match &args.name {
                Some(name) => name.clone(),
                None => file_name(path),
            };
            Ok(Document::new(text, name, override_type.unwrap_or(inferred)))
        })
        .collect()
}

fn text_source_type(path: &Path) -> Result<SourceType> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    match SourceType::from_extension(extension) {
        Some(source_type @ (SourceType::Markdown | SourceType::Text)) => Ok(source_type),
        _ => Err(CliError::InvalidInput(format!(
            "Unsupported file type '{}': only .md and .txt files can be ingested",
            path.display()
        ))),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Execute the ingest command.
pub async fn execute_ingest<E, S>(
    args: &IngestArgs,
    pipeline: &Pipeline<E>,
    store: &mut S,
    formatter: &Formatter,
) -> Result<String>
where
    E: DocumentExtractor + Send + Sync + 'static,
    E::Error: Display,
    S: CorpusReader<Error = StoreError> + HexWriter<Error = StoreError>,
{
    let documents = read_documents(args)?;
    let corpus = store.all_hexes()?;

    let result = match pipeline.ingest_batch(&documents, &corpus).await {
        Ok(result) => result,
        Err(e @ IngestError::InsufficientContent { .. }) => {
            return Err(CliError::InvalidInput(e.to_string()))
        }
        Err(e) => return Err(e.into()),
    };

    let saved = !args.dry_run;
    if saved {
        match result.hexes.as_slice() {
            [] => {}
            [hex] => store.save_hex(hex.clone())?,
            hexes => store.bulk_save_hexes(hexes.to_vec())?,
        }
    }

    formatter.format_ingest(&result, saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> IngestArgs {
        IngestArgs {
            files: Vec::new(),
            text: None,
            name: None,
            source_type: None,
            model: None,
            dry_run: false,
        }
    }

    #[test]
    fn test_text_defaults() {
        let mut args = args();
        args.text = Some("some pasted words".to_string());

        let docs = read_documents(&args).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].source_name, PASTED_TEXT_NAME);
        assert_eq!(docs[0].source_type, SourceType::Text);
    }

    #[test]
    fn test_source_type_from_extension() {
        assert_eq!(
            text_source_type(Path::new("notes.MD")).unwrap(),
            SourceType::Markdown
        );
        assert_eq!(
            text_source_type(Path::new("notes.txt")).unwrap(),
            SourceType::Text
        );
        assert!(text_source_type(Path::new("paper.pdf")).is_err());
        assert!(text_source_type(Path::new("README")).is_err());
    }

    #[test]
    fn test_name_needs_single_file() {
        let mut args = args();
        args.files = vec![PathBuf::from("a.md"), PathBuf::from("b.md")];
        args.name = Some("Both".to_string());
        assert!(matches!(read_documents(&args), Err(CliError::InvalidInput(_))));
    }
}
