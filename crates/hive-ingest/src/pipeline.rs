//! Document-to-graph pipeline driver

use crate::chunking::Chunker;
use crate::config::IngestConfig;
use crate::discovery::discover;
use crate::error::IngestError;
use crate::ids::IdAllocator;
use crate::linker::link_chunks;
use crate::orchestrator::Orchestrator;
use crate::types::{
    BatchResult, ChunkExtraction, ChunkFailure, Document, DocumentChunk, IngestEvent,
    IngestResult,
};
use hive_domain::traits::DocumentExtractor;
use hive_domain::Hex;
use std::fmt::Display;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

type ChunkTask = JoinHandle<Result<ChunkExtraction, IngestError>>;

/// Turns documents into linked hexes.
///
/// The pipeline only reads the corpus it is given and never persists
/// anything; callers store [`IngestResult::hexes`] themselves.
pub struct Pipeline<E> {
    extractor: Arc<E>,
    config: IngestConfig,
    events: Option<UnboundedSender<IngestEvent>>,
}

impl<E> Pipeline<E>
where
    E: DocumentExtractor + Send + Sync + 'static,
    E::Error: Display,
{
    /// Create a new pipeline
    pub fn new(extractor: E, config: IngestConfig) -> Result<Self, IngestError> {
        config.validate().map_err(IngestError::Config)?;
        Ok(Self {
            extractor: Arc::new(extractor),
            config,
            events: None,
        })
    }

    /// Send progress events to `sender`
    pub fn with_progress(mut self, sender: UnboundedSender<IngestEvent>) -> Self {
        self.events = Some(sender);
        self
    }

    /// The active configuration
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Ingest one document against the existing `corpus`
    pub async fn ingest(
        &self,
        document: &Document,
        corpus: &[Hex],
    ) -> Result<IngestResult, IngestError> {
        let source_name = document.source_name.as_str();
        self.check_content(document)?;

        let chunks = Chunker::from_config(&self.config).chunk(&document.text);
        info!(
            "Ingesting '{}' ({} chars) as {} chunk(s)",
            source_name,
            document.text.len(),
            chunks.len()
        );

        let allocator = IdAllocator::seeded(corpus.iter().map(|hex| hex.id.clone()));
        let orchestrator = Orchestrator::new(Arc::clone(&self.extractor), allocator, &self.config);

        let tasks = self.spawn_extractions(&orchestrator, document, &chunks);
        let outcomes = collect_in_order(tasks).await?;

        let mut per_chunk: Vec<Vec<Hex>> = Vec::with_capacity(chunks.len());
        let mut summaries = Vec::new();
        let mut failures = Vec::new();
        for (chunk, outcome) in chunks.iter().zip(outcomes) {
            match outcome {
                Ok(extraction) => {
                    debug!("Chunk {} produced {} hexes", chunk.index, extraction.hexes.len());
                    self.emit(IngestEvent::ChunkCompleted {
                        source_name: source_name.to_string(),
                        index: chunk.index,
                        hexes: extraction.hexes.len(),
                    });
                    summaries.push(extraction.summary);
                    per_chunk.push(extraction.hexes);
                }
                Err(e) => {
                    warn!("Chunk {} ('{}') of '{}' failed: {}", chunk.index, chunk.title, source_name, e);
                    let failure = ChunkFailure {
                        index: chunk.index,
                        title: chunk.title.clone(),
                        reason: e.to_string(),
                    };
                    self.emit(IngestEvent::ChunkFailed {
                        source_name: source_name.to_string(),
                        failure: failure.clone(),
                    });
                    failures.push(failure);
                }
            }
        }

        if per_chunk.is_empty() {
            return Err(IngestError::AllChunksFailed(failures));
        }

        let mut hexes: Vec<Hex> = per_chunk.into_iter().flatten().collect();

        if chunks.len() > 1 && hexes.len() > 1 {
            info!("Linking {} hexes from '{}'", hexes.len(), source_name);
            link_chunks(&mut hexes, source_name, self.config.provenance_tag_max_len);
        }

        let related = discover(
            &mut hexes,
            corpus,
            self.config.related_limit,
            self.config.min_related_score,
        );
        info!("Discovered {} relationships for '{}'", related, source_name);

        let now = unix_now();
        for hex in &mut hexes {
            hex.stamp(now);
        }

        let summary = document_summary(&summaries, &failures, chunks.len());
        info!(
            "Ingested '{}': {} hexes, {} failed chunk(s)",
            source_name,
            hexes.len(),
            failures.len()
        );
        self.emit(IngestEvent::DocumentCompleted {
            source_name: source_name.to_string(),
            hexes: hexes.len(),
            summary: summary.clone(),
        });

        Ok(IngestResult {
            source_name: source_name.to_string(),
            hexes,
            summary,
            chunk_count: chunks.len(),
            failures,
        })
    }

    /// Ingest documents one after another.
    ///
    /// Every document is checked for sufficient content before any is
    /// extracted; one short document rejects the whole batch. Hexes from
    /// earlier documents join the corpus seen by later ones. Any fatal
    /// error ends the batch.
    pub async fn ingest_batch(
        &self,
        documents: &[Document],
        corpus: &[Hex],
    ) -> Result<BatchResult, IngestError> {
        for document in documents {
            self.check_content(document)?;
        }

        let mut current: Vec<Hex> = corpus.to_vec();
        let mut hexes = Vec::new();
        let mut results = Vec::new();

        for (i, document) in documents.iter().enumerate() {
            info!("Batch document {}/{}: '{}'", i + 1, documents.len(), document.source_name);
            let result = self.ingest(document, &current).await?;
            current.extend(result.hexes.iter().cloned());
            hexes.extend(result.hexes.iter().cloned());
            results.push(result);
        }

        let summary = batch_summary(&results);
        Ok(BatchResult {
            hexes,
            summary,
            documents: results,
        })
    }

    /// Reject a document whose trimmed text is below the minimum length.
    /// Blank text is rejected even with a zero minimum.
    fn check_content(&self, document: &Document) -> Result<(), IngestError> {
        let min = self.config.min_content_length.max(1);
        let len = document.text.trim().chars().count();
        if len >= min {
            return Ok(());
        }

        let err = IngestError::InsufficientContent {
            source_name: document.source_name.clone(),
            len,
            min,
        };
        warn!("Rejecting '{}': {}", document.source_name, err);
        self.emit(IngestEvent::DocumentSkipped {
            source_name: document.source_name.clone(),
            reason: err.to_string(),
        });
        Err(err)
    }

    /// Spawn one extraction task per chunk, bounded by the worker limit.
    ///
    /// A slot stays taken until the extractor call itself returns, even
    /// after its chunk has timed out.
    fn spawn_extractions(
        &self,
        orchestrator: &Orchestrator<E>,
        document: &Document,
        chunks: &[DocumentChunk],
    ) -> Vec<ChunkTask> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_extractions));
        let total = chunks.len();

        chunks
            .iter()
            .map(|chunk| {
                let orchestrator = orchestrator.clone();
                let semaphore = Arc::clone(&semaphore);
                let events = self.events.clone();
                let content = chunk.content.clone();
                let title = chunk.title.clone();
                let index = chunk.index;
                let source_name = document.source_name.clone();
                let source_type = document.source_type;

                tokio::spawn(async move {
                    let permit = semaphore.acquire_owned().await.map_err(|e| {
                        IngestError::Extractor(format!("Worker pool closed: {}", e))
                    })?;
                    send(
                        &events,
                        IngestEvent::ChunkStarted {
                            source_name: source_name.clone(),
                            index,
                            total,
                            title,
                        },
                    );
                    orchestrator
                        .extract_chunk_with_permit(&content, &source_name, source_type, permit)
                        .await
                })
            })
            .collect()
    }

    fn emit(&self, event: IngestEvent) {
        send(&self.events, event);
    }
}

/// Await tasks in chunk order. A fatal error aborts the remaining tasks.
async fn collect_in_order(
    mut tasks: Vec<ChunkTask>,
) -> Result<Vec<Result<ChunkExtraction, IngestError>>, IngestError> {
    let mut outcomes = Vec::with_capacity(tasks.len());
    let mut fatal = None;

    for task in tasks.iter_mut() {
        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) => Err(IngestError::Extractor(format!("Task join error: {}", e))),
        };
        match outcome {
            Err(e) if e.is_fatal() => {
                fatal = Some(e);
                break;
            }
            outcome => outcomes.push(outcome),
        }
    }

    if let Some(e) = fatal {
        for task in &tasks {
            task.abort();
        }
        return Err(e);
    }
    Ok(outcomes)
}

fn send(events: &Option<UnboundedSender<IngestEvent>>, event: IngestEvent) {
    if let Some(sender) = events {
        // A dropped receiver only means nobody is listening
        let _ = sender.send(event);
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn document_summary(summaries: &[String], failures: &[ChunkFailure], total: usize) -> String {
    let mut summary = summaries
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if !failures.is_empty() {
        let failed = failures
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        if !summary.is_empty() {
            summary.push(' ');
        }
        summary.push_str(&format!(
            "({} of {} chunks failed: {})",
            failures.len(),
            total,
            failed
        ));
    }
    summary
}

fn batch_summary(results: &[IngestResult]) -> String {
    match results {
        [] => "Processed 0 documents".to_string(),
        [only] => only.summary.clone(),
        _ => format!(
            "Processed {} documents: {}",
            results.len(),
            results
                .iter()
                .map(|r| r.summary.as_str())
                .collect::<Vec<_>>()
                .join(" | ")
        ),
    }
}
