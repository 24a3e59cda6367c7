//! Datasheet Ingestion Service
//!
//! Orchestrates the pipeline: uploaded PDF bytes → text extraction →
//! rule-based parsing → advisory validation → JSON staging → inventory
//! posting. Holds the in-memory store of uploaded datasheets.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use fibersheet_models::{CableRecord, ProcessingStatus, StoredDatasheet};
use fibersheet_utils::config::AppConfig;
use fibersheet_utils::datasheet::{DatasheetParser, RecordValidator};

use crate::pdf_processor::PdfProcessor;
use crate::poster::{InventoryClient, PostSummary};
use crate::staging;

/// Outcome of processing one datasheet.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutcome {
    pub records: Vec<CableRecord>,
    pub valid_records: usize,
    pub staged_files: usize,
    pub post_summary: PostSummary,
}

/// Outcome of a batch run over the data directory.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub documents_processed: usize,
    pub documents_failed: usize,
    pub records: Vec<CableRecord>,
    pub valid_records: usize,
    pub staged_files: usize,
    pub post_summary: PostSummary,
}

/// Datasheet ingestion service shared across handlers and the watcher.
#[derive(Clone)]
pub struct DatasheetService {
    documents: Arc<RwLock<HashMap<Uuid, StoredDatasheet>>>,
    parser: DatasheetParser,
    validator: RecordValidator,
    pdf_processor: Arc<PdfProcessor>,
    poster: Arc<InventoryClient>,
    config: Arc<AppConfig>,
}

impl DatasheetService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let poster = InventoryClient::new(&config.inventory_api)?;
        Ok(Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
            parser: DatasheetParser::new(),
            validator: RecordValidator::new(),
            pdf_processor: Arc::new(PdfProcessor::new()),
            poster: Arc::new(poster),
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Store uploaded datasheet bytes.
    pub async fn store_upload(&self, filename: &str, file_type: &str, data: Vec<u8>) -> Uuid {
        let doc = StoredDatasheet::new(filename, file_type, data);
        let id = doc.id;
        self.documents.write().await.insert(id, doc);
        id
    }

    /// Get a stored datasheet by id.
    pub async fn get(&self, id: Uuid) -> Option<StoredDatasheet> {
        self.documents.read().await.get(&id).cloned()
    }

    /// All stored datasheets, oldest upload first.
    pub async fn list(&self) -> Vec<StoredDatasheet> {
        let mut docs: Vec<StoredDatasheet> = self.documents.read().await.values().cloned().collect();
        docs.sort_by_key(|d| d.upload_date);
        docs
    }

    /// Store an upload and immediately run the full pipeline on it.
    ///
    /// The id is returned even when processing fails so the caller can
    /// still inspect the stored datasheet.
    pub async fn ingest(
        &self,
        filename: &str,
        file_type: &str,
        data: Vec<u8>,
    ) -> (Uuid, Result<ProcessOutcome>) {
        let id = self.store_upload(filename, file_type, data).await;
        (id, self.process(id).await)
    }

    /// Run the full pipeline for a stored datasheet.
    pub async fn process(&self, id: Uuid) -> Result<ProcessOutcome> {
        let (filename, data) = {
            let mut docs = self.documents.write().await;
            let doc = docs
                .get_mut(&id)
                .with_context(|| format!("Datasheet {id} not found"))?;
            doc.status = ProcessingStatus::Processing;
            (doc.filename.clone(), doc.data.clone())
        };

        let result = self.process_bytes(&filename, &data).await;

        let mut docs = self.documents.write().await;
        if let Some(doc) = docs.get_mut(&id) {
            match &result {
                Ok(outcome) => {
                    doc.status = ProcessingStatus::Processed;
                    doc.records = outcome.records.clone();
                }
                Err(_) => doc.status = ProcessingStatus::Failed,
            }
        }

        result
    }

    /// Extract text from PDF bytes and run the text pipeline.
    async fn process_bytes(&self, filename: &str, data: &[u8]) -> Result<ProcessOutcome> {
        let text = self.pdf_processor.extract_text(data)?;
        info!(filename, characters = text.len(), "extracted datasheet text");
        self.process_text(filename, &text).await
    }

    /// Parse already-extracted text, validate, stage and post.
    ///
    /// Seam used by everything above PDF extraction, and directly by
    /// tests that do not want to synthesize PDF bytes.
    pub async fn process_text(&self, filename: &str, text: &str) -> Result<ProcessOutcome> {
        let records = self.parser.parse_document(filename, text)?;
        if records.is_empty() {
            warn!(filename, "no cable variants extracted");
        } else {
            info!(filename, variants = records.len(), "extracted cable variants");
        }

        Ok(self.finish(records).await)
    }

    /// Process a PDF file from disk (watcher and batch path).
    pub async fn process_path(&self, path: &Path) -> Result<ProcessOutcome> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Invalid file name: {}", path.display()))?
            .to_string();
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let id = self
            .store_upload(&filename, "application/pdf", data)
            .await;
        self.process(id).await
    }

    /// Process every PDF in the data directory as one batch.
    ///
    /// Text extraction and parsing failures are isolated per document;
    /// the batch itself only fails if the directory cannot be read.
    pub async fn process_directory(&self) -> Result<BatchOutcome> {
        let data_dir = Path::new(&self.config.ingest.data_dir);
        let mut texts: IndexMap<String, String> = IndexMap::new();
        let mut documents_failed = 0;

        let mut paths: Vec<_> = std::fs::read_dir(data_dir)
            .with_context(|| format!("Failed to read data directory {}", data_dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("pdf"))
            .collect();
        paths.sort();

        for path in paths {
            let filename = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            let extracted = std::fs::read(&path)
                .map_err(anyhow::Error::from)
                .and_then(|data| self.pdf_processor.extract_text(&data));
            match extracted {
                Ok(text) => {
                    texts.insert(filename, text);
                }
                Err(error) => {
                    documents_failed += 1;
                    warn!(filename = %filename, %error, "failed to extract text, skipping");
                }
            }
        }

        let documents_processed = texts.len();
        let records = self.parser.parse_batch(&texts);
        let outcome = self.finish(records).await;

        Ok(BatchOutcome {
            documents_processed,
            documents_failed,
            records: outcome.records,
            valid_records: outcome.valid_records,
            staged_files: outcome.staged_files,
            post_summary: outcome.post_summary,
        })
    }

    /// Validate, stage and post a set of freshly parsed records.
    async fn finish(&self, records: Vec<CableRecord>) -> ProcessOutcome {
        // Validation is advisory: invalid records are counted but still
        // staged and posted.
        let valid_records = records
            .iter()
            .filter(|r| self.validator.validate(r).is_valid)
            .count();

        let staging_dir = Path::new(&self.config.ingest.staging_dir);
        let staged_files = staging::stage_records(staging_dir, &records);

        let post_summary = if self.config.ingest.post_after_parse && !records.is_empty() {
            self.poster.post_records(&records).await
        } else {
            PostSummary::skipped()
        };

        ProcessOutcome {
            records,
            valid_records,
            staged_files,
            post_summary,
        }
    }

    /// Remove staged record files.
    pub fn clear_staging(&self) -> Result<usize> {
        staging::clear_staged_records(Path::new(&self.config.ingest.staging_dir))
    }
}
