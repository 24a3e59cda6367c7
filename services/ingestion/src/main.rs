//! Fibersheet Ingestion Service
//!
//! HTTP service for cable datasheet ingestion: PDF upload, rule-based
//! extraction into one record per fiber-count variant, staging and
//! posting to the inventory API. Also watches the data directory for
//! datasheets dropped in from outside the API.

use anyhow::Result;
use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use fibersheet_models::CableRecord;
use fibersheet_utils::config::AppConfig;
use fibersheet_utils::logging::init_logging;
use fibersheet_utils::validation::{validate_file_size, validate_file_type};

mod pdf_processor;
mod poster;
mod service;
mod staging;
mod watcher;

use service::{BatchOutcome, DatasheetService, ProcessOutcome};
use watcher::DirectoryWatcher;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Config load failed ({e}), using defaults");
        AppConfig::default()
    });
    init_logging(&config.logging)?;
    info!("Starting Fibersheet Ingestion Service");

    let max_upload_bytes = config.server.max_upload_bytes;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let poll_interval = config.ingest.poll_interval_seconds;
    let data_dir = config.ingest.data_dir.clone();

    let service = DatasheetService::new(config)?;

    if poll_interval > 0 {
        let watcher = DirectoryWatcher::new(data_dir, Duration::from_secs(poll_interval));
        tokio::spawn(watcher.run(service.clone()));
    } else {
        warn!("directory watcher disabled (poll interval is 0)");
    }

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/datasheets", get(list_datasheets))
        .route("/api/v1/datasheets/upload", post(upload_datasheet))
        .route("/api/v1/datasheets/:id", get(get_datasheet))
        .route("/api/v1/datasheets/:id/process", post(process_datasheet))
        .route("/api/v1/datasheets/:id/records", get(get_records))
        .route("/api/v1/datasheets/process-all", post(process_all))
        .route("/api/v1/staging/cleanup", post(cleanup_staging))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(service);

    let listener = TcpListener::bind(&addr).await?;
    info!("Ingestion Service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "fibersheet-ingestion",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Datasheet upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub datasheet_id: Uuid,
    pub filename: String,
    pub size_bytes: usize,
    pub status: String,
    pub records_extracted: usize,
    pub valid_records: usize,
    pub staged_files: usize,
    pub records_posted: usize,
}

/// Upload a PDF datasheet and run the extraction pipeline on it
async fn upload_datasheet(
    State(service): State<DatasheetService>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, (StatusCode, String)> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Upload error: {}", e)))?
        .ok_or((StatusCode::BAD_REQUEST, "No file provided".to_string()))?;

    let filename = field
        .file_name()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let content_type = field
        .content_type()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "application/pdf".to_string());

    validate_file_type(&filename, &["pdf"])
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let data = field
        .bytes()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Read error: {}", e)))?;

    validate_file_size(data.len(), service.config().server.max_upload_bytes)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let size_bytes = data.len();
    let (id, outcome) = service
        .ingest(&filename, &content_type, data.to_vec())
        .await;
    let outcome = outcome.map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    Ok(Json(UploadResponse {
        datasheet_id: id,
        filename,
        size_bytes,
        status: "processed".to_string(),
        records_extracted: outcome.records.len(),
        valid_records: outcome.valid_records,
        staged_files: outcome.staged_files,
        records_posted: outcome.post_summary.successful,
    }))
}

/// Datasheet metadata response
#[derive(Debug, Serialize)]
pub struct DatasheetResponse {
    pub datasheet_id: Uuid,
    pub filename: String,
    pub file_type: String,
    pub size_bytes: usize,
    pub upload_date: String,
    pub status: String,
    pub record_count: usize,
}

impl From<fibersheet_models::StoredDatasheet> for DatasheetResponse {
    fn from(doc: fibersheet_models::StoredDatasheet) -> Self {
        Self {
            datasheet_id: doc.id,
            filename: doc.filename,
            file_type: doc.file_type,
            size_bytes: doc.size_bytes,
            upload_date: doc.upload_date.to_rfc3339(),
            status: doc.status.to_string(),
            record_count: doc.records.len(),
        }
    }
}

async fn get_datasheet(
    State(service): State<DatasheetService>,
    Path(id): Path<Uuid>,
) -> Result<Json<DatasheetResponse>, (StatusCode, String)> {
    let doc = service
        .get(id)
        .await
        .ok_or((StatusCode::NOT_FOUND, "Datasheet not found".to_string()))?;

    Ok(Json(doc.into()))
}

/// List every stored datasheet, oldest first
async fn list_datasheets(
    State(service): State<DatasheetService>,
) -> Json<Vec<DatasheetResponse>> {
    let docs = service.list().await;
    Json(docs.into_iter().map(DatasheetResponse::from).collect())
}

/// Run the extraction pipeline for an uploaded datasheet
async fn process_datasheet(
    State(service): State<DatasheetService>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProcessOutcome>, (StatusCode, String)> {
    let outcome = service
        .process(id)
        .await
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    Ok(Json(outcome))
}

/// Get the records extracted from a datasheet
async fn get_records(
    State(service): State<DatasheetService>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CableRecord>>, (StatusCode, String)> {
    let doc = service
        .get(id)
        .await
        .ok_or((StatusCode::NOT_FOUND, "Datasheet not found".to_string()))?;

    Ok(Json(doc.records))
}

/// Process every PDF currently in the data directory
async fn process_all(
    State(service): State<DatasheetService>,
) -> Result<Json<BatchOutcome>, (StatusCode, String)> {
    let outcome = service
        .process_directory()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(outcome))
}

/// Staging cleanup response
#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    pub removed_files: usize,
}

async fn cleanup_staging(
    State(service): State<DatasheetService>,
) -> Result<Json<CleanupResponse>, (StatusCode, String)> {
    let removed = service
        .clear_staging()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(CleanupResponse {
        removed_files: removed,
    }))
}
