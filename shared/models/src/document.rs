use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::record::CableRecord;

/// An uploaded datasheet held by the ingestion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDatasheet {
    pub id: Uuid,
    pub filename: String,
    pub file_type: String,
    pub size_bytes: usize,
    pub upload_date: DateTime<Utc>,
    pub status: ProcessingStatus,
    #[serde(skip)]
    pub data: Vec<u8>,
    /// Records produced by the last successful parse, in fiber-count order.
    pub records: Vec<CableRecord>,
}

impl StoredDatasheet {
    pub fn new(filename: &str, file_type: &str, data: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename: filename.to_string(),
            file_type: file_type.to_string(),
            size_bytes: data.len(),
            upload_date: Utc::now(),
            status: ProcessingStatus::Uploaded,
            data,
            records: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    Uploaded,
    Processing,
    Processed,
    Failed,
}

impl std::fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uploaded => write!(f, "uploaded"),
            Self::Processing => write!(f, "processing"),
            Self::Processed => write!(f, "processed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}
