//! Inventory API Client
//!
//! Posts extracted cable records to the remote inventory API, one JSON
//! request per record, with a configured pause between calls. There is no
//! retry logic here; a failed record is reported in the summary and left
//! to the operator.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

use fibersheet_models::CableRecord;
use fibersheet_utils::config::InventoryApiConfig;

/// Client for the downstream inventory API.
pub struct InventoryClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    request_delay: Duration,
}

impl InventoryClient {
    pub fn new(config: &InventoryApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            // The test inventory endpoint uses a self-signed certificate.
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            request_delay: Duration::from_millis(config.request_delay_ms),
        })
    }

    /// Post a single record. Transport and HTTP-level failures are folded
    /// into the returned `PostResult` rather than propagated.
    pub async fn post_record(&self, record: &CableRecord) -> PostResult {
        let mut request = self.client.post(&self.api_url).json(record);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        match request.send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    PostResult {
                        success: true,
                        status_code: Some(status.as_u16()),
                        error: None,
                        cable_description: record.cable_description.clone(),
                    }
                } else {
                    let body = response.text().await.unwrap_or_default();
                    PostResult {
                        success: false,
                        status_code: Some(status.as_u16()),
                        error: Some(format!("API error: {} - {}", status, body)),
                        cable_description: record.cable_description.clone(),
                    }
                }
            }
            Err(error) => PostResult {
                success: false,
                status_code: None,
                error: Some(format!("Request failed: {error}")),
                cable_description: record.cable_description.clone(),
            },
        }
    }

    /// Post records sequentially with the configured delay between calls
    /// (but not after the last one).
    pub async fn post_records(&self, records: &[CableRecord]) -> PostSummary {
        let total = records.len();
        info!(total, api_url = %self.api_url, "posting cable records to inventory API");

        let mut results = Vec::with_capacity(total);
        for (i, record) in records.iter().enumerate() {
            let result = self.post_record(record).await;
            if result.success {
                info!(cable = %result.cable_description, "record posted");
            } else {
                warn!(
                    cable = %result.cable_description,
                    error = result.error.as_deref().unwrap_or("unknown"),
                    "record post failed"
                );
            }
            results.push(result);

            if i + 1 < total && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }
        }

        let successful = results.iter().filter(|r| r.success).count();
        info!(successful, failed = total - successful, "inventory posting complete");

        PostSummary {
            total,
            successful,
            failed: total - successful,
            results,
        }
    }
}

/// Outcome of posting one record.
#[derive(Debug, Clone, Serialize)]
pub struct PostResult {
    pub success: bool,
    pub status_code: Option<u16>,
    pub error: Option<String>,
    pub cable_description: String,
}

/// Aggregate outcome of a posting run.
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<PostResult>,
}

impl PostSummary {
    /// Summary for a run where posting was skipped entirely.
    pub fn skipped() -> Self {
        Self {
            total: 0,
            successful: 0,
            failed: 0,
            results: Vec::new(),
        }
    }
}
