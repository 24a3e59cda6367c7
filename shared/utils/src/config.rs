use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub ingest: IngestConfig,
    pub inventory_api: InventoryApiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub timeout_seconds: u64,
}

/// Directories and scheduling for the datasheet pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Directory watched for incoming PDF datasheets.
    pub data_dir: String,
    /// Directory where per-record JSON files are staged.
    pub staging_dir: String,
    /// Seconds between directory scans. 0 disables the watcher.
    pub poll_interval_seconds: u64,
    /// Post records to the inventory API after each parse.
    pub post_after_parse: bool,
}

/// Connection settings for the downstream inventory API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryApiConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    /// The test inventory endpoint runs with a self-signed certificate.
    pub verify_ssl: bool,
    pub timeout_seconds: u64,
    /// Pause between sequential record posts.
    pub request_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let config = Config::builder()
            // Start with default values
            .add_source(File::with_name("config/default").required(false))
            // Add environment-specific config
            .add_source(
                File::with_name(&format!(
                    "config/{}",
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // Add local config (gitignored)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with FIBERSHEET prefix
            .add_source(Environment::with_prefix("FIBERSHEET").separator("__"));

        config.build()?.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                max_upload_bytes: 16 * 1024 * 1024, // 16MB
                timeout_seconds: 30,
            },
            ingest: IngestConfig {
                data_dir: "data".to_string(),
                staging_dir: "output".to_string(),
                poll_interval_seconds: 2,
                post_after_parse: true,
            },
            inventory_api: InventoryApiConfig {
                api_url: "https://inventory.example.com/api/datasheet/configureDatasheet"
                    .to_string(),
                api_key: None,
                verify_ssl: false,
                timeout_seconds: 30,
                request_delay_ms: 1000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
                file_path: None,
            },
        }
    }
}
