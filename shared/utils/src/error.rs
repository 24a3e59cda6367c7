use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum FibersheetError {
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("PDF extraction error: {message}")]
    PdfExtraction { message: String },

    #[error("Datasheet parse error: {message}")]
    Parse { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("External service error: {service} - {message}")]
    ExternalService { service: String, message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl FibersheetError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn pdf_extraction(message: impl Into<String>) -> Self {
        Self::PdfExtraction {
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::PdfExtraction { .. } => "PDF_EXTRACTION_ERROR",
            Self::Parse { .. } => "DATASHEET_PARSE_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::ExternalService { .. } => "EXTERNAL_SERVICE_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::PdfExtraction { .. } => 422,
            Self::Parse { .. } => 422,
            Self::Configuration { .. } => 500,
            Self::ExternalService { .. } => 502,
            Self::NotFound { .. } => 404,
            Self::Internal { .. } => 500,
        }
    }
}

pub type FibersheetResult<T> = Result<T, FibersheetError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl From<FibersheetError> for ErrorResponse {
    fn from(error: FibersheetError) -> Self {
        Self {
            error: error.to_string(),
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        }
    }
}

// Conversion from common error types
impl From<reqwest::Error> for FibersheetError {
    fn from(error: reqwest::Error) -> Self {
        Self::external_service("HTTP Client", error.to_string())
    }
}

impl From<serde_json::Error> for FibersheetError {
    fn from(error: serde_json::Error) -> Self {
        Self::validation("JSON", error.to_string())
    }
}

impl From<std::io::Error> for FibersheetError {
    fn from(error: std::io::Error) -> Self {
        Self::internal(error.to_string())
    }
}
