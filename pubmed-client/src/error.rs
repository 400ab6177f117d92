use std::result;

use thiserror::Error;

/// Error types for PubMed client operations
#[derive(Error, Debug)]
pub enum PubMedError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// MEDLINE text could not be parsed
    #[error("MEDLINE parsing failed at line {line}: {message}")]
    MedlineParseError { line: usize, message: String },

    /// Generic API error with HTTP status code
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },
}

pub type Result<T> = result::Result<T, PubMedError>;

impl PubMedError {
    /// Short description of the failure class, suitable for user-facing notices
    pub fn reason(&self) -> &str {
        match self {
            PubMedError::RequestError(err) if err.is_timeout() => "Request timeout",
            PubMedError::RequestError(err) if err.is_connect() => "Connection error",
            PubMedError::RequestError(_) => "Network error",
            PubMedError::JsonError(_) => "Invalid JSON response",
            PubMedError::MedlineParseError { .. } => "Invalid MEDLINE response",
            PubMedError::ApiError { status, .. } => match status {
                429 => "Rate limit exceeded",
                500..=599 => "Server error",
                _ => "API error",
            },
        }
    }
}
