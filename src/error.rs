//! Error handling for taxonomy stratification.
//!
//! Provides error types with context for record decoding, classification
//! extraction, configuration mismatches and output persistence.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StratifyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input directory not found at path: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Failed to decode record file: {path} - {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Invalid value for taxonomy field '{field}': {reason}")]
    InvalidRecord { field: String, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Extraction worker failed: {reason}")]
    WorkerFailed { reason: String },
}

impl StratifyError {
    /// Create a decode error for a source file
    pub fn decode(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StratifyError>;
