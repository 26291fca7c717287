//! Error types for dataset ingestion
//!
//! Every failure aborts the run; messages carry enough context to act on
//! without consulting anything else.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for ingestion operations
pub type Result<T> = std::result::Result<T, IngestError>;

/// Errors that can occur while fetching, sampling, or archiving a dataset
#[derive(Debug, Error)]
pub enum IngestError {
    /// Dataset ID is not in `name` or `org/name` form
    #[error("Invalid dataset ID (expected 'org/name'): {dataset_id}")]
    InvalidDatasetId { dataset_id: String },

    /// The provider could not resolve the dataset
    #[error("Dataset not found: {dataset_id}\n  → Check the ID on huggingface.co/datasets, or set HF_TOKEN for gated datasets")]
    DatasetNotFound { dataset_id: String },

    /// The dataset exists but has no such configuration
    #[error("Configuration '{config_name}' not found in {dataset_id} (available: {available:?})")]
    ConfigNotFound {
        dataset_id: String,
        config_name: String,
        available: Vec<String>,
    },

    /// The requested split is absent from the dataset handle
    #[error("Split '{split}' not found (available: {available:?})")]
    SplitNotFound { split: String, available: Vec<String> },

    /// The repository holds no data files this tool can read
    #[error("Unsupported dataset layout in {dataset_id}: {message}")]
    UnsupportedLayout { dataset_id: String, message: String },

    /// HuggingFace Hub transport or API failure
    #[error("HuggingFace Hub error: {message}")]
    Hub { message: String },

    /// Filesystem failure on read or write
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parquet decoding failure
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Arrow conversion failure
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// JSON serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Job manifest could not be read or is invalid
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// A saved dataset directory is missing pieces or inconsistent
    #[error("Invalid dataset archive at {}: {message}", path.display())]
    InvalidArchive { path: PathBuf, message: String },

    /// Shard digest does not match the one recorded at save time
    #[error("Corrupt file at {}: expected SHA256 {expected_hash}, got {actual_hash}", path.display())]
    CorruptFile {
        path: PathBuf,
        expected_hash: String,
        actual_hash: String,
    },
}

impl IngestError {
    /// Create an IO error tagged with the path being accessed
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether the error means the dataset, config, or split could not be resolved
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::DatasetNotFound { .. } | Self::ConfigNotFound { .. } | Self::SplitNotFound { .. }
        )
    }

    /// Stable error code for structured output
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidDatasetId { .. } => "E001",
            Self::DatasetNotFound { .. } => "E010",
            Self::ConfigNotFound { .. } => "E011",
            Self::SplitNotFound { .. } => "E012",
            Self::UnsupportedLayout { .. } => "E013",
            Self::Hub { .. } => "E020",
            Self::Io { .. } => "E030",
            Self::Parquet(_) => "E040",
            Self::Arrow(_) => "E041",
            Self::Json(_) => "E042",
            Self::Config { .. } => "E050",
            Self::InvalidArchive { .. } => "E060",
            Self::CorruptFile { .. } => "E061",
        }
    }
}
