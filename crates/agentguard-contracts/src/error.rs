//! Error types for the AgentGuard screening pipeline.
//!
//! Malformed rows are never errors: they surface as a negative
//! `ValidationVerdict`. The variants here cover contract violations by the
//! caller and failures of the surrounding I/O (config, ingest, reports).

use thiserror::Error;

/// The unified error type for AgentGuard.
#[derive(Debug, Error)]
pub enum GuardError {
    /// The caller broke an API contract, e.g. asked to validate no record.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// A screening configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The transaction file could not be read or is not valid CSV.
    #[error("ingest failed: {reason}")]
    IngestError { reason: String },

    /// The header row lacks one or more required columns.
    #[error("missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// The uploaded file is not a CSV file.
    #[error("invalid file type '{path}': expected a .csv file")]
    InvalidFileType { path: String },

    /// A report could not be written to its destination.
    #[error("report write failed: {reason}")]
    ReportWriteFailed { reason: String },
}

/// Convenience alias used throughout the AgentGuard crates.
pub type GuardResult<T> = Result<T, GuardError>;
