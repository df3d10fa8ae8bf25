//! Error types for mission-core operations.
//!
//! Only collaborator-level failures live here. Per-line and per-file noise in
//! session logs is absorbed by the aggregator and never becomes an error.

use std::path::PathBuf;

/// All errors that can occur in mission-core operations.
#[derive(Debug, thiserror::Error)]
pub enum MissionError {
    // ─────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Configuration file malformed: {path}: {details}")]
    ConfigMalformed { path: PathBuf, details: String },

    #[error("Unknown display timezone: {0}")]
    UnknownTimezone(String),

    // ─────────────────────────────────────────────────────────────────────
    // Log Source Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Session log directory unavailable: {path}: {source}")]
    LogDirUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session log unreadable: {path}: {source}")]
    LogFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session log not found: {0}")]
    LogFileMissing(String),

    // ─────────────────────────────────────────────────────────────────────
    // Job Store Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Job store unreadable: {path}: {source}")]
    JobStoreRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Job store malformed: {path}: {source}")]
    JobStoreParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // ─────────────────────────────────────────────────────────────────────
    // I/O Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using MissionError.
pub type Result<T> = std::result::Result<T, MissionError>;

impl From<MissionError> for String {
    fn from(err: MissionError) -> String {
        err.to_string()
    }
}
