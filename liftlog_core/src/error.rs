//! Error types for the liftlog_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for liftlog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    Catalog(String),

    /// Requested program key does not exist
    #[error("Unknown program: {0}")]
    UnknownProgram(String),

    /// Session tracker error
    #[error("Session error: {0}")]
    Session(String),

    /// Document store error
    #[error("Storage error: {0}")]
    Storage(String),

    /// No authenticated user is available
    #[error("No authenticated user")]
    Unauthenticated,

    /// Generic error
    #[error("{0}")]
    Other(String),
}
