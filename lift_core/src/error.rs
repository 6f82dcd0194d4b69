//! Error types for the lift_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for lift_core operations
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
    CatalogValidation(String),

    /// No storage backend is attached, so nothing can be written
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Plan identifier not in the catalog
    #[error("Unknown plan: {0}")]
    UnknownPlan(String),

    /// Exercise not part of the session
    #[error("Unknown exercise '{exercise_id}' in session {session_id}")]
    UnknownExercise {
        session_id: String,
        exercise_id: String,
    },

    /// Set index past the end of an exercise log
    #[error("Set {set_number} out of range for '{exercise_id}' ({available} sets)")]
    SetOutOfRange {
        exercise_id: String,
        set_number: usize,
        available: usize,
    },

    /// Session has been finished and its sets are frozen
    #[error("Session {0} is already completed")]
    SessionCompleted(String),

    /// Date string not in YYYY-MM-DD form
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
