//! Error types for famcal-engine operations.
//!
//! The query operations themselves are total; errors only come from parsing
//! user-facing tokens, datetimes, and JSON snapshots.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid view mode: {0}")]
    InvalidViewMode(String),

    #[error("Invalid navigation direction: {0}")]
    InvalidDirection(String),

    #[error("Invalid palette key: {0}")]
    InvalidPaletteKey(String),

    #[error("Invalid clustering mode: {0}")]
    InvalidClusterMode(String),

    #[error("Hour height must be a positive number, got {0}")]
    InvalidHourHeight(f64),

    #[error("Invalid datetime: {0}")]
    InvalidDateTime(String),

    /// The calendar snapshot was not valid JSON or did not match the schema.
    #[error("Snapshot parse error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
