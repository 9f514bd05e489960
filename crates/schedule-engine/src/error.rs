//! Error types for schedule-engine operations.
//!
//! The conflict checks themselves never fail. Errors only arise at the
//! boundary: parsing time strings, building screenings, loading a catalog,
//! persisting a selection, or reading travel-model configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid time (expected 24-hour HH:MM): {0}")]
    InvalidTime(String),

    #[error("Invalid screening: {0}")]
    InvalidScreening(String),

    #[error("Unknown film: {0}")]
    UnknownFilm(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
