// src/error.rs
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    #[error("missing {kind} target '{name}'")]
    MissingResource { kind: &'static str, name: String },

    #[error("secondary data unavailable: {0}")]
    SecondaryDataUnavailable(String),

    #[error("index {index} is outside the {len} loaded months")]
    OutOfRangeIndex { index: usize, len: usize },

    #[error("no month labelled '{0}'")]
    UnknownMonth(String),

    #[error("primary data could not be loaded: {0}")]
    PrimaryData(String),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
