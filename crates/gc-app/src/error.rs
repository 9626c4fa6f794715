//! Error types for the gc-app service layer.

use std::path::PathBuf;

use gc_engine::EngineError;

/// Application error type wrapping errors from the backend crates into a
/// single interface for frontends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A raw table failed to fetch or parse into any usable header.
    /// Computation stays disabled until a full reload succeeds.
    #[error("Dataset unavailable: {0}")]
    DatasetUnavailable(String),

    /// InvalidInput / UnresolvedSelection, passed through unchanged.
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Failed to read data-sources config: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse data-sources config: {0}")]
    ConfigParse(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for gc-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<gc_dataset::DatasetError> for AppError {
    fn from(err: gc_dataset::DatasetError) -> Self {
        AppError::DatasetUnavailable(err.to_string())
    }
}

impl From<gc_results::ResultsError> for AppError {
    fn from(err: gc_results::ResultsError) -> Self {
        match err {
            gc_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            other => AppError::Results(other.to_string()),
        }
    }
}
