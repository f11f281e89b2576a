//! Error taxonomy of the catalog store.
//!
//! Two public kinds: `CsvError` for everything at the tabular layer
//! (file I/O, csv framing, worker-pool argument validation) and
//! `DataApiError` for everything against the snapshot endpoint. Per-row
//! parse and emit failures never surface here; they are logged and the row
//! is dropped.

use thiserror::Error;

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Any failure of a catalog store operation.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog csv: {0}")]
    Csv(#[from] CsvError),

    #[error("snapshot api: {0}")]
    DataApi(#[from] DataApiError),
}

/// Failures at the tabular layer.
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    InvalidWorkerArgs(#[from] InvalidWorkerArgs),

    #[error("worker task: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Rejected bounded-read arguments.
///
/// Raised when the job budget or per-worker quota is zero, or the quota
/// exceeds the budget.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid worker arguments: job budget {job_budget}, jobs per worker {per_worker}")]
pub struct InvalidWorkerArgs {
    pub job_budget: usize,
    pub per_worker: usize,
}

/// Failures against the snapshot endpoint.
#[derive(Debug, Error)]
pub enum DataApiError {
    #[error("request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid response code: expected 200, got {0}")]
    InvalidResponseCode(u16),

    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),
}
