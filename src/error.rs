//! Error types for the verification worker.
//!
//! Check failures are never errors: they are data (verdicts and flags) and
//! are always handled by the processors. The types here cover the only
//! genuinely exceptional paths: collaborator infrastructure faults, which
//! must surface to the scheduler so it can retry.

use thiserror::Error;

/// Persistence collaborator failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No tournament with the given id
    #[error("tournament {0} not found")]
    NotFound(i32),

    /// Backend fault (connection, serialization, constraint)
    #[error("storage backend: {0}")]
    Backend(String),
}

/// Data-fetch collaborator failure. The affected match keeps its current
/// processing stage; the scheduler retries on a later pass.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The external source has no record of this match
    #[error("match {0} not found at source")]
    NotFound(u64),

    /// The external source could not be reached
    #[error("source unavailable: {0}")]
    Unavailable(String),

    /// The source answered with data the worker cannot interpret
    #[error("malformed payload for match {external_id}: {detail}")]
    Malformed { external_id: u64, detail: String },
}

/// Top-level worker error.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("configuration: {0}")]
    Config(String),
}

/// Result alias used throughout the worker.
pub type Result<T> = std::result::Result<T, WorkerError>;
