//! Error types for the diff crate.

use auditsync_types::TypeError;

/// Errors that can occur during audit comparison.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DiffError {
    /// One of the compared snapshots broke the caller contract.
    #[error("invalid audit snapshot: {0}")]
    Validation(#[from] TypeError),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
