//! Error types for the merge crate.

use auditsync_types::{ItemId, TypeError};

/// Errors that can occur during merge and resolution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MergeError {
    /// An input snapshot or roster broke the caller contract.
    #[error("invalid merge input: {0}")]
    Validation(#[from] TypeError),

    /// Strict resolution was requested but some conflicts have no decision.
    #[error("{} conflict(s) left without a resolution: {}", .items.len(), join_ids(.items))]
    UnresolvedConflicts { items: Vec<ItemId> },

    /// Merge options are out of range.
    #[error("invalid merge options: {0}")]
    InvalidOptions(String),

    /// Options file could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}

fn join_ids(items: &[ItemId]) -> String {
    items
        .iter()
        .map(ItemId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
