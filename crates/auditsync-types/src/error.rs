use thiserror::Error;

use crate::item::ItemId;

/// Errors produced when constructing or validating audit records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("checklist item id must not be empty")]
    EmptyItemId,

    #[error("duplicate checklist item id in one snapshot: {0}")]
    DuplicateItem(ItemId),

    #[error("team member id must not be empty")]
    EmptyMemberId,

    #[error("duplicate team member id in one roster: {0}")]
    DuplicateMember(String),

    #[error("unknown conformance status: {0:?}")]
    UnknownStatus(String),
}

/// Convenience alias for type-level results.
pub type TypeResult<T> = Result<T, TypeError>;
