//! Reconciliation engine for auditsync.
//!
//! Merges two independently edited copies of the same audit checklist.
//! Compatible edits are merged automatically, conflicting edits far enough
//! apart in time are auto-resolved in favor of the newer one, and the rest
//! are handed back as [`MergeConflict`]s for a human to decide.
//!
//! The usual flow is [`merge_findings`] followed, once every conflict has a
//! decision, by [`apply_resolutions`].
//!
//! # Key Types
//!
//! - [`MergeOutcome`] / [`MergeSummary`] -- Partitioned result of a merge
//! - [`MergeConflict`] / [`ConflictDifferences`] -- A pair needing a human decision
//! - [`MergeOptions`] / [`ResolutionMode`] -- Auto-merge and resolution policy
//! - [`Resolution`] -- A human decision for one conflicting item

pub mod config;
pub mod conflict;
pub mod error;
pub mod merge;
pub mod resolve;
pub mod roster;

pub use config::{MergeOptions, ResolutionMode};
pub use conflict::{detect_conflict, ConflictDifferences, MergeConflict};
pub use error::{MergeError, MergeResult};
pub use merge::{merge_findings, merge_sets, MergeOutcome, MergeSummary};
pub use resolve::{apply_resolutions, Resolution, Resolutions};
pub use roster::merge_rosters;
