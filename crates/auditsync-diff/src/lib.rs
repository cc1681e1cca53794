//! Comparison engine for auditsync.
//!
//! Computes which checklist items improved, regressed, appeared, or
//! disappeared between two completed audits, in natural checklist order.
//!
//! # Key Types
//!
//! - [`ComparisonSummary`] / [`ComparisonDiff`] -- Ordered, classified changes ([`compare_audits`])
//! - [`ChangeType`] -- `improved`, `regressed`, `new`, `removed`
//! - [`AuditRef`] -- Identity of one side of a comparison
//! - [`NotesDelta`] / [`NoteLine`] -- Line-level delta between two notes ([`diff_notes`])

pub mod audit_diff;
pub mod error;
pub mod notes;

pub use audit_diff::{compare_audits, compare_sets, AuditRef, ChangeType, ComparisonDiff, ComparisonSummary};
pub use error::{DiffError, DiffResult};
pub use notes::{diff_notes, NoteLine, NotesDelta};
