//! Foundation types for auditsync.
//!
//! This crate provides the record types shared by the reconciliation and
//! comparison engines. Every other auditsync crate depends on
//! `auditsync-types`.
//!
//! # Key Types
//!
//! - [`Finding`] — One evaluation of one checklist item within one audit
//! - [`FindingSet`] — A validated audit snapshot keyed by [`ItemId`]
//! - [`ConformanceStatus`] — Closed, ranked set of test outcomes
//! - [`Transition`] — Direction of a status change ([`compare_status`])
//! - [`ItemId`] — Checklist item identifier with dotted numeric ordering
//! - [`TeamMember`] / [`Roster`] — Reviewer metadata

pub mod conformance;
pub mod error;
pub mod finding;
pub mod item;
pub mod team;
pub mod temporal;

pub use conformance::{compare_status, ConformanceStatus, Transition};
pub use error::{TypeError, TypeResult};
pub use finding::{Finding, FindingSet};
pub use item::ItemId;
pub use team::{Roster, TeamMember};
pub use temporal::{hours_between, is_later};
