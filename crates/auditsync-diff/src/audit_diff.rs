//! Audit-level diff: classify how each item's conformance moved between a
//! base audit and a target audit.

use std::fmt;

use auditsync_types::{
    compare_status, ConformanceStatus, Finding, FindingSet, ItemId, Transition,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DiffResult;

/// Identity of one audit snapshot in a comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl AuditRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date: None,
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }
}

/// How an item changed between the base and the target audit.
///
/// Unchanged items are never reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Improved,
    Regressed,
    /// Present in the target only.
    New,
    /// Present in the base only.
    Removed,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Improved => write!(f, "improved"),
            Self::Regressed => write!(f, "regressed"),
            Self::New => write!(f, "new"),
            Self::Removed => write!(f, "removed"),
        }
    }
}

/// One reported change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonDiff {
    pub item_id: ItemId,
    pub level: String,
    /// `NotTested` when the item is new.
    pub old_status: ConformanceStatus,
    /// `NotTested` when the item was removed.
    pub new_status: ConformanceStatus,
    pub change_type: ChangeType,
    pub old_notes: String,
    pub new_notes: String,
}

/// Classified, ordered changes between two audits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub base: AuditRef,
    pub target: AuditRef,
    pub improved_count: usize,
    pub regressed_count: usize,
    pub new_count: usize,
    pub removed_count: usize,
    pub total_changes: usize,
    /// Sorted by dotted item number.
    pub diffs: Vec<ComparisonDiff>,
}

impl ComparisonSummary {
    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }

    /// Diffs of one kind, in report order.
    pub fn of_type(&self, change_type: ChangeType) -> impl Iterator<Item = &ComparisonDiff> {
        self.diffs.iter().filter(move |d| d.change_type == change_type)
    }
}

/// Compare two audit snapshots.
///
/// Both sides are validated; a blank or duplicate item id is an error.
pub fn compare_audits(
    base: &AuditRef,
    base_findings: &[Finding],
    target: &AuditRef,
    target_findings: &[Finding],
) -> DiffResult<ComparisonSummary> {
    let base_set = FindingSet::from_findings(base_findings.to_vec())?;
    let target_set = FindingSet::from_findings(target_findings.to_vec())?;
    Ok(compare_sets(base, &base_set, target, &target_set))
}

/// Compare two already validated snapshots.
///
/// Items whose status moved within the same rank (e.g. `NotTested` to
/// `NotApplicable`) are not reported. A base item missing from the target is
/// reported as removed unless its base status was neutral.
pub fn compare_sets(
    base: &AuditRef,
    base_set: &FindingSet,
    target: &AuditRef,
    target_set: &FindingSet,
) -> ComparisonSummary {
    let mut diffs = Vec::new();

    for new in target_set {
        let Some(old) = base_set.get(&new.item_id) else {
            diffs.push(make_diff(new, None, Some(new), ChangeType::New));
            continue;
        };
        if old.conformance == new.conformance {
            continue;
        }
        match compare_status(old.conformance, new.conformance) {
            Transition::Improved => {
                diffs.push(make_diff(new, Some(old), Some(new), ChangeType::Improved))
            }
            Transition::Regressed => {
                diffs.push(make_diff(new, Some(old), Some(new), ChangeType::Regressed))
            }
            Transition::Unchanged => {
                debug!(item = %new.item_id, "relabel within the same rank; not reported");
            }
        }
    }

    for old in base_set {
        if !target_set.contains(&old.item_id) && !old.conformance.is_neutral() {
            diffs.push(make_diff(old, Some(old), None, ChangeType::Removed));
        }
    }

    diffs.sort_by(|a, b| a.item_id.cmp_dotted(&b.item_id));

    let count = |kind: ChangeType| diffs.iter().filter(|d| d.change_type == kind).count();
    let summary = ComparisonSummary {
        base: base.clone(),
        target: target.clone(),
        improved_count: count(ChangeType::Improved),
        regressed_count: count(ChangeType::Regressed),
        new_count: count(ChangeType::New),
        removed_count: count(ChangeType::Removed),
        total_changes: diffs.len(),
        diffs,
    };

    debug!(
        base = %summary.base.id,
        target = %summary.target.id,
        improved = summary.improved_count,
        regressed = summary.regressed_count,
        new = summary.new_count,
        removed = summary.removed_count,
        "audit comparison complete"
    );

    summary
}

fn make_diff(
    item: &Finding,
    old: Option<&Finding>,
    new: Option<&Finding>,
    change_type: ChangeType,
) -> ComparisonDiff {
    ComparisonDiff {
        item_id: item.item_id.clone(),
        level: item.level.clone(),
        old_status: old.map(|f| f.conformance).unwrap_or_default(),
        new_status: new.map(|f| f.conformance).unwrap_or_default(),
        change_type,
        old_notes: old.map(|f| f.notes.clone()).unwrap_or_default(),
        new_notes: new.map(|f| f.notes.clone()).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiffError;
    use auditsync_types::ConformanceStatus::*;
    use auditsync_types::TypeError;
    use proptest::prelude::*;

    fn finding(id: &str, status: ConformanceStatus) -> Finding {
        Finding::new(ItemId::new(id).unwrap(), status).with_level("AA")
    }

    fn compare(base: &[Finding], target: &[Finding]) -> ComparisonSummary {
        compare_audits(
            &AuditRef::new("a-1", "March audit"),
            base,
            &AuditRef::new("a-2", "June audit"),
            target,
        )
        .unwrap()
    }

    #[test]
    fn regression_reported() {
        let summary = compare(
            &[finding("2.4.4", Supports)],
            &[finding("2.4.4", PartiallySupports)],
        );
        assert_eq!(summary.total_changes, 1);
        assert_eq!(summary.regressed_count, 1);
        let diff = &summary.diffs[0];
        assert_eq!(diff.change_type, ChangeType::Regressed);
        assert_eq!(diff.old_status, Supports);
        assert_eq!(diff.new_status, PartiallySupports);
        assert_eq!(diff.level, "AA");
    }

    #[test]
    fn improvement_reported() {
        let summary = compare(
            &[finding("1.4.3", DoesNotSupport)],
            &[finding("1.4.3", Supports)],
        );
        assert_eq!(summary.improved_count, 1);
        assert_eq!(summary.diffs[0].change_type, ChangeType::Improved);
    }

    #[test]
    fn new_item_uses_not_tested_as_old_status() {
        let summary = compare(&[], &[finding("3.3.8", DoesNotSupport)]);
        assert_eq!(summary.new_count, 1);
        let diff = &summary.diffs[0];
        assert_eq!(diff.change_type, ChangeType::New);
        assert_eq!(diff.old_status, NotTested);
        assert_eq!(diff.new_status, DoesNotSupport);
    }

    #[test]
    fn unchanged_and_same_rank_relabels_not_reported() {
        let summary = compare(
            &[finding("1.1.1", Supports), finding("1.2.1", NotTested)],
            &[finding("1.1.1", Supports), finding("1.2.1", NotApplicable)],
        );
        assert!(summary.is_empty());
        assert_eq!(summary.total_changes, 0);
    }

    #[test]
    fn removed_items_reported_unless_neutral() {
        let summary = compare(
            &[finding("1.1.1", Supports), finding("1.2.1", NotApplicable)],
            &[],
        );
        assert_eq!(summary.removed_count, 1);
        let diff = &summary.diffs[0];
        assert_eq!(diff.item_id.as_str(), "1.1.1");
        assert_eq!(diff.change_type, ChangeType::Removed);
        assert_eq!(diff.old_status, Supports);
        assert_eq!(diff.new_status, NotTested);
    }

    #[test]
    fn diffs_sorted_numerically() {
        let summary = compare(
            &[
                finding("2.1.1", Supports),
                finding("1.10.1", Supports),
                finding("1.2.1", Supports),
            ],
            &[
                finding("2.1.1", DoesNotSupport),
                finding("1.10.1", DoesNotSupport),
                finding("1.2.1", DoesNotSupport),
            ],
        );
        let order: Vec<&str> = summary.diffs.iter().map(|d| d.item_id.as_str()).collect();
        assert_eq!(order, vec!["1.2.1", "1.10.1", "2.1.1"]);
    }

    #[test]
    fn identities_carried_through() {
        let summary = compare(&[], &[]);
        assert_eq!(summary.base.name, "March audit");
        assert_eq!(summary.target.id, "a-2");
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = compare_audits(
            &AuditRef::default(),
            &[],
            &AuditRef::default(),
            &[finding("1.1.1", Supports), finding("1.1.1", Supports)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            DiffError::Validation(TypeError::DuplicateItem(ItemId::new("1.1.1").unwrap()))
        );
    }

    #[test]
    fn of_type_filters() {
        let summary = compare(
            &[finding("1.1.1", Supports), finding("1.2.1", DoesNotSupport)],
            &[finding("1.1.1", DoesNotSupport), finding("1.2.1", Supports)],
        );
        assert_eq!(summary.of_type(ChangeType::Improved).count(), 1);
        assert_eq!(summary.of_type(ChangeType::Regressed).count(), 1);
    }

    #[test]
    fn change_type_json() {
        assert_eq!(serde_json::to_string(&ChangeType::Regressed).unwrap(), "\"regressed\"");
    }

    fn arb_audit() -> impl Strategy<Value = Vec<Finding>> {
        proptest::collection::btree_map(
            (1u8..4, 1u8..12),
            proptest::sample::select(ConformanceStatus::ALL.to_vec()),
            0..20,
        )
        .prop_map(|items| {
            items
                .into_iter()
                .map(|((major, minor), status)| finding(&format!("{major}.{minor}.1"), status))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn counts_and_order_are_consistent(base in arb_audit(), target in arb_audit()) {
            let summary = compare(&base, &target);
            prop_assert_eq!(summary.total_changes, summary.diffs.len());
            prop_assert_eq!(
                summary.total_changes,
                summary.improved_count + summary.regressed_count + summary.new_count + summary.removed_count
            );
            for pair in summary.diffs.windows(2) {
                prop_assert_ne!(pair[0].item_id.cmp_dotted(&pair[1].item_id), std::cmp::Ordering::Greater);
            }
            for diff in &summary.diffs {
                match diff.change_type {
                    ChangeType::Improved => prop_assert!(diff.new_status.rank() > diff.old_status.rank()),
                    ChangeType::Regressed => prop_assert!(diff.new_status.rank() < diff.old_status.rank()),
                    ChangeType::New | ChangeType::Removed => {}
                }
            }
        }

        #[test]
        fn comparing_an_audit_with_itself_reports_nothing(audit in arb_audit()) {
            prop_assert!(compare(&audit, &audit).is_empty());
        }
    }
}
