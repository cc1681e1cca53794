//! Pairwise conflict detection between a local and an incoming finding.

use auditsync_types::{hours_between, is_later, Finding, ItemId};
use serde::Serialize;

/// Which fields differ between the two sides of a pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictDifferences {
    pub status: bool,
    pub notes: bool,
    pub tested_by: bool,
    /// Only set when both sides carry a `tested_date`.
    pub timestamps: bool,
}

impl ConflictDifferences {
    pub fn between(local: &Finding, incoming: &Finding) -> Self {
        Self {
            status: local.conformance != incoming.conformance,
            notes: local.notes.trim() != incoming.notes.trim(),
            tested_by: local.tested_by.trim() != incoming.tested_by.trim(),
            timestamps: matches!(
                (local.tested_date, incoming.tested_date),
                (Some(a), Some(b)) if a != b
            ),
        }
    }
}

/// Two findings for the same item whose edits need adjudication.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeConflict {
    pub item_id: ItemId,
    pub local: Finding,
    pub incoming: Finding,
    pub differences: ConflictDifferences,
    /// Absolute gap between the two `tested_date`s, zero if either is absent.
    pub time_diff_hours: f64,
}

impl MergeConflict {
    /// The side with the later `tested_date`; local on ties or missing dates.
    pub fn newer(&self) -> &Finding {
        if is_later(self.incoming.tested_date, self.local.tested_date) {
            &self.incoming
        } else {
            &self.local
        }
    }
}

/// Decide whether `local` and `incoming` conflict.
///
/// An untested or not-applicable side never conflicts: a missing
/// observation cannot contradict a present one. Otherwise a conflict needs a
/// status difference, or differing notes where both sides actually wrote
/// something.
pub fn detect_conflict(local: &Finding, incoming: &Finding) -> Option<MergeConflict> {
    debug_assert_eq!(local.item_id, incoming.item_id);

    if local.conformance.is_neutral() || incoming.conformance.is_neutral() {
        return None;
    }

    let differences = ConflictDifferences::between(local, incoming);
    let both_noted = local.has_notes() && incoming.has_notes();
    if !differences.status && !(differences.notes && both_noted) {
        return None;
    }

    Some(MergeConflict {
        item_id: local.item_id.clone(),
        local: local.clone(),
        incoming: incoming.clone(),
        differences,
        time_diff_hours: hours_between(local.tested_date, incoming.tested_date),
    })
}
