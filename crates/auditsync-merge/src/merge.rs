//! Merge orchestration: partition two finding snapshots into buckets.

use auditsync_types::{Finding, FindingSet, ItemId, Roster, TeamMember};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::MergeOptions;
use crate::conflict::{detect_conflict, MergeConflict};
use crate::error::MergeResult;
use crate::roster::merge_rosters;

/// Bucket sizes of a [`MergeOutcome`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeSummary {
    /// Distinct item ids across both inputs.
    pub total_items: usize,
    pub conflicts: usize,
    pub auto_merged: usize,
    pub unchanged: usize,
    pub new_from_incoming: usize,
    pub team_members: usize,
}

/// The partitioned result of merging an incoming snapshot into a local one.
///
/// Every item id from either input lands in exactly one bucket.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeOutcome {
    /// Pairs that need a human decision.
    pub conflicts: Vec<MergeConflict>,
    /// Conflicts resolved by recency; holds the winning side verbatim.
    pub auto_merged: Vec<Finding>,
    /// Compatible pairs (local side) and local-only items.
    pub unchanged: Vec<Finding>,
    /// Items only the incoming snapshot has.
    pub new_from_incoming: Vec<Finding>,
    pub team_members: Vec<TeamMember>,
    pub summary: MergeSummary,
}

impl MergeOutcome {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Look up the conflict for an item, if there is one.
    pub fn conflict(&self, id: &ItemId) -> Option<&MergeConflict> {
        self.conflicts.iter().find(|c| &c.item_id == id)
    }
}

/// Merge two finding snapshots and their rosters.
///
/// Inputs are validated first: a blank or duplicate item id, or a duplicate
/// member id, fails the whole call instead of being skipped.
pub fn merge_findings(
    local: &[Finding],
    incoming: &[Finding],
    local_roster: &[TeamMember],
    incoming_roster: &[TeamMember],
    options: &MergeOptions,
) -> MergeResult<MergeOutcome> {
    options.validate()?;
    let local = FindingSet::from_findings(local.to_vec())?;
    let incoming = FindingSet::from_findings(incoming.to_vec())?;
    let local_roster = Roster::from_members(local_roster.to_vec())?;
    let incoming_roster = Roster::from_members(incoming_roster.to_vec())?;

    Ok(merge_sets(
        &local,
        &incoming,
        &local_roster,
        &incoming_roster,
        options,
    ))
}

/// Merge already validated snapshots.
///
/// Shared and local-only items come out in local order, new items in
/// incoming order.
pub fn merge_sets(
    local: &FindingSet,
    incoming: &FindingSet,
    local_roster: &Roster,
    incoming_roster: &Roster,
    options: &MergeOptions,
) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    for ours in local {
        let Some(theirs) = incoming.get(&ours.item_id) else {
            outcome.unchanged.push(ours.clone());
            continue;
        };

        match detect_conflict(ours, theirs) {
            None => {
                debug!(item = %ours.item_id, "compatible; keeping local");
                outcome.unchanged.push(ours.clone());
            }
            Some(conflict)
                if options.prefer_newer
                    && conflict.time_diff_hours > options.auto_merge_threshold_hours =>
            {
                debug!(
                    item = %conflict.item_id,
                    gap_hours = conflict.time_diff_hours,
                    "auto-merged by recency"
                );
                outcome.auto_merged.push(conflict.newer().clone());
            }
            Some(conflict) => {
                debug!(
                    item = %conflict.item_id,
                    gap_hours = conflict.time_diff_hours,
                    status_differs = conflict.differences.status,
                    "conflict needs resolution"
                );
                outcome.conflicts.push(conflict);
            }
        }
    }

    outcome.new_from_incoming = incoming
        .iter()
        .filter(|f| !local.contains(&f.item_id))
        .cloned()
        .collect();

    outcome.team_members = merge_rosters(local_roster, incoming_roster);

    outcome.summary = MergeSummary {
        total_items: local.len() + outcome.new_from_incoming.len(),
        conflicts: outcome.conflicts.len(),
        auto_merged: outcome.auto_merged.len(),
        unchanged: outcome.unchanged.len(),
        new_from_incoming: outcome.new_from_incoming.len(),
        team_members: outcome.team_members.len(),
    };

    info!(
        total = outcome.summary.total_items,
        conflicts = outcome.summary.conflicts,
        auto_merged = outcome.summary.auto_merged,
        unchanged = outcome.summary.unchanged,
        new = outcome.summary.new_from_incoming,
        "merge complete"
    );

    outcome
}
