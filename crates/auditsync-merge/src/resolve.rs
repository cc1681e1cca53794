//! Apply human decisions to a merge outcome.

use std::collections::HashMap;

use auditsync_types::{Finding, ItemId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ResolutionMode;
use crate::error::{MergeError, MergeResult};
use crate::merge::MergeOutcome;

/// Which side of a conflict to keep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Local,
    Incoming,
}

/// Decisions keyed by the conflicting item id.
pub type Resolutions = HashMap<ItemId, Resolution>;

/// Produce the final finding set from a merge outcome.
///
/// The result holds the unchanged, auto-merged and new findings in that
/// order, followed by the chosen side of each decided conflict in conflict
/// order. In [`ResolutionMode::Strict`] any undecided conflict fails the call
/// and lists every undecided item; in [`ResolutionMode::OmitUnresolved`]
/// undecided conflicts are left out of the result.
pub fn apply_resolutions(
    outcome: &MergeOutcome,
    resolutions: &Resolutions,
    mode: ResolutionMode,
) -> MergeResult<Vec<Finding>> {
    let undecided: Vec<ItemId> = outcome
        .conflicts
        .iter()
        .filter(|c| !resolutions.contains_key(&c.item_id))
        .map(|c| c.item_id.clone())
        .collect();

    if !undecided.is_empty() {
        match mode {
            ResolutionMode::Strict => {
                return Err(MergeError::UnresolvedConflicts { items: undecided });
            }
            ResolutionMode::OmitUnresolved => {
                warn!(count = undecided.len(), "omitting unresolved conflicts from merged set");
            }
        }
    }

    for id in resolutions.keys() {
        if outcome.conflict(id).is_none() {
            debug!(item = %id, "resolution for an item that is not in conflict; ignored");
        }
    }

    let mut merged = Vec::with_capacity(
        outcome.unchanged.len()
            + outcome.auto_merged.len()
            + outcome.new_from_incoming.len()
            + outcome.conflicts.len(),
    );
    merged.extend(outcome.unchanged.iter().cloned());
    merged.extend(outcome.auto_merged.iter().cloned());
    merged.extend(outcome.new_from_incoming.iter().cloned());

    for conflict in &outcome.conflicts {
        match resolutions.get(&conflict.item_id) {
            Some(Resolution::Local) => merged.push(conflict.local.clone()),
            Some(Resolution::Incoming) => merged.push(conflict.incoming.clone()),
            None => {}
        }
    }

    Ok(merged)
}
