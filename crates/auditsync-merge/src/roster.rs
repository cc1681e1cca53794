//! Team roster union.

use auditsync_types::{Roster, TeamMember};
use tracing::debug;

/// Union two rosters by member id.
///
/// Local members keep their position and their display data; incoming
/// members are appended only for ids the local roster does not know.
pub fn merge_rosters(local: &Roster, incoming: &Roster) -> Vec<TeamMember> {
    let mut merged: Vec<TeamMember> = local.iter().cloned().collect();
    for member in incoming.iter() {
        if local.contains(&member.id) {
            debug!(member = %member.id, "roster collision; keeping local entry");
            continue;
        }
        merged.push(member.clone());
    }
    merged
}
