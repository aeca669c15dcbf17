//! Pool narrowing across repeated organize runs.

use std::collections::BTreeSet;

use courtside_types::{BracketAssignment, Player, PlayerId};

/// Players of `pool` not yet placed by any of `previous`.
///
/// Pool order is kept, so a replay over the same history is deterministic.
#[must_use]
pub fn unassigned_players(pool: &[Player], previous: &[BracketAssignment]) -> Vec<Player> {
    let assigned: BTreeSet<PlayerId> = previous.iter().flat_map(BracketAssignment::players).collect();
    pool.iter()
        .filter(|p| !assigned.contains(&p.id))
        .cloned()
        .collect()
}
