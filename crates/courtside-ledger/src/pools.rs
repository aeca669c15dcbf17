//! Bracket pools and their assignment history.

use chrono::{DateTime, Utc};
use courtside_types::{BracketAssignment, PlayerId, PoolId};
use serde::{Deserialize, Serialize};

/// A named list of players that brackets are organized from.
///
/// Every organize run appends one [`BracketAssignment`]; later runs only see
/// players absent from all of them until the pool is reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPool {
    pub id: PoolId,
    pub name: String,
    pub players: Vec<PlayerId>,
    pub created_at: DateTime<Utc>,
    pub assignments: Vec<BracketAssignment>,
}

impl PlayerPool {
    #[must_use]
    pub fn new(name: impl Into<String>, players: Vec<PlayerId>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: PoolId::new(),
            name: name.into(),
            players,
            created_at,
            assignments: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_assigned(&self, player_id: PlayerId) -> bool {
        self.assignments
            .iter()
            .any(|a| a.players().any(|p| p == player_id))
    }

    #[must_use]
    pub fn unassigned_count(&self) -> usize {
        self.players.iter().filter(|p| !self.is_assigned(**p)).count()
    }
}
