//! Bracket organizing request and assignment types.

use serde::{Deserialize, Serialize};

use crate::{Gender, PlayerId};

/// Which players of a pool take part in an organize run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderFilter {
    /// Mixed: both genders, male buckets first.
    #[default]
    All,
    MaleOnly,
    FemaleOnly,
}

impl GenderFilter {
    #[must_use]
    pub fn admits(self, gender: Gender) -> bool {
        match self {
            Self::All => true,
            Self::MaleOnly => gender == Gender::Male,
            Self::FemaleOnly => gender == Gender::Female,
        }
    }
}

impl std::fmt::Display for GenderFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::MaleOnly => write!(f, "male_only"),
            Self::FemaleOnly => write!(f, "female_only"),
        }
    }
}

/// One group of an organize run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketGroup {
    /// 1-based, in assignment order.
    pub group_number: u32,
    pub gender_filter: GenderFilter,
    pub seed: u64,
    pub players: Vec<PlayerId>,
}

impl BracketGroup {
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Result of one organize run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketAssignment {
    pub gender_filter: GenderFilter,
    /// Seed of the shuffle; replaying it reproduces `groups`.
    pub seed: u64,
    pub groups: Vec<BracketGroup>,
}

impl BracketAssignment {
    /// Every assigned player, group by group.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.groups.iter().flat_map(|g| g.players.iter().copied())
    }

    #[must_use]
    pub fn group_sizes(&self) -> Vec<usize> {
        self.groups.iter().map(BracketGroup::len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_admits() {
        assert!(GenderFilter::All.admits(Gender::Male));
        assert!(GenderFilter::All.admits(Gender::Female));
        assert!(GenderFilter::MaleOnly.admits(Gender::Male));
        assert!(!GenderFilter::MaleOnly.admits(Gender::Female));
        assert!(!GenderFilter::FemaleOnly.admits(Gender::Male));
    }

    #[test]
    fn filter_serde_names() {
        let json = serde_json::to_string(&GenderFilter::FemaleOnly).unwrap();
        assert_eq!(json, "\"female_only\"");
        let back: GenderFilter = serde_json::from_str("\"male_only\"").unwrap();
        assert_eq!(back, GenderFilter::MaleOnly);
    }

    #[test]
    fn assignment_flattens_players() {
        let a = PlayerId::new();
        let b = PlayerId::new();
        let assignment = BracketAssignment {
            gender_filter: GenderFilter::All,
            seed: 9,
            groups: vec![
                BracketGroup {
                    group_number: 1,
                    gender_filter: GenderFilter::All,
                    seed: 9,
                    players: vec![a],
                },
                BracketGroup {
                    group_number: 2,
                    gender_filter: GenderFilter::All,
                    seed: 9,
                    players: vec![b],
                },
            ],
        };
        assert_eq!(assignment.players().collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(assignment.group_sizes(), vec![1, 1]);
    }
}
