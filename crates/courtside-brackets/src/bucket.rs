//! Partitioning a pool into `(gender, level)` buckets.
//!
//! Buckets iterate in a fixed order: male before female, ascending level,
//! players without a level last. Unleveled players form their own bucket and
//! are never balanced against leveled ones.

use std::collections::BTreeMap;
use std::fmt;

use courtside_types::{constants, Gender, GenderFilter, Player};

/// Level part of a bucket key. `NoLevel` sorts after every numeric level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum LevelKey {
    Level(u32),
    NoLevel,
}

impl From<Option<u32>> for LevelKey {
    fn from(level: Option<u32>) -> Self {
        level.map_or(Self::NoLevel, Self::Level)
    }
}

impl fmt::Display for LevelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level(l) => write!(f, "{l}"),
            Self::NoLevel => write!(f, "{}", constants::NO_LEVEL_KEY),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct BucketKey {
    pub gender: Gender,
    pub level: LevelKey,
}

impl BucketKey {
    #[must_use]
    pub fn of(player: &Player) -> Self {
        Self {
            gender: player.gender,
            level: player.level.into(),
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.gender, self.level)
    }
}

/// Buckets of players in processing order. Within a bucket, pool order is kept.
pub type Buckets<'a> = BTreeMap<BucketKey, Vec<&'a Player>>;

/// Keep the players the filter admits and group them by bucket key.
#[must_use]
pub fn partition(pool: &[Player], filter: GenderFilter) -> Buckets<'_> {
    let mut buckets: Buckets<'_> = BTreeMap::new();
    for player in pool.iter().filter(|p| filter.admits(p.gender)) {
        buckets.entry(BucketKey::of(player)).or_default().push(player);
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_level_sorts_last() {
        assert!(LevelKey::Level(0) < LevelKey::Level(9));
        assert!(LevelKey::Level(u32::MAX) < LevelKey::NoLevel);
        assert_eq!(LevelKey::NoLevel.to_string(), "no_level");
    }

    #[test]
    fn buckets_iterate_male_first_then_levels() {
        let pool = vec![
            Player::dummy(Gender::Female, Some(1)),
            Player::dummy(Gender::Male, None),
            Player::dummy(Gender::Male, Some(3)),
            Player::dummy(Gender::Male, Some(1)),
            Player::dummy(Gender::Female, None),
        ];
        let keys: Vec<String> = partition(&pool, GenderFilter::All)
            .keys()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            keys,
            vec![
                "male/1",
                "male/3",
                "male/no_level",
                "female/1",
                "female/no_level"
            ]
        );
    }

    #[test]
    fn filter_drops_other_gender() {
        let pool = vec![
            Player::dummy(Gender::Female, Some(1)),
            Player::dummy(Gender::Male, Some(1)),
        ];
        let buckets = partition(&pool, GenderFilter::FemaleOnly);
        assert_eq!(buckets.len(), 1);
        assert!(buckets.keys().all(|k| k.gender == Gender::Female));
    }

    #[test]
    fn unleveled_players_kept_apart() {
        let pool = vec![
            Player::dummy(Gender::Male, Some(2)),
            Player::dummy(Gender::Male, None),
            Player::dummy(Gender::Male, Some(2)),
        ];
        let buckets = partition(&pool, GenderFilter::MaleOnly);
        assert_eq!(buckets.len(), 2);
        let leveled = &buckets[&BucketKey {
            gender: Gender::Male,
            level: LevelKey::Level(2),
        }];
        assert_eq!(leveled.len(), 2);
        assert_eq!(leveled[0].id, pool[0].id);
        assert_eq!(leveled[1].id, pool[2].id);
    }
}
