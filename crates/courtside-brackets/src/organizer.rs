//! Level-balanced group assignment.

use std::collections::BTreeSet;

use courtside_types::{
    BracketAssignment, BracketConfig, BracketGroup, CourtsideError, GenderFilter, Player,
    PlayerId, Result,
};

use crate::bucket::partition;
use crate::rng::{fresh_seed, ShuffleRng};

/// Split a pool into `group_count` groups, balancing each `(gender, level)`
/// bucket across them.
///
/// # Algorithm
/// 1. Reject `group_count` outside `1..=max_group_count`
/// 2. Keep the players the filter admits; fail with `EmptyPool` if none remain
/// 3. Bucket by `(gender, level)`: male first, ascending level, unleveled last
/// 4. Shuffle each bucket in that order with one RNG seeded from `seed`
///    (a fresh seed is drawn when `None`)
/// 5. Deal each bucket out consecutively: with `n` players and `g` groups,
///    the first `n % g` groups get `n / g + 1`, the rest `n / g`
/// 6. Each group is the concatenation of its slices in bucket order
///
/// Groups are numbered from 1. Every group records the filter and the seed.
pub fn organize_brackets(
    pool: &[Player],
    group_count: u32,
    filter: GenderFilter,
    seed: Option<u64>,
    config: &BracketConfig,
) -> Result<BracketAssignment> {
    if group_count == 0 || group_count > config.max_group_count {
        return Err(CourtsideError::InvalidGroupCount {
            count: group_count,
            max: config.max_group_count,
        });
    }
    let mut seen = BTreeSet::new();
    if let Some(dup) = pool.iter().find(|p| !seen.insert(p.id)) {
        return Err(CourtsideError::invalid(format!(
            "player {} appears twice in the pool",
            dup.id
        )));
    }

    let buckets = partition(pool, filter);
    if buckets.is_empty() {
        tracing::warn!(filter = %filter, pool = pool.len(), "No eligible players to organize");
        return Err(CourtsideError::EmptyPool);
    }

    let seed = seed.unwrap_or_else(fresh_seed);
    let mut rng = ShuffleRng::from_seed_u64(seed);
    let groups_len = group_count as usize;
    let mut groups: Vec<Vec<PlayerId>> = vec![Vec::new(); groups_len];

    for (key, mut members) in buckets {
        rng.shuffle(&mut members);
        let sizes = slice_sizes(members.len(), groups_len);
        let mut rest = members.as_slice();
        for (group, size) in groups.iter_mut().zip(sizes) {
            let (slice, tail) = rest.split_at(size);
            group.extend(slice.iter().map(|p| p.id));
            rest = tail;
        }
        tracing::debug!(bucket = %key, players = members.len(), "Bucket dealt");
    }

    let groups: Vec<BracketGroup> = (1..=group_count)
        .zip(groups)
        .map(|(group_number, players)| BracketGroup {
            group_number,
            gender_filter: filter,
            seed,
            players,
        })
        .collect();

    let assignment = BracketAssignment {
        gender_filter: filter,
        seed,
        groups,
    };
    tracing::info!(
        filter = %filter,
        seed,
        groups = group_count,
        sizes = ?assignment.group_sizes(),
        "Brackets organized"
    );
    Ok(assignment)
}

/// Slice lengths for dealing `n` players into `groups` groups.
#[must_use]
pub fn slice_sizes(n: usize, groups: usize) -> Vec<usize> {
    if groups == 0 {
        return Vec::new();
    }
    let base = n / groups;
    let extra = n % groups;
    (0..groups).map(|i| base + usize::from(i < extra)).collect()
}

#[cfg(test)]
mod tests {
    use courtside_types::Gender;

    use super::*;

    fn cfg() -> BracketConfig {
        BracketConfig::default()
    }

    #[test]
    fn ten_unleveled_men_into_three_groups() {
        let pool = Player::dummy_many(10, Gender::Male, None);
        let a = organize_brackets(&pool, 3, GenderFilter::All, Some(42), &cfg()).unwrap();
        assert_eq!(a.group_sizes(), vec![4, 3, 3]);
        assert_eq!(
            a.groups.iter().map(|g| g.group_number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(a.groups.iter().all(|g| g.seed == 42 && g.gender_filter == GenderFilter::All));
    }

    #[test]
    fn same_seed_reproduces_groups() {
        let mut pool = Player::dummy_many(7, Gender::Male, Some(2));
        pool.extend(Player::dummy_many(5, Gender::Female, Some(1)));
        let a = organize_brackets(&pool, 4, GenderFilter::All, Some(9), &cfg()).unwrap();
        let b = organize_brackets(&pool, 4, GenderFilter::All, Some(9), &cfg()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unseeded_run_records_its_seed() {
        let pool = Player::dummy_many(6, Gender::Female, None);
        let a = organize_brackets(&pool, 2, GenderFilter::All, None, &cfg()).unwrap();
        let replay = organize_brackets(&pool, 2, GenderFilter::All, Some(a.seed), &cfg()).unwrap();
        assert_eq!(a, replay);
    }

    #[test]
    fn men_precede_women_within_a_group() {
        let mut pool = Player::dummy_many(3, Gender::Female, Some(1));
        pool.extend(Player::dummy_many(3, Gender::Male, Some(1)));
        let a = organize_brackets(&pool, 1, GenderFilter::All, Some(1), &cfg()).unwrap();
        let genders: Vec<Gender> = a.groups[0]
            .players
            .iter()
            .map(|id| pool.iter().find(|p| p.id == *id).unwrap().gender)
            .collect();
        assert_eq!(&genders[..3], &[Gender::Male; 3]);
        assert_eq!(&genders[3..], &[Gender::Female; 3]);
    }

    #[test]
    fn filter_leaves_nothing() {
        let pool = Player::dummy_many(4, Gender::Male, None);
        let err = organize_brackets(&pool, 2, GenderFilter::FemaleOnly, Some(1), &cfg()).unwrap_err();
        assert!(matches!(err, CourtsideError::EmptyPool));
        let err = organize_brackets(&[], 2, GenderFilter::All, Some(1), &cfg()).unwrap_err();
        assert!(matches!(err, CourtsideError::EmptyPool));
    }

    #[test]
    fn group_count_bounds() {
        let pool = Player::dummy_many(4, Gender::Male, None);
        let err = organize_brackets(&pool, 0, GenderFilter::All, None, &cfg()).unwrap_err();
        assert!(matches!(err, CourtsideError::InvalidGroupCount { count: 0, .. }));

        let small = BracketConfig { max_group_count: 2 };
        let err = organize_brackets(&pool, 3, GenderFilter::All, None, &small).unwrap_err();
        assert!(matches!(err, CourtsideError::InvalidGroupCount { count: 3, max: 2 }));
    }

    #[test]
    fn more_groups_than_players_leaves_empty_groups() {
        let pool = Player::dummy_many(2, Gender::Male, Some(1));
        let a = organize_brackets(&pool, 4, GenderFilter::All, Some(3), &cfg()).unwrap();
        assert_eq!(a.group_sizes(), vec![1, 1, 0, 0]);
    }

    #[test]
    fn duplicate_pool_entry_rejected() {
        let p = Player::dummy(Gender::Male, None);
        let err = organize_brackets(&[p.clone(), p], 1, GenderFilter::All, None, &cfg()).unwrap_err();
        assert!(matches!(err, CourtsideError::Validation { .. }));
    }

    #[test]
    fn slice_sizes_front_load_remainder() {
        assert_eq!(slice_sizes(10, 3), vec![4, 3, 3]);
        assert_eq!(slice_sizes(2, 3), vec![1, 1, 0]);
        assert_eq!(slice_sizes(9, 3), vec![3, 3, 3]);
        assert!(slice_sizes(5, 0).is_empty());
    }
}
