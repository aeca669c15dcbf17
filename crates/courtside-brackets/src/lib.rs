//! # courtside-brackets
//!
//! **Seeded, level-balanced bracket organizer.**
//!
//! - **Balanced**: every `(gender, level)` bucket is spread evenly, group
//!   sizes within a bucket differ by at most one
//! - **Reproducible**: the seed is recorded on every group; replaying it over
//!   the same pool yields the same assignment
//! - **Exclusive**: a player lands in exactly one group per run, and
//!   [`unassigned_players`] keeps later runs from reusing anyone
//!
//! ```text
//! pool -> filter -> buckets (male, level asc, no_level last)
//!      -> seeded shuffle per bucket -> deal -> groups 1..=N
//! ```

pub mod bucket;
pub mod exclusion;
pub mod organizer;
pub mod rng;

pub use bucket::{BucketKey, LevelKey, partition};
pub use exclusion::unassigned_players;
pub use organizer::{organize_brackets, slice_sizes};
pub use rng::ShuffleRng;
