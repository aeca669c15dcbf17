//! Club roster model.
//!
//! Players are created by roster management and only ever read by the
//! settlement engines and the bracket organizer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::PlayerId;

/// Player gender. Declaration order is the bracket bucket order (male first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

/// A club member who can play, pay, and be seeded into brackets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub gender: Gender,
    /// Skill level; only used as a grouping key.
    #[serde(default)]
    pub level: Option<u32>,
    /// Stored cost-sharing ratio, preferred over ratio policies.
    #[serde(default)]
    pub default_ratio: Option<Decimal>,
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: PlayerId::new(),
            name: name.into(),
            gender,
            level: None,
            default_ratio: None,
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_default_ratio(mut self, ratio: Decimal) -> Self {
        self.default_ratio = Some(ratio);
        self
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Player {
    pub fn dummy(gender: Gender, level: Option<u32>) -> Self {
        Self {
            id: PlayerId::new(),
            name: format!("{gender}-{}", level.map_or_else(|| "x".to_string(), |l| l.to_string())),
            gender,
            level,
            default_ratio: None,
        }
    }

    pub fn dummy_many(count: usize, gender: Gender, level: Option<u32>) -> Vec<Self> {
        (0..count).map(|_| Self::dummy(gender, level)).collect()
    }
}
