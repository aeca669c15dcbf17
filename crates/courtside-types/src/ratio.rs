//! Ratio policies: named cost-sharing ratios with per-gender defaults.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CourtsideError, Gender, Result};

/// A named ratio value, optionally scoped to one gender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioPolicy {
    pub name: String,
    pub value: Decimal,
    /// `None` applies to any gender.
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub is_default: bool,
}

impl RatioPolicy {
    #[must_use]
    pub fn new(name: impl Into<String>, value: Decimal, gender: Option<Gender>) -> Self {
        Self {
            name: name.into(),
            value,
            gender,
            is_default: false,
        }
    }

    #[must_use]
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}

/// Validated set of ratio policies.
///
/// At most one default exists per gender scope (male, female, unscoped).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatioBook {
    policies: Vec<RatioPolicy>,
}

impl RatioBook {
    pub fn new(policies: Vec<RatioPolicy>) -> Result<Self> {
        for (i, policy) in policies.iter().enumerate() {
            if policy.value < Decimal::ZERO {
                return Err(CourtsideError::invalid(format!(
                    "ratio policy '{}' has negative value {}",
                    policy.name, policy.value
                )));
            }
            if !policy.is_default {
                continue;
            }
            let clash = policies[..i]
                .iter()
                .find(|other| other.is_default && other.gender == policy.gender);
            if let Some(other) = clash {
                let scope = policy
                    .gender
                    .map_or_else(|| "any gender".to_string(), |g| g.to_string());
                return Err(CourtsideError::invalid(format!(
                    "ratio policies '{}' and '{}' are both default for {scope}",
                    other.name, policy.name
                )));
            }
        }
        Ok(Self { policies })
    }

    /// Default ratio for a gender: the gender-scoped default, else the unscoped one.
    #[must_use]
    pub fn default_for(&self, gender: Gender) -> Option<Decimal> {
        let scoped = self
            .policies
            .iter()
            .find(|p| p.is_default && p.gender == Some(gender));
        scoped
            .or_else(|| self.policies.iter().find(|p| p.is_default && p.gender.is_none()))
            .map(|p| p.value)
    }

    #[must_use]
    pub fn policies(&self) -> &[RatioPolicy] {
        &self.policies
    }
}
