//! Configuration types for a Courtside club deployment.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{constants, CourtsideError, Result};

/// Top-level club configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClubConfig {
    /// Display currency for amounts (amounts themselves are minor units).
    pub currency: Currency,
    pub settlement: SettlementConfig,
    pub party: PartyConfig,
    pub brackets: BracketConfig,
}

/// Currency code wrapper so the default can come from [`constants`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(pub String);

impl Default for Currency {
    fn default() -> Self {
        Self(constants::DEFAULT_CURRENCY.to_string())
    }
}

/// Court-bill settlement settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    /// Last-resort ratio when no override, stored ratio, or policy applies.
    pub fallback_ratio: Decimal,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            fallback_ratio: Decimal::new(constants::DEFAULT_FALLBACK_RATIO_UNITS, 0),
        }
    }
}

/// Party-bill settlement settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartyConfig {
    /// Ratio of a participant whose draft ratio is unset.
    pub default_ratio: Decimal,
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self {
            default_ratio: Decimal::new(constants::DEFAULT_PARTY_RATIO_UNITS, 0),
        }
    }
}

/// Bracket organizer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BracketConfig {
    pub max_group_count: u32,
}

impl Default for BracketConfig {
    fn default() -> Self {
        Self {
            max_group_count: constants::DEFAULT_MAX_GROUP_COUNT,
        }
    }
}

impl ClubConfig {
    /// Parse and validate a JSON config document. Missing sections take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CourtsideError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.currency.0.trim().is_empty() {
            return Err(CourtsideError::Configuration(
                "currency must not be empty".to_string(),
            ));
        }
        if self.settlement.fallback_ratio < Decimal::ZERO {
            return Err(CourtsideError::Configuration(format!(
                "settlement.fallback_ratio must be non-negative, got {}",
                self.settlement.fallback_ratio
            )));
        }
        if self.party.default_ratio < Decimal::ZERO {
            return Err(CourtsideError::Configuration(format!(
                "party.default_ratio must be non-negative, got {}",
                self.party.default_ratio
            )));
        }
        if self.brackets.max_group_count == 0 {
            return Err(CourtsideError::Configuration(
                "brackets.max_group_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
