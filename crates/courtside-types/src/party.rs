//! Party bill drafts and results.
//!
//! Party bills split a base amount plus named extras by ratio, then adjust
//! each participant by what they ate and what they already paid.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Amount, PlayerId};

/// A named cost added on top of the base amount (venue, cake, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraCost {
    pub name: String,
    pub amount: Amount,
}

/// A party guest. Guests need not be club players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyParticipantDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub player_id: Option<PlayerId>,
    #[serde(default)]
    pub ratio: Option<Decimal>,
    /// Money already contributed; reduces what is owed.
    #[serde(default)]
    pub paid_amount: Amount,
    #[serde(default)]
    pub food_amount: Amount,
    #[serde(default)]
    pub note: Option<String>,
}

impl PartyParticipantDraft {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            player_id: None,
            ratio: None,
            paid_amount: 0,
            food_amount: 0,
            note: None,
        }
    }

    #[must_use]
    pub fn for_player(mut self, player_id: PlayerId) -> Self {
        self.player_id = Some(player_id);
        self
    }

    #[must_use]
    pub fn with_ratio(mut self, ratio: Decimal) -> Self {
        self.ratio = Some(ratio);
        self
    }

    #[must_use]
    pub fn with_paid(mut self, amount: Amount) -> Self {
        self.paid_amount = amount;
        self
    }

    #[must_use]
    pub fn with_food(mut self, amount: Amount) -> Self {
        self.food_amount = amount;
        self
    }
}

/// Input to the party settlement engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyBillDraft {
    pub date: NaiveDate,
    pub base_amount: Amount,
    #[serde(default)]
    pub extras: Vec<ExtraCost>,
    pub participants: Vec<PartyParticipantDraft>,
}

/// What one guest owes (or is owed, when negative).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyShare {
    pub name: String,
    pub player_id: Option<PlayerId>,
    pub ratio: Decimal,
    pub share_amount: Amount,
    pub food_amount: Amount,
    pub paid_amount: Amount,
    /// `share_amount + food_amount - paid_amount`.
    pub total_amount: Amount,
    pub note: Option<String>,
}

/// Output of the party settlement engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartySettlementResult {
    pub date: NaiveDate,
    pub base_amount: Amount,
    pub extras: Vec<ExtraCost>,
    pub total_extra: Amount,
    pub grand_total: Amount,
    pub sum_ratios: Decimal,
    /// Rounded `grand_total / sum_ratios`; zero when `sum_ratios` is zero.
    pub unit_price: Amount,
    pub participants: Vec<PartyShare>,
    /// `grand_total - Σ share_amount`.
    pub rounding_difference: Amount,
}
