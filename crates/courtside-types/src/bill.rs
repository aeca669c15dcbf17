//! Court bill drafts and settlement results.
//!
//! A [`BillDraft`] is what a client submits (for live preview or for commit).
//! A [`SettlementResult`] is what the settlement engine derives from it; the
//! persistence layer writes one row per shuttle line, participant and
//! participant menu line straight from the result.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Amount, MenuItemId, PlayerId, ShuttleTypeId};

/// One shuttlecock purchase on the bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuttleLine {
    pub shuttle_type_id: ShuttleTypeId,
    pub quantity: i64,
}

/// One menu purchase by a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuLine {
    pub menu_item_id: MenuItemId,
    pub quantity: i64,
}

/// A player taking part in a court session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantDraft {
    pub player_id: PlayerId,
    /// Explicit ratio; `None` falls back to the player's stored ratio or policy.
    #[serde(default)]
    pub ratio: Option<Decimal>,
    #[serde(default)]
    pub menu: Vec<MenuLine>,
    /// Unresolved debt carried into this bill.
    #[serde(default)]
    pub debt_amount: Amount,
    /// Date of the latest carried debt (informational).
    #[serde(default)]
    pub debt_date: Option<NaiveDate>,
}

impl ParticipantDraft {
    #[must_use]
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            ratio: None,
            menu: Vec::new(),
            debt_amount: 0,
            debt_date: None,
        }
    }

    #[must_use]
    pub fn with_ratio(mut self, ratio: Decimal) -> Self {
        self.ratio = Some(ratio);
        self
    }

    #[must_use]
    pub fn with_menu(mut self, menu_item_id: MenuItemId, quantity: i64) -> Self {
        self.menu.push(MenuLine {
            menu_item_id,
            quantity,
        });
        self
    }

    #[must_use]
    pub fn with_debt(mut self, amount: Amount, date: Option<NaiveDate>) -> Self {
        self.debt_amount = amount;
        self.debt_date = date;
        self
    }
}

/// Input to the court-bill settlement engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillDraft {
    pub date: NaiveDate,
    pub court_total: Amount,
    #[serde(default)]
    pub shuttles: Vec<ShuttleLine>,
    pub participants: Vec<ParticipantDraft>,
}

/// A priced shuttle line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuttleCharge {
    pub shuttle_type_id: ShuttleTypeId,
    pub unit_price: Amount,
    pub quantity: i64,
    pub subtotal: Amount,
}

/// A priced participant menu line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCharge {
    pub menu_item_id: MenuItemId,
    pub unit_price: Amount,
    pub quantity: i64,
    pub subtotal: Amount,
}

/// What one participant owes on a court bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantShare {
    pub player_id: PlayerId,
    /// Effective ratio after fallback resolution.
    pub ratio: Decimal,
    pub share_amount: Amount,
    pub menu: Vec<MenuCharge>,
    pub menu_extra_total: Amount,
    pub debt_amount: Amount,
    pub debt_date: Option<NaiveDate>,
    /// `share_amount + menu_extra_total + debt_amount`.
    pub total_amount: Amount,
}

/// Output of the court-bill settlement engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementResult {
    pub date: NaiveDate,
    pub court_total: Amount,
    pub shuttles: Vec<ShuttleCharge>,
    pub total_shuttle_price: Amount,
    /// `court_total + total_shuttle_price`.
    pub grand_total: Amount,
    pub sum_ratios: Decimal,
    /// `grand_total / sum_ratios`, unrounded; zero when `sum_ratios` is zero.
    pub unit_price: Decimal,
    pub participants: Vec<ParticipantShare>,
    /// `grand_total - Σ share_amount`. Reported, never redistributed.
    pub rounding_difference: Amount,
}

impl SettlementResult {
    #[must_use]
    pub fn share_of(&self, player_id: PlayerId) -> Option<&ParticipantShare> {
        self.participants.iter().find(|p| p.player_id == player_id)
    }

    /// Sum of what every participant owes, extras and debts included.
    #[must_use]
    pub fn amount_due(&self) -> Amount {
        self.participants
            .iter()
            .map(|p| p.total_amount)
            .fold(0, Amount::saturating_add)
    }
}
