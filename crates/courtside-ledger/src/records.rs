//! Committed rows.
//!
//! A committed bill is stored as one header plus one row per shuttle line,
//! participant and menu line, all derived 1:1 from the settlement result.
//! Payment flags are the only fields that change after commit.

use chrono::{DateTime, NaiveDate, Utc};
use courtside_types::{
    Amount, BillId, ExtraCost, MenuCharge, PartyBillId, PartySettlementResult, PlayerId,
    SettlementResult, ShuttleCharge, UserId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A registered account that can create bills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Court bills
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRow {
    pub player_id: PlayerId,
    pub ratio: Decimal,
    pub share_amount: Amount,
    pub menu: Vec<MenuCharge>,
    pub menu_extra_total: Amount,
    pub debt_amount: Amount,
    pub debt_date: Option<NaiveDate>,
    pub total_amount: Amount,
    pub paid: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillRecord {
    pub id: BillId,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub date: NaiveDate,
    pub court_total: Amount,
    pub shuttles: Vec<ShuttleCharge>,
    pub total_shuttle_price: Amount,
    pub grand_total: Amount,
    pub sum_ratios: Decimal,
    pub unit_price: Decimal,
    pub rounding_difference: Amount,
    pub participants: Vec<ParticipantRow>,
}

impl BillRecord {
    #[must_use]
    pub fn from_settlement(
        id: BillId,
        created_by: UserId,
        created_at: DateTime<Utc>,
        result: SettlementResult,
    ) -> Self {
        let participants = result
            .participants
            .into_iter()
            .map(|p| ParticipantRow {
                player_id: p.player_id,
                ratio: p.ratio,
                share_amount: p.share_amount,
                menu: p.menu,
                menu_extra_total: p.menu_extra_total,
                debt_amount: p.debt_amount,
                debt_date: p.debt_date,
                total_amount: p.total_amount,
                paid: false,
            })
            .collect();
        Self {
            id,
            created_by,
            created_at,
            date: result.date,
            court_total: result.court_total,
            shuttles: result.shuttles,
            total_shuttle_price: result.total_shuttle_price,
            grand_total: result.grand_total,
            sum_ratios: result.sum_ratios,
            unit_price: result.unit_price,
            rounding_difference: result.rounding_difference,
            participants,
        }
    }

    #[must_use]
    pub fn participant(&self, player_id: PlayerId) -> Option<&ParticipantRow> {
        self.participants.iter().find(|p| p.player_id == player_id)
    }

    /// Sum of `total_amount` over participants not yet marked paid.
    #[must_use]
    pub fn outstanding(&self) -> Amount {
        self.participants
            .iter()
            .filter(|p| !p.paid)
            .map(|p| p.total_amount)
            .fold(0, Amount::saturating_add)
    }
}

// ---------------------------------------------------------------------------
// Party bills
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyParticipantRow {
    pub name: String,
    pub player_id: Option<PlayerId>,
    pub ratio: Decimal,
    pub share_amount: Amount,
    pub food_amount: Amount,
    pub paid_amount: Amount,
    pub total_amount: Amount,
    pub note: Option<String>,
    pub paid: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyBillRecord {
    pub id: PartyBillId,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub date: NaiveDate,
    pub base_amount: Amount,
    pub extras: Vec<ExtraCost>,
    pub total_extra: Amount,
    pub grand_total: Amount,
    pub sum_ratios: Decimal,
    pub unit_price: Amount,
    pub rounding_difference: Amount,
    pub participants: Vec<PartyParticipantRow>,
}

impl PartyBillRecord {
    #[must_use]
    pub fn from_settlement(
        id: PartyBillId,
        created_by: UserId,
        created_at: DateTime<Utc>,
        result: PartySettlementResult,
    ) -> Self {
        let participants = result
            .participants
            .into_iter()
            .map(|p| PartyParticipantRow {
                name: p.name,
                player_id: p.player_id,
                ratio: p.ratio,
                share_amount: p.share_amount,
                food_amount: p.food_amount,
                paid_amount: p.paid_amount,
                total_amount: p.total_amount,
                note: p.note,
                paid: false,
            })
            .collect();
        Self {
            id,
            created_by,
            created_at,
            date: result.date,
            base_amount: result.base_amount,
            extras: result.extras,
            total_extra: result.total_extra,
            grand_total: result.grand_total,
            sum_ratios: result.sum_ratios,
            unit_price: result.unit_price,
            rounding_difference: result.rounding_difference,
            participants,
        }
    }
}
