//! Carried debts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Amount, BillId, DebtId, PlayerId};

/// Money a player still owes from an earlier session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debt {
    pub id: DebtId,
    pub player_id: PlayerId,
    pub amount: Amount,
    pub date: NaiveDate,
    pub resolved: bool,
    /// Bill that absorbed this debt, once resolved by carry-forward.
    #[serde(default)]
    pub resolved_by: Option<BillId>,
}

impl Debt {
    #[must_use]
    pub fn new(player_id: PlayerId, amount: Amount, date: NaiveDate) -> Self {
        Self {
            id: DebtId::new(),
            player_id,
            amount,
            date,
            resolved: false,
            resolved_by: None,
        }
    }
}

/// The `(amount, date)` pair a bill draft carries for one participant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarriedDebt {
    pub amount: Amount,
    pub latest_date: Option<NaiveDate>,
}

impl CarriedDebt {
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }
}
