//! Carried-debt book.
//!
//! The [`DebtBook`] holds every recorded debt. A player's *current debt* is
//! the sum of their unresolved debts; that number, with the latest unresolved
//! date, is what a bill draft carries forward. Lifecycle of one debt:
//! 1. `record` → unresolved
//! 2. `resolve` (manual) or `resolve_carried` (absorbed by a committed bill)

use std::collections::BTreeMap;

use chrono::NaiveDate;
use courtside_types::{
    Amount, BillId, CarriedDebt, CourtsideError, Debt, DebtId, PlayerId, Result, sum_amounts,
};

#[derive(Debug, Default, Clone)]
pub struct DebtBook {
    debts: BTreeMap<DebtId, Debt>,
}

impl DebtBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new unresolved debt.
    ///
    /// # Errors
    /// `Validation` if the amount is not positive.
    pub fn record(&mut self, player_id: PlayerId, amount: Amount, date: NaiveDate) -> Result<DebtId> {
        if amount <= 0 {
            return Err(CourtsideError::invalid(format!(
                "debt amount must be positive, got {amount}"
            )));
        }
        let debt = Debt::new(player_id, amount, date);
        let id = debt.id;
        self.debts.insert(id, debt);
        Ok(id)
    }

    /// Mark one debt settled by hand.
    ///
    /// # Errors
    /// `DebtNotFound` for an unknown id, `StateConflict` if already resolved.
    pub fn resolve(&mut self, debt_id: DebtId) -> Result<()> {
        let debt = self
            .debts
            .get_mut(&debt_id)
            .ok_or(CourtsideError::DebtNotFound(debt_id))?;
        if debt.resolved {
            return Err(CourtsideError::conflict(format!("debt {debt_id} is already resolved")));
        }
        debt.resolved = true;
        Ok(())
    }

    /// Unresolved debts of `player_id` that a committed bill would absorb.
    #[must_use]
    pub fn open_debts(&self, player_id: PlayerId) -> Vec<DebtId> {
        self.unresolved(player_id).map(|d| d.id).collect()
    }

    /// Mark every debt in `ids` as absorbed by `bill`. Ids come from
    /// [`Self::open_debts`], so nothing here can fail.
    pub fn resolve_carried(&mut self, ids: &[DebtId], bill: BillId) {
        for id in ids {
            if let Some(debt) = self.debts.get_mut(id) {
                debt.resolved = true;
                debt.resolved_by = Some(bill);
            }
        }
    }

    /// Sum of unresolved debts.
    pub fn current_debt(&self, player_id: PlayerId) -> Result<Amount> {
        sum_amounts(self.unresolved(player_id).map(|d| d.amount), "current debt")
    }

    #[must_use]
    pub fn latest_debt_date(&self, player_id: PlayerId) -> Option<NaiveDate> {
        self.unresolved(player_id).map(|d| d.date).max()
    }

    /// The `(amount, date)` pair a bill draft consumes for `player_id`.
    pub fn carried(&self, player_id: PlayerId) -> Result<CarriedDebt> {
        Ok(CarriedDebt {
            amount: self.current_debt(player_id)?,
            latest_date: self.latest_debt_date(player_id),
        })
    }

    #[must_use]
    pub fn get(&self, debt_id: DebtId) -> Option<&Debt> {
        self.debts.get(&debt_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Debt> {
        self.debts.values()
    }

    fn unresolved(&self, player_id: PlayerId) -> impl Iterator<Item = &Debt> {
        self.debts
            .values()
            .filter(move |d| d.player_id == player_id && !d.resolved)
    }
}
