//! The club ledger.
//!
//! Every write follows the same order:
//! 1. Check the caller's permission
//! 2. Resolve and validate everything the write touches
//! 3. Run the engine and the conservation check
//! 4. Mutate
//!
//! Steps 1-3 never touch state, so a failing write leaves the ledger exactly
//! as it was.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, Utc};
use courtside_brackets::{organize_brackets, unassigned_players};
use courtside_settlement::{
    Catalog, ClubCatalog, compute_party_settlement, compute_settlement, verify_bill_totals,
    verify_party_totals,
};
use courtside_types::{
    Amount, BillDraft, BillId, BracketAssignment, Caller, CarriedDebt, ClubConfig,
    CourtsideError, DebtId, GenderFilter, PartyBillDraft, PartyBillId, PartySettlementResult,
    Permission, Player, PlayerId, PoolId, Result, SettlementResult, UserId, sum_amounts,
};

use crate::debts::DebtBook;
use crate::pools::PlayerPool;
use crate::records::{BillRecord, PartyBillRecord, User};

#[derive(Debug, Default)]
pub struct ClubLedger {
    config: ClubConfig,
    catalog: ClubCatalog,
    users: BTreeMap<UserId, User>,
    bills: BTreeMap<BillId, BillRecord>,
    party_bills: BTreeMap<PartyBillId, PartyBillRecord>,
    debts: DebtBook,
    pools: BTreeMap<PoolId, PlayerPool>,
}

impl ClubLedger {
    #[must_use]
    pub fn new(config: ClubConfig, catalog: ClubCatalog) -> Self {
        Self {
            config,
            catalog,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &ClubConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &ClubCatalog {
        &self.catalog
    }

    /// Roster and price management goes straight to the catalog.
    pub fn catalog_mut(&mut self) -> &mut ClubCatalog {
        &mut self.catalog
    }

    pub fn register_user(&mut self, name: impl Into<String>) -> UserId {
        let user = User {
            id: UserId::new(),
            name: name.into(),
        };
        let id = user.id;
        tracing::debug!(user = %id, name = %user.name, "User registered");
        self.users.insert(id, user);
        id
    }

    #[must_use]
    pub fn user(&self, user_id: UserId) -> Option<&User> {
        self.users.get(&user_id)
    }

    /// `created_by` when given, the caller otherwise. Either way it must be
    /// a registered user.
    fn resolve_creator(&self, caller: &Caller, created_by: Option<UserId>) -> Result<UserId> {
        let creator = created_by.unwrap_or(caller.user_id);
        if self.users.contains_key(&creator) {
            Ok(creator)
        } else {
            Err(CourtsideError::UserNotFound(creator))
        }
    }

    // =================================================================
    // Court bills
    // =================================================================

    /// Run the engine without writing anything.
    pub fn preview_bill(&self, draft: &BillDraft) -> Result<SettlementResult> {
        compute_settlement(draft, &self.catalog, &self.config.settlement)
    }

    /// Fill every participant's carried debt from the debt book.
    pub fn with_carried_debts(&self, mut draft: BillDraft) -> Result<BillDraft> {
        for p in &mut draft.participants {
            let carried = self.debts.carried(p.player_id)?;
            p.debt_amount = carried.amount;
            p.debt_date = carried.latest_date;
        }
        Ok(draft)
    }

    /// Recompute and store a court bill.
    ///
    /// Participants carrying a debt have their open debts resolved by this
    /// bill in the same write. The carried amount must equal what the debt
    /// book holds for them.
    ///
    /// # Errors
    /// - `PermissionDenied` without `ManageBills`
    /// - `UserNotFound` if the creator is not registered
    /// - `StateConflict` when a carried debt differs from the debt book
    /// - any engine error (`Validation`, `*NotFound`, `AmountOverflow`)
    pub fn commit_bill(
        &mut self,
        caller: &Caller,
        created_by: Option<UserId>,
        draft: &BillDraft,
    ) -> Result<BillId> {
        caller.require(Permission::ManageBills)?;
        let creator = self.resolve_creator(caller, created_by)?;
        let result = self.preview_bill(draft)?;
        verify_bill_totals(&result)?;

        for p in result.participants.iter().filter(|p| p.debt_amount > 0) {
            let owed = self.debts.current_debt(p.player_id)?;
            if p.debt_amount != owed {
                tracing::warn!(
                    player = %p.player_id,
                    charged = p.debt_amount,
                    owed,
                    "Carried debt out of date"
                );
                return Err(CourtsideError::conflict(format!(
                    "{} is charged {} of debt but owes {owed}",
                    p.player_id, p.debt_amount
                )));
            }
        }
        let absorbed: Vec<DebtId> = result
            .participants
            .iter()
            .filter(|p| p.debt_amount > 0)
            .flat_map(|p| self.debts.open_debts(p.player_id))
            .collect();

        let id = BillId::new();
        let record = BillRecord::from_settlement(id, creator, Utc::now(), result);
        tracing::info!(
            bill = %id,
            date = %record.date,
            created_by = %creator,
            participants = record.participants.len(),
            grand_total = record.grand_total,
            rounding_difference = record.rounding_difference,
            debts_absorbed = absorbed.len(),
            "Bill committed"
        );
        self.bills.insert(id, record);
        self.debts.resolve_carried(&absorbed, id);
        Ok(id)
    }

    #[must_use]
    pub fn bill(&self, bill_id: BillId) -> Option<&BillRecord> {
        self.bills.get(&bill_id)
    }

    pub fn bills(&self) -> impl Iterator<Item = &BillRecord> {
        self.bills.values()
    }

    /// # Errors
    /// `BillNotFound`, or `StateConflict` when the player is not on the bill
    /// or has already paid.
    pub fn mark_bill_participant_paid(
        &mut self,
        caller: &Caller,
        bill_id: BillId,
        player_id: PlayerId,
    ) -> Result<()> {
        caller.require(Permission::MarkPayments)?;
        let bill = self
            .bills
            .get_mut(&bill_id)
            .ok_or(CourtsideError::BillNotFound(bill_id))?;
        let row = bill
            .participants
            .iter_mut()
            .find(|p| p.player_id == player_id)
            .ok_or_else(|| {
                CourtsideError::conflict(format!("{player_id} is not a participant of {bill_id}"))
            })?;
        if row.paid {
            return Err(CourtsideError::conflict(format!(
                "{player_id} already paid {bill_id}"
            )));
        }
        row.paid = true;
        tracing::info!(bill = %bill_id, player = %player_id, amount = row.total_amount, "Payment marked");
        Ok(())
    }

    // =================================================================
    // Party bills
    // =================================================================

    pub fn preview_party_bill(&self, draft: &PartyBillDraft) -> Result<PartySettlementResult> {
        for player_id in draft.participants.iter().filter_map(|p| p.player_id) {
            if self.catalog.player(player_id).is_none() {
                return Err(CourtsideError::PlayerNotFound(player_id));
            }
        }
        compute_party_settlement(draft, &self.config.party)
    }

    /// # Errors
    /// - `PermissionDenied` without `ManagePartyBills`
    /// - `UserNotFound` if the creator is not registered
    /// - `PlayerNotFound` for a linked player missing from the roster
    /// - any engine error
    pub fn commit_party_bill(
        &mut self,
        caller: &Caller,
        created_by: Option<UserId>,
        draft: &PartyBillDraft,
    ) -> Result<PartyBillId> {
        caller.require(Permission::ManagePartyBills)?;
        let creator = self.resolve_creator(caller, created_by)?;
        let result = self.preview_party_bill(draft)?;
        verify_party_totals(&result)?;

        let id = PartyBillId::new();
        let record = PartyBillRecord::from_settlement(id, creator, Utc::now(), result);
        tracing::info!(
            party_bill = %id,
            date = %record.date,
            created_by = %creator,
            guests = record.participants.len(),
            grand_total = record.grand_total,
            "Party bill committed"
        );
        self.party_bills.insert(id, record);
        Ok(id)
    }

    #[must_use]
    pub fn party_bill(&self, bill_id: PartyBillId) -> Option<&PartyBillRecord> {
        self.party_bills.get(&bill_id)
    }

    /// Party guests may have no linked player, so they are addressed by
    /// their position on the bill.
    pub fn mark_party_participant_paid(
        &mut self,
        caller: &Caller,
        bill_id: PartyBillId,
        index: usize,
    ) -> Result<()> {
        caller.require(Permission::MarkPayments)?;
        let bill = self
            .party_bills
            .get_mut(&bill_id)
            .ok_or(CourtsideError::PartyBillNotFound(bill_id))?;
        let row = bill.participants.get_mut(index).ok_or_else(|| {
            CourtsideError::conflict(format!("{bill_id} has no participant #{index}"))
        })?;
        if row.paid {
            return Err(CourtsideError::conflict(format!(
                "'{}' already paid {bill_id}",
                row.name
            )));
        }
        row.paid = true;
        tracing::info!(party_bill = %bill_id, guest = %row.name, amount = row.total_amount, "Party payment marked");
        Ok(())
    }

    /// What `player_id` still owes from party bills dated strictly before
    /// `date`: the sum of their unpaid, positive totals. Unlinked guests owe 0.
    pub fn party_debt_before(&self, player_id: Option<PlayerId>, date: NaiveDate) -> Result<Amount> {
        let Some(player_id) = player_id else {
            return Ok(0);
        };
        let owed = self
            .party_bills
            .values()
            .filter(|b| b.date < date)
            .flat_map(|b| &b.participants)
            .filter(|p| p.player_id == Some(player_id) && !p.paid && p.total_amount > 0)
            .map(|p| p.total_amount);
        sum_amounts(owed, "party debt")
    }

    // =================================================================
    // Debts
    // =================================================================

    pub fn record_debt(
        &mut self,
        caller: &Caller,
        player_id: PlayerId,
        amount: Amount,
        date: NaiveDate,
    ) -> Result<DebtId> {
        caller.require(Permission::ManageDebts)?;
        if self.catalog.player(player_id).is_none() {
            return Err(CourtsideError::PlayerNotFound(player_id));
        }
        let id = self.debts.record(player_id, amount, date)?;
        tracing::info!(debt = %id, player = %player_id, amount, %date, "Debt recorded");
        Ok(id)
    }

    pub fn resolve_debt(&mut self, caller: &Caller, debt_id: DebtId) -> Result<()> {
        caller.require(Permission::ManageDebts)?;
        self.debts.resolve(debt_id)?;
        tracing::info!(debt = %debt_id, "Debt resolved");
        Ok(())
    }

    pub fn current_debt(&self, player_id: PlayerId) -> Result<Amount> {
        self.debts.current_debt(player_id)
    }

    #[must_use]
    pub fn latest_debt_date(&self, player_id: PlayerId) -> Option<NaiveDate> {
        self.debts.latest_debt_date(player_id)
    }

    pub fn carried_debt(&self, player_id: PlayerId) -> Result<CarriedDebt> {
        self.debts.carried(player_id)
    }

    #[must_use]
    pub fn debts(&self) -> &DebtBook {
        &self.debts
    }

    // =================================================================
    // Bracket pools
    // =================================================================

    /// # Errors
    /// `PlayerNotFound` for an unknown player, `Validation` for a player
    /// listed twice.
    pub fn create_pool(
        &mut self,
        caller: &Caller,
        name: impl Into<String>,
        players: Vec<PlayerId>,
    ) -> Result<PoolId> {
        caller.require(Permission::OrganizeBrackets)?;
        let mut seen = BTreeSet::new();
        for &player_id in &players {
            if self.catalog.player(player_id).is_none() {
                return Err(CourtsideError::PlayerNotFound(player_id));
            }
            if !seen.insert(player_id) {
                return Err(CourtsideError::invalid(format!(
                    "player {player_id} listed twice in the pool"
                )));
            }
        }
        let pool = PlayerPool::new(name, players, Utc::now());
        let id = pool.id;
        tracing::info!(pool = %id, name = %pool.name, players = pool.players.len(), "Pool created");
        self.pools.insert(id, pool);
        Ok(id)
    }

    /// Organize the players of a pool that no earlier run has placed.
    ///
    /// # Errors
    /// - `PoolNotFound`
    /// - `InvalidGroupCount` outside `1..=max_group_count`
    /// - `EmptyPool` when every eligible player is already assigned
    pub fn organize_pool(
        &mut self,
        caller: &Caller,
        pool_id: PoolId,
        group_count: u32,
        filter: GenderFilter,
        seed: Option<u64>,
    ) -> Result<BracketAssignment> {
        caller.require(Permission::OrganizeBrackets)?;
        let pool = self
            .pools
            .get(&pool_id)
            .ok_or(CourtsideError::PoolNotFound(pool_id))?;
        let roster = pool
            .players
            .iter()
            .map(|&id| {
                self.catalog
                    .player(id)
                    .cloned()
                    .ok_or(CourtsideError::PlayerNotFound(id))
            })
            .collect::<Result<Vec<Player>>>()?;
        let eligible = unassigned_players(&roster, &pool.assignments);
        tracing::debug!(
            pool = %pool_id,
            roster = roster.len(),
            eligible = eligible.len(),
            "Organizing pool"
        );

        let assignment =
            organize_brackets(&eligible, group_count, filter, seed, &self.config.brackets)?;

        let pool = self
            .pools
            .get_mut(&pool_id)
            .ok_or(CourtsideError::PoolNotFound(pool_id))?;
        pool.assignments.push(assignment.clone());
        Ok(assignment)
    }

    #[must_use]
    pub fn pool(&self, pool_id: PoolId) -> Option<&PlayerPool> {
        self.pools.get(&pool_id)
    }

    pub fn pool_assignments(&self, pool_id: PoolId) -> Result<&[BracketAssignment]> {
        self.pools
            .get(&pool_id)
            .map(|p| p.assignments.as_slice())
            .ok_or(CourtsideError::PoolNotFound(pool_id))
    }

    /// Drop every assignment so the whole pool is eligible again.
    pub fn reset_pool(&mut self, caller: &Caller, pool_id: PoolId) -> Result<()> {
        caller.require(Permission::OrganizeBrackets)?;
        let pool = self
            .pools
            .get_mut(&pool_id)
            .ok_or(CourtsideError::PoolNotFound(pool_id))?;
        let dropped = pool.assignments.len();
        pool.assignments.clear();
        tracing::info!(pool = %pool_id, dropped, "Pool reset");
        Ok(())
    }
}
