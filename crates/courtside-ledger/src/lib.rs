//! # courtside-ledger
//!
//! **In-memory persistence collaborator for the Courtside engines.**
//!
//! The engines are pure; this crate is where their results become records.
//!
//! - **Authoritative recompute**: a committed bill is always re-run through
//!   the engine and the conservation check, never taken from a client preview
//! - **All-or-nothing writes**: permission, lookups and computation finish
//!   before any state changes
//! - **Debt carry-forward**: open debts of a participant are resolved by the
//!   bill that charges them
//! - **Bracket pools**: repeated organize runs only place unassigned players

pub mod debts;
pub mod ledger;
pub mod pools;
pub mod records;

pub use debts::DebtBook;
pub use ledger::ClubLedger;
pub use pools::PlayerPool;
pub use records::{BillRecord, ParticipantRow, PartyBillRecord, PartyParticipantRow, User};
