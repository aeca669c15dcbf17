//! # courtside-types
//!
//! Shared types, errors, and configuration for the **Courtside** club engines.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`PlayerId`], [`UserId`], [`MenuItemId`], [`ShuttleTypeId`], [`BillId`], [`PartyBillId`], [`DebtId`], [`PoolId`]
//! - **Roster**: [`Player`], [`Gender`], [`RatioPolicy`], [`RatioBook`]
//! - **Price lookups**: [`MenuItem`], [`ShuttleType`], [`CatalogSnapshot`]
//! - **Court bills**: [`BillDraft`], [`ParticipantDraft`], [`SettlementResult`], [`ParticipantShare`]
//! - **Party bills**: [`PartyBillDraft`], [`PartyParticipantDraft`], [`PartySettlementResult`]
//! - **Debts**: [`Debt`], [`CarriedDebt`]
//! - **Brackets**: [`GenderFilter`], [`BracketGroup`], [`BracketAssignment`]
//! - **Access**: [`Permission`], [`Role`], [`Caller`]
//! - **Money**: [`Amount`] and half-away-from-zero rounding
//! - **Configuration**: [`ClubConfig`]
//! - **Errors**: [`CourtsideError`] with `CS_ERR_` prefix codes

pub mod access;
pub mod bill;
pub mod bracket;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod debt;
pub mod error;
pub mod ids;
pub mod money;
pub mod party;
pub mod player;
pub mod ratio;

pub use access::*;
pub use bill::*;
pub use bracket::*;
pub use catalog::*;
pub use config::*;
pub use debt::*;
pub use error::*;
pub use ids::*;
pub use money::*;
pub use party::*;
pub use player::*;
pub use ratio::*;

// Constants are accessed via `courtside_types::constants::FOO`
// (not re-exported to avoid name collisions).
