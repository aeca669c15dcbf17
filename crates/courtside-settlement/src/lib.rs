//! # courtside-settlement
//!
//! **Pure settlement engines for court bills and party bills.**
//!
//! - **Zero side effects**: no store writes, no clock, no session state
//! - **Deterministic output**: same draft + same catalog -> same result
//! - **Fail fast**: every lookup and validation runs before any arithmetic
//! - **Remainder reported**: rounding leftovers are returned as data, never
//!   silently absorbed
//!
//! ```text
//! compute_settlement(BillDraft, Catalog)        -> SettlementResult
//! compute_party_settlement(PartyBillDraft)      -> PartySettlementResult
//! verify_bill_totals / verify_party_totals      -> conservation check
//! ```

pub mod catalog;
pub mod conservation;
pub mod court;
pub mod party;
pub mod ratio;

pub use catalog::{Catalog, ClubCatalog};
pub use conservation::{verify_bill_totals, verify_party_totals};
pub use court::compute_settlement;
pub use party::compute_party_settlement;
pub use ratio::{RatioSource, resolve_ratio};
