//! Identifiers used throughout Courtside.
//!
//! Every entity id is a UUIDv7 newtype, so ids sort by creation time and
//! serialize as plain UUID strings.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            #[must_use]
            pub fn from_bytes(bytes: [u8; 16]) -> Self {
                Self(Uuid::from_bytes(bytes))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

entity_id!(
    /// A club player, as referenced by bills, debts and bracket pools.
    PlayerId,
    "player"
);

entity_id!(
    /// An authenticated account (bill creator, payment marker).
    UserId,
    "user"
);

// ---------------------------------------------------------------------------
// Price lookups
// ---------------------------------------------------------------------------

entity_id!(
    /// A food / drink menu entry.
    MenuItemId,
    "menu"
);

entity_id!(
    /// A shuttlecock type with a unit price.
    ShuttleTypeId,
    "shuttle"
);

// ---------------------------------------------------------------------------
// Bills and debts
// ---------------------------------------------------------------------------

entity_id!(
    /// A committed court bill.
    BillId,
    "bill"
);

entity_id!(
    /// A committed party bill.
    PartyBillId,
    "party"
);

entity_id!(
    /// A single carried debt entry.
    DebtId,
    "debt"
);

// ---------------------------------------------------------------------------
// Brackets
// ---------------------------------------------------------------------------

entity_id!(
    /// A player list that brackets are organized from.
    PoolId,
    "pool"
);
