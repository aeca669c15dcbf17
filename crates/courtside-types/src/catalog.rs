//! Price lookup entities and the serializable catalog snapshot.

use serde::{Deserialize, Serialize};

use crate::{Amount, MenuItemId, Player, RatioPolicy, ShuttleTypeId};

/// A food or drink a player can add to their share of a court bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub price: Amount,
}

impl MenuItem {
    #[must_use]
    pub fn new(name: impl Into<String>, price: Amount) -> Self {
        Self {
            id: MenuItemId::new(),
            name: name.into(),
            price,
        }
    }
}

/// A kind of shuttlecock, priced per unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuttleType {
    pub id: ShuttleTypeId,
    pub name: String,
    pub price: Amount,
}

impl ShuttleType {
    #[must_use]
    pub fn new(name: impl Into<String>, price: Amount) -> Self {
        Self {
            id: ShuttleTypeId::new(),
            name: name.into(),
            price,
        }
    }
}

/// Everything the settlement engines look up, as read from the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSnapshot {
    pub players: Vec<Player>,
    pub menu_items: Vec<MenuItem>,
    pub shuttle_types: Vec<ShuttleType>,
    pub ratio_policies: Vec<RatioPolicy>,
}
