//! Lookup seam between the settlement engines and the persistence layer.
//!
//! The engines only need to resolve ids to prices, players, and ratio
//! policies. [`Catalog`] is that contract; [`ClubCatalog`] is the in-memory
//! implementation built from a [`CatalogSnapshot`].

use std::collections::BTreeMap;

use courtside_types::{
    CatalogSnapshot, CourtsideError, MenuItem, MenuItemId, Player, PlayerId, RatioBook, Result,
    ShuttleType, ShuttleTypeId,
};
use rust_decimal::Decimal;

/// Read-only lookups consumed by the settlement engines.
pub trait Catalog {
    fn player(&self, id: PlayerId) -> Option<&Player>;
    fn menu_item(&self, id: MenuItemId) -> Option<&MenuItem>;
    fn shuttle_type(&self, id: ShuttleTypeId) -> Option<&ShuttleType>;
    fn ratio_book(&self) -> &RatioBook;
}

/// In-memory catalog of players, prices, and ratio policies.
#[derive(Debug, Clone, Default)]
pub struct ClubCatalog {
    players: BTreeMap<PlayerId, Player>,
    menu_items: BTreeMap<MenuItemId, MenuItem>,
    shuttle_types: BTreeMap<ShuttleTypeId, ShuttleType>,
    ratios: RatioBook,
}

impl ClubCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, rejecting duplicate ids, negative prices and
    /// conflicting default ratio policies.
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Result<Self> {
        let mut catalog = Self {
            ratios: RatioBook::new(snapshot.ratio_policies)?,
            ..Self::default()
        };
        for player in snapshot.players {
            catalog.add_player(player)?;
        }
        for item in snapshot.menu_items {
            catalog.add_menu_item(item)?;
        }
        for shuttle in snapshot.shuttle_types {
            catalog.add_shuttle_type(shuttle)?;
        }
        Ok(catalog)
    }

    #[must_use]
    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            players: self.players.values().cloned().collect(),
            menu_items: self.menu_items.values().cloned().collect(),
            shuttle_types: self.shuttle_types.values().cloned().collect(),
            ratio_policies: self.ratios.policies().to_vec(),
        }
    }

    pub fn add_player(&mut self, player: Player) -> Result<()> {
        if let Some(ratio) = player.default_ratio {
            if ratio < Decimal::ZERO {
                return Err(CourtsideError::invalid(format!(
                    "player {} has negative default ratio {ratio}",
                    player.id
                )));
            }
        }
        if self.players.contains_key(&player.id) {
            return Err(CourtsideError::invalid(format!("duplicate player {}", player.id)));
        }
        self.players.insert(player.id, player);
        Ok(())
    }

    pub fn add_menu_item(&mut self, item: MenuItem) -> Result<()> {
        if item.price < 0 {
            return Err(CourtsideError::invalid(format!(
                "menu item '{}' has negative price {}",
                item.name, item.price
            )));
        }
        if self.menu_items.contains_key(&item.id) {
            return Err(CourtsideError::invalid(format!("duplicate menu item {}", item.id)));
        }
        self.menu_items.insert(item.id, item);
        Ok(())
    }

    pub fn add_shuttle_type(&mut self, shuttle: ShuttleType) -> Result<()> {
        if shuttle.price < 0 {
            return Err(CourtsideError::invalid(format!(
                "shuttle type '{}' has negative price {}",
                shuttle.name, shuttle.price
            )));
        }
        if self.shuttle_types.contains_key(&shuttle.id) {
            return Err(CourtsideError::invalid(format!(
                "duplicate shuttle type {}",
                shuttle.id
            )));
        }
        self.shuttle_types.insert(shuttle.id, shuttle);
        Ok(())
    }

    pub fn set_ratio_book(&mut self, ratios: RatioBook) {
        self.ratios = ratios;
    }
}

impl Catalog for ClubCatalog {
    fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    fn menu_item(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.menu_items.get(&id)
    }

    fn shuttle_type(&self, id: ShuttleTypeId) -> Option<&ShuttleType> {
        self.shuttle_types.get(&id)
    }

    fn ratio_book(&self) -> &RatioBook {
        &self.ratios
    }
}

#[cfg(test)]
mod tests {
    use courtside_types::{Gender, RatioPolicy};

    use super::*;

    #[test]
    fn snapshot_roundtrip() {
        let player = Player::new("An", Gender::Male);
        let item = MenuItem::new("Water", 10_000);
        let shuttle = ShuttleType::new("Yonex AS-30", 25_000);
        let snapshot = CatalogSnapshot {
            players: vec![player.clone()],
            menu_items: vec![item.clone()],
            shuttle_types: vec![shuttle.clone()],
            ratio_policies: vec![RatioPolicy::new("std", Decimal::ONE, None).as_default()],
        };
        let catalog = ClubCatalog::from_snapshot(snapshot.clone()).unwrap();
        assert_eq!(catalog.player(player.id), Some(&player));
        assert_eq!(catalog.menu_item(item.id), Some(&item));
        assert_eq!(catalog.shuttle_type(shuttle.id), Some(&shuttle));
        assert_eq!(catalog.ratio_book().default_for(Gender::Male), Some(Decimal::ONE));
        assert_eq!(catalog.snapshot(), snapshot);
    }

    #[test]
    fn duplicate_player_rejected() {
        let player = Player::new("An", Gender::Male);
        let mut catalog = ClubCatalog::new();
        catalog.add_player(player.clone()).unwrap();
        let err = catalog.add_player(player).unwrap_err();
        assert!(matches!(err, CourtsideError::Validation { .. }));
    }

    #[test]
    fn negative_prices_rejected() {
        let mut catalog = ClubCatalog::new();
        assert!(catalog.add_menu_item(MenuItem::new("Refund", -1)).is_err());
        assert!(catalog.add_shuttle_type(ShuttleType::new("Odd", -5)).is_err());
    }

    #[test]
    fn negative_player_ratio_rejected() {
        let mut catalog = ClubCatalog::new();
        let player = Player::new("Bao", Gender::Male).with_default_ratio(Decimal::NEGATIVE_ONE);
        assert!(catalog.add_player(player).is_err());

        let mut neg_zero = Decimal::ZERO;
        neg_zero.set_sign_negative(true);
        let player = Player::new("Chi", Gender::Female).with_default_ratio(neg_zero);
        catalog.add_player(player).unwrap();
    }
}
