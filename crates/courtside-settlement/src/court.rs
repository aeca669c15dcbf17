//! Court-bill settlement engine.
//!
//! ```text
//! compute_settlement(BillDraft) -> SettlementResult
//! ```
//!
//! Pure and deterministic: no I/O, no clock, same draft and catalog give the
//! same result. Every lookup is resolved before any arithmetic happens, so an
//! unknown id fails the whole computation.
//!
//! ## Algorithm
//!
//! 1. Price each shuttle line, sum into `total_shuttle_price`
//! 2. `grand_total = court_total + total_shuttle_price`
//! 3. Resolve each participant's effective ratio
//! 4. `unit_price = grand_total / Σ ratios` (zero when Σ ratios is zero)
//! 5. Per participant: `share = round(ratio × unit_price)`,
//!    `total = share + menu extras + carried debt`
//! 6. `rounding_difference = grand_total − Σ share`, reported as is

use std::collections::BTreeSet;

use courtside_types::{
    line_total, round_to_amount, sum_amounts, Amount, BillDraft, CourtsideError, MenuCharge,
    ParticipantDraft, ParticipantShare, Result, SettlementConfig, SettlementResult, ShuttleCharge,
};
use rust_decimal::Decimal;

use crate::catalog::Catalog;
use crate::ratio::resolve_ratio;

/// A participant with every lookup resolved, before the split.
struct Resolved<'a> {
    draft: &'a ParticipantDraft,
    ratio: Decimal,
    menu: Vec<MenuCharge>,
    menu_extra_total: Amount,
}

/// Compute the authoritative settlement of a court bill.
///
/// # Errors
/// - `Validation` for negative amounts / quantities, an empty participant
///   list, or a player listed twice
/// - `PlayerNotFound`, `MenuItemNotFound`, `ShuttleTypeNotFound` for ids the
///   catalog does not know
/// - `AmountOverflow` if a total leaves the `i64` range
pub fn compute_settlement<C>(
    draft: &BillDraft,
    catalog: &C,
    config: &SettlementConfig,
) -> Result<SettlementResult>
where
    C: Catalog + ?Sized,
{
    validate_draft(draft)?;

    // 1. Resolve everything up front (fail fast, nothing computed yet).
    let shuttles = price_shuttles(draft, catalog)?;
    let resolved = draft
        .participants
        .iter()
        .map(|p| resolve_participant(p, catalog, config))
        .collect::<Result<Vec<_>>>()?;

    // 2. Fixed costs.
    let total_shuttle_price = sum_amounts(shuttles.iter().map(|s| s.subtotal), "shuttle total")?;
    let grand_total = draft
        .court_total
        .checked_add(total_shuttle_price)
        .ok_or(CourtsideError::AmountOverflow {
            context: "grand total",
        })?;

    // 3. Unit price per ratio point.
    let sum_ratios = resolved.iter().try_fold(Decimal::ZERO, |acc, p| {
        acc.checked_add(p.ratio)
            .ok_or(CourtsideError::AmountOverflow { context: "ratio sum" })
    })?;
    let unit_price = if sum_ratios > Decimal::ZERO {
        Decimal::from(grand_total)
            .checked_div(sum_ratios)
            .ok_or(CourtsideError::AmountOverflow {
                context: "unit price",
            })?
    } else {
        Decimal::ZERO
    };

    // 4. Per-participant shares.
    let mut participants = Vec::with_capacity(resolved.len());
    for p in resolved {
        let raw_share = p
            .ratio
            .checked_mul(unit_price)
            .ok_or(CourtsideError::AmountOverflow { context: "share" })?;
        let share_amount = round_to_amount(raw_share, "share")?;
        let total_amount = sum_amounts(
            [share_amount, p.menu_extra_total, p.draft.debt_amount],
            "participant total",
        )?;

        tracing::debug!(
            player = %p.draft.player_id,
            ratio = %p.ratio,
            share = share_amount,
            extras = p.menu_extra_total,
            debt = p.draft.debt_amount,
            total = total_amount,
            "Participant share computed"
        );

        participants.push(ParticipantShare {
            player_id: p.draft.player_id,
            ratio: p.ratio,
            share_amount,
            menu: p.menu,
            menu_extra_total: p.menu_extra_total,
            debt_amount: p.draft.debt_amount,
            debt_date: p.draft.debt_date,
            total_amount,
        });
    }

    // 5. Remainder is surfaced, never redistributed.
    let shares_total = sum_amounts(participants.iter().map(|p| p.share_amount), "share total")?;
    let rounding_difference = grand_total
        .checked_sub(shares_total)
        .ok_or(CourtsideError::AmountOverflow {
            context: "rounding difference",
        })?;
    if rounding_difference != 0 {
        tracing::warn!(
            date = %draft.date,
            grand_total,
            shares_total,
            rounding_difference,
            "Court bill shares do not add up to the grand total"
        );
    }

    tracing::info!(
        date = %draft.date,
        participants = participants.len(),
        grand_total,
        sum_ratios = %sum_ratios,
        unit_price = %unit_price,
        "Court bill settled"
    );

    Ok(SettlementResult {
        date: draft.date,
        court_total: draft.court_total,
        shuttles,
        total_shuttle_price,
        grand_total,
        sum_ratios,
        unit_price,
        participants,
        rounding_difference,
    })
}

fn validate_draft(draft: &BillDraft) -> Result<()> {
    if draft.court_total < 0 {
        return Err(CourtsideError::invalid(format!(
            "court total must be non-negative, got {}",
            draft.court_total
        )));
    }
    if draft.participants.is_empty() {
        return Err(CourtsideError::invalid("a court bill needs at least one participant"));
    }
    if let Some(line) = draft.shuttles.iter().find(|s| s.quantity < 0) {
        return Err(CourtsideError::invalid(format!(
            "shuttle quantity must be non-negative, got {} for {}",
            line.quantity, line.shuttle_type_id
        )));
    }

    let mut seen = BTreeSet::new();
    for p in &draft.participants {
        if !seen.insert(p.player_id) {
            return Err(CourtsideError::invalid(format!(
                "player {} is listed twice",
                p.player_id
            )));
        }
        if p.debt_amount < 0 {
            return Err(CourtsideError::invalid(format!(
                "carried debt must be non-negative, got {} for {}",
                p.debt_amount, p.player_id
            )));
        }
        if let Some(line) = p.menu.iter().find(|m| m.quantity < 0) {
            return Err(CourtsideError::invalid(format!(
                "menu quantity must be non-negative, got {} for {}",
                line.quantity, p.player_id
            )));
        }
    }
    Ok(())
}

fn price_shuttles<C>(draft: &BillDraft, catalog: &C) -> Result<Vec<ShuttleCharge>>
where
    C: Catalog + ?Sized,
{
    draft
        .shuttles
        .iter()
        .map(|line| {
            let shuttle = catalog
                .shuttle_type(line.shuttle_type_id)
                .ok_or(CourtsideError::ShuttleTypeNotFound(line.shuttle_type_id))?;
            Ok(ShuttleCharge {
                shuttle_type_id: line.shuttle_type_id,
                unit_price: shuttle.price,
                quantity: line.quantity,
                subtotal: line_total(shuttle.price, line.quantity, "shuttle line")?,
            })
        })
        .collect()
}

fn resolve_participant<'a, C>(
    draft: &'a ParticipantDraft,
    catalog: &C,
    config: &SettlementConfig,
) -> Result<Resolved<'a>>
where
    C: Catalog + ?Sized,
{
    let player = catalog
        .player(draft.player_id)
        .ok_or(CourtsideError::PlayerNotFound(draft.player_id))?;
    let (ratio, source) = resolve_ratio(
        draft.ratio,
        player,
        catalog.ratio_book(),
        config.fallback_ratio,
    )?;
    tracing::trace!(player = %player.id, ratio = %ratio, source = ?source, "Ratio resolved");

    let menu = draft
        .menu
        .iter()
        .map(|line| {
            let item = catalog
                .menu_item(line.menu_item_id)
                .ok_or(CourtsideError::MenuItemNotFound(line.menu_item_id))?;
            Ok(MenuCharge {
                menu_item_id: line.menu_item_id,
                unit_price: item.price,
                quantity: line.quantity,
                subtotal: line_total(item.price, line.quantity, "menu line")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let menu_extra_total = sum_amounts(menu.iter().map(|m| m.subtotal), "menu extras")?;

    Ok(Resolved {
        draft,
        ratio,
        menu,
        menu_extra_total,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use courtside_types::{
        BillDraft, CatalogSnapshot, Gender, MenuItem, MenuItemId, ParticipantDraft, Player, PlayerId, RatioBook,
        RatioPolicy, ShuttleLine, ShuttleType, ShuttleTypeId,
    };

    use super::*;
    use crate::catalog::ClubCatalog;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 4).unwrap()
    }

    fn dec(n: i64, scale: u32) -> Decimal {
        Decimal::new(n, scale)
    }

    struct Fixture {
        catalog: ClubCatalog,
        shuttle: ShuttleTypeId,
        water: MenuItemId,
        a: PlayerId,
        b: PlayerId,
    }

    fn fixture() -> Fixture {
        let shuttle = ShuttleType::new("Feather", 25_000);
        let water = MenuItem::new("Water", 10_000);
        let a = Player::dummy(Gender::Male, Some(2));
        let b = Player::dummy(Gender::Female, Some(1));
        let (shuttle_id, water_id, a_id, b_id) = (shuttle.id, water.id, a.id, b.id);
        let catalog = ClubCatalog::from_snapshot(CatalogSnapshot {
            players: vec![a, b],
            menu_items: vec![water],
            shuttle_types: vec![shuttle],
            ratio_policies: vec![],
        })
        .unwrap();
        Fixture {
            catalog,
            shuttle: shuttle_id,
            water: water_id,
            a: a_id,
            b: b_id,
        }
    }

    fn draft(fx: &Fixture, participants: Vec<ParticipantDraft>) -> BillDraft {
        BillDraft {
            date: date(),
            court_total: 200_000,
            shuttles: vec![ShuttleLine {
                shuttle_type_id: fx.shuttle,
                quantity: 12,
            }],
            participants,
        }
    }

    #[test]
    fn two_players_weighted_split() {
        let fx = fixture();
        let d = draft(
            &fx,
            vec![
                ParticipantDraft::new(fx.a).with_ratio(dec(10, 1)),
                ParticipantDraft::new(fx.b).with_ratio(dec(7, 1)),
            ],
        );
        let result = compute_settlement(&d, &fx.catalog, &SettlementConfig::default()).unwrap();

        assert_eq!(result.total_shuttle_price, 300_000);
        assert_eq!(result.grand_total, 500_000);
        assert_eq!(result.sum_ratios, dec(17, 1));
        assert_eq!(result.participants[0].share_amount, 294_118);
        assert_eq!(result.participants[1].share_amount, 205_882);
        assert_eq!(result.rounding_difference, 0);
        assert_eq!(result.shuttles[0].subtotal, 300_000);
    }

    #[test]
    fn extras_and_debt_add_to_total() {
        let fx = fixture();
        let d = draft(
            &fx,
            vec![
                ParticipantDraft::new(fx.a)
                    .with_menu(fx.water, 2)
                    .with_debt(50_000, Some(date())),
                ParticipantDraft::new(fx.b),
            ],
        );
        let result = compute_settlement(&d, &fx.catalog, &SettlementConfig::default()).unwrap();
        let a = result.share_of(fx.a).unwrap();
        assert_eq!(a.share_amount, 250_000);
        assert_eq!(a.menu_extra_total, 20_000);
        assert_eq!(a.debt_amount, 50_000);
        assert_eq!(a.total_amount, 320_000);
        assert_eq!(a.menu.len(), 1);
        assert_eq!(result.amount_due(), 570_000);
    }

    #[test]
    fn zero_ratio_sum_yields_zero_unit_price() {
        let fx = fixture();
        let d = draft(
            &fx,
            vec![ParticipantDraft::new(fx.a)
                .with_ratio(Decimal::ZERO)
                .with_menu(fx.water, 1)
                .with_debt(5_000, None)],
        );
        let result = compute_settlement(&d, &fx.catalog, &SettlementConfig::default()).unwrap();
        assert_eq!(result.unit_price, Decimal::ZERO);
        assert_eq!(result.participants[0].share_amount, 0);
        assert_eq!(result.participants[0].total_amount, 15_000);
        assert_eq!(result.rounding_difference, 500_000);
    }

    #[test]
    fn remainder_is_reported_not_redistributed() {
        let fx = fixture();
        let mut d = draft(
            &fx,
            vec![ParticipantDraft::new(fx.a), ParticipantDraft::new(fx.b)],
        );
        d.court_total = 1;
        d.shuttles.clear();
        let result = compute_settlement(&d, &fx.catalog, &SettlementConfig::default()).unwrap();
        // 0.5 rounds away from zero for both players.
        assert_eq!(result.participants[0].share_amount, 1);
        assert_eq!(result.participants[1].share_amount, 1);
        assert_eq!(result.rounding_difference, -1);
    }

    #[test]
    fn policy_ratio_applies_when_no_override() {
        let mut fx = fixture();
        fx.catalog.set_ratio_book(
            RatioBook::new(vec![
                RatioPolicy::new("women", dec(5, 1), Some(Gender::Female)).as_default(),
            ])
            .unwrap(),
        );
        let d = draft(&fx, vec![ParticipantDraft::new(fx.a), ParticipantDraft::new(fx.b)]);
        let result = compute_settlement(&d, &fx.catalog, &SettlementConfig::default()).unwrap();
        assert_eq!(result.sum_ratios, dec(15, 1));
        assert_eq!(result.share_of(fx.b).unwrap().ratio, dec(5, 1));
    }

    #[test]
    fn unknown_menu_item_fails_fast() {
        let fx = fixture();
        let missing = MenuItemId::new();
        let d = draft(&fx, vec![ParticipantDraft::new(fx.a).with_menu(missing, 1)]);
        let err = compute_settlement(&d, &fx.catalog, &SettlementConfig::default()).unwrap_err();
        assert!(matches!(err, CourtsideError::MenuItemNotFound(id) if id == missing));
    }

    #[test]
    fn unknown_player_and_shuttle() {
        let fx = fixture();
        let ghost = PlayerId::new();
        let d = draft(&fx, vec![ParticipantDraft::new(ghost)]);
        let err = compute_settlement(&d, &fx.catalog, &SettlementConfig::default()).unwrap_err();
        assert!(matches!(err, CourtsideError::PlayerNotFound(id) if id == ghost));

        let mut d = draft(&fx, vec![ParticipantDraft::new(fx.a)]);
        d.shuttles[0].shuttle_type_id = ShuttleTypeId::new();
        let err = compute_settlement(&d, &fx.catalog, &SettlementConfig::default()).unwrap_err();
        assert!(matches!(err, CourtsideError::ShuttleTypeNotFound(_)));
    }

    #[test]
    fn negative_inputs_rejected() {
        let fx = fixture();
        let cfg = SettlementConfig::default();

        let mut d = draft(&fx, vec![ParticipantDraft::new(fx.a)]);
        d.court_total = -1;
        assert!(matches!(
            compute_settlement(&d, &fx.catalog, &cfg),
            Err(CourtsideError::Validation { .. })
        ));

        let mut d = draft(&fx, vec![ParticipantDraft::new(fx.a)]);
        d.shuttles[0].quantity = -3;
        assert!(matches!(
            compute_settlement(&d, &fx.catalog, &cfg),
            Err(CourtsideError::Validation { .. })
        ));

        let d = draft(&fx, vec![ParticipantDraft::new(fx.a).with_menu(fx.water, -1)]);
        assert!(matches!(
            compute_settlement(&d, &fx.catalog, &cfg),
            Err(CourtsideError::Validation { .. })
        ));

        let d = draft(&fx, vec![ParticipantDraft::new(fx.a).with_debt(-10, None)]);
        assert!(matches!(
            compute_settlement(&d, &fx.catalog, &cfg),
            Err(CourtsideError::Validation { .. })
        ));
    }

    #[test]
    fn empty_and_duplicate_participants_rejected() {
        let fx = fixture();
        let cfg = SettlementConfig::default();
        let d = draft(&fx, vec![]);
        assert!(matches!(
            compute_settlement(&d, &fx.catalog, &cfg),
            Err(CourtsideError::Validation { .. })
        ));
        let d = draft(&fx, vec![ParticipantDraft::new(fx.a), ParticipantDraft::new(fx.a)]);
        assert!(matches!(
            compute_settlement(&d, &fx.catalog, &cfg),
            Err(CourtsideError::Validation { .. })
        ));
    }

    #[test]
    fn same_draft_same_result() {
        let fx = fixture();
        let d = draft(
            &fx,
            vec![
                ParticipantDraft::new(fx.a).with_ratio(dec(13, 1)),
                ParticipantDraft::new(fx.b).with_ratio(dec(7, 1)).with_menu(fx.water, 3),
            ],
        );
        let cfg = SettlementConfig::default();
        let first = compute_settlement(&d, &fx.catalog, &cfg).unwrap();
        let second = compute_settlement(&d, &fx.catalog, &cfg).unwrap();
        assert_eq!(first, second);
    }
}
