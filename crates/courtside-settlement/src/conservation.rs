//! Bill-totals conservation check.
//!
//! Invariant enforced before any bill is written:
//! ```text
//! Σ share_amount + rounding_difference == grand_total
//! ∀ participant: total_amount == share + extras + debt   (court)
//!                total_amount == share + food − paid      (party)
//! ```
//!
//! A result that fails this was not produced by the engines in this crate
//! (or was tampered with on its way back from a client preview).

use courtside_types::{
    sum_amounts, CourtsideError, PartySettlementResult, Result, SettlementResult,
};

/// Verify that a court settlement adds back up to its fixed costs.
pub fn verify_bill_totals(result: &SettlementResult) -> Result<()> {
    let shuttles = sum_amounts(result.shuttles.iter().map(|s| s.subtotal), "shuttle total")?;
    if shuttles != result.total_shuttle_price {
        return Err(violation(format!(
            "shuttle lines sum to {shuttles}, bill says {}",
            result.total_shuttle_price
        )));
    }
    if result.court_total.checked_add(shuttles) != Some(result.grand_total) {
        return Err(violation(format!(
            "court {} + shuttles {shuttles} != grand total {}",
            result.court_total, result.grand_total
        )));
    }

    let shares = sum_amounts(result.participants.iter().map(|p| p.share_amount), "share total")?;
    if shares.checked_add(result.rounding_difference) != Some(result.grand_total) {
        return Err(violation(format!(
            "shares {shares} + remainder {} != grand total {}",
            result.rounding_difference, result.grand_total
        )));
    }

    for p in &result.participants {
        let menu = sum_amounts(p.menu.iter().map(|m| m.subtotal), "menu extras")?;
        if menu != p.menu_extra_total {
            return Err(violation(format!(
                "menu lines of {} sum to {menu}, share says {}",
                p.player_id, p.menu_extra_total
            )));
        }
        let expected = sum_amounts([p.share_amount, menu, p.debt_amount], "participant total")?;
        if expected != p.total_amount {
            return Err(violation(format!(
                "total of {} is {}, expected {expected}",
                p.player_id, p.total_amount
            )));
        }
    }
    Ok(())
}

/// Verify that a party settlement adds back up to its base and extras.
pub fn verify_party_totals(result: &PartySettlementResult) -> Result<()> {
    let extras = sum_amounts(result.extras.iter().map(|e| e.amount), "party extras")?;
    if extras != result.total_extra
        || result.base_amount.checked_add(extras) != Some(result.grand_total)
    {
        return Err(violation(format!(
            "base {} + extras {extras} != grand total {}",
            result.base_amount, result.grand_total
        )));
    }

    let shares = sum_amounts(result.participants.iter().map(|p| p.share_amount), "party shares")?;
    if shares.checked_add(result.rounding_difference) != Some(result.grand_total) {
        return Err(violation(format!(
            "party shares {shares} + remainder {} != grand total {}",
            result.rounding_difference, result.grand_total
        )));
    }

    for p in &result.participants {
        let expected = p
            .share_amount
            .checked_add(p.food_amount)
            .and_then(|t| t.checked_sub(p.paid_amount));
        if expected != Some(p.total_amount) {
            return Err(violation(format!(
                "party total of '{}' is {}, expected share + food - paid",
                p.name, p.total_amount
            )));
        }
    }
    Ok(())
}

fn violation(reason: String) -> CourtsideError {
    CourtsideError::SettlementInvariantViolation { reason }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use courtside_types::{
        CatalogSnapshot, ExtraCost, Gender, MenuItem, PartyBillDraft, PartyConfig,
        PartyParticipantDraft, ParticipantDraft, Player, SettlementConfig, ShuttleLine,
        ShuttleType, BillDraft,
    };

    use super::*;
    use crate::{compute_party_settlement, compute_settlement, ClubCatalog};

    fn settled_bill() -> SettlementResult {
        let a = Player::dummy(Gender::Male, None);
        let b = Player::dummy(Gender::Female, None);
        let water = MenuItem::new("Water", 8_000);
        let shuttle = ShuttleType::new("Nylon", 18_000);
        let draft = BillDraft {
            date: NaiveDate::from_ymd_opt(2024, 1, 6).unwrap(),
            court_total: 170_000,
            shuttles: vec![ShuttleLine {
                shuttle_type_id: shuttle.id,
                quantity: 5,
            }],
            participants: vec![
                ParticipantDraft::new(a.id).with_menu(water.id, 2),
                ParticipantDraft::new(b.id).with_debt(30_000, None),
            ],
        };
        let catalog = ClubCatalog::from_snapshot(CatalogSnapshot {
            players: vec![a, b],
            menu_items: vec![water],
            shuttle_types: vec![shuttle],
            ratio_policies: vec![],
        })
        .unwrap();
        compute_settlement(&draft, &catalog, &SettlementConfig::default()).unwrap()
    }

    #[test]
    fn engine_output_is_conserved() {
        verify_bill_totals(&settled_bill()).unwrap();
    }

    #[test]
    fn tampered_share_detected() {
        let mut result = settled_bill();
        result.participants[0].share_amount += 1;
        let err = verify_bill_totals(&result).unwrap_err();
        assert!(matches!(err, CourtsideError::SettlementInvariantViolation { .. }));
    }

    #[test]
    fn tampered_total_detected() {
        let mut result = settled_bill();
        result.participants[1].total_amount -= 30_000;
        assert!(verify_bill_totals(&result).is_err());
    }

    #[test]
    fn party_output_is_conserved_and_tamper_detected() {
        let draft = PartyBillDraft {
            date: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            base_amount: 700_000,
            extras: vec![ExtraCost {
                name: "Karaoke".into(),
                amount: 300_000,
            }],
            participants: vec![
                PartyParticipantDraft::named("An"),
                PartyParticipantDraft::named("Binh").with_paid(200_000),
                PartyParticipantDraft::named("Chi").with_food(40_000),
            ],
        };
        let mut result = compute_party_settlement(&draft, &PartyConfig::default()).unwrap();
        verify_party_totals(&result).unwrap();

        result.participants[1].total_amount = result.participants[1].share_amount;
        assert!(verify_party_totals(&result).is_err());
    }
}
