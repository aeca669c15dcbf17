//! Party-bill settlement engine.
//!
//! Unlike court bills, the unit price is rounded to a whole amount *before*
//! shares are computed, and what a guest already paid is subtracted from
//! what they owe. Ratios have no policy fallback: unset means the configured
//! party default.

use courtside_types::{
    round_to_amount, sum_amounts, CourtsideError, PartyBillDraft, PartyConfig, PartyShare,
    PartySettlementResult, Result,
};
use rust_decimal::Decimal;

/// Compute the settlement of a party bill.
///
/// # Errors
/// - `Validation` for negative amounts, negative ratios, an empty guest list,
///   or a guest with neither a name nor a linked player
/// - `AmountOverflow` if a total leaves the `i64` range
pub fn compute_party_settlement(
    draft: &PartyBillDraft,
    config: &PartyConfig,
) -> Result<PartySettlementResult> {
    validate_party_draft(draft)?;

    let total_extra = sum_amounts(draft.extras.iter().map(|e| e.amount), "party extras")?;
    let grand_total = draft
        .base_amount
        .checked_add(total_extra)
        .ok_or(CourtsideError::AmountOverflow {
            context: "party grand total",
        })?;

    let ratios: Vec<Decimal> = draft
        .participants
        .iter()
        .map(|p| p.ratio.unwrap_or(config.default_ratio))
        .collect();
    let sum_ratios = ratios.iter().try_fold(Decimal::ZERO, |acc, r| {
        acc.checked_add(*r).ok_or(CourtsideError::AmountOverflow {
            context: "party ratio sum",
        })
    })?;

    let unit_price = if sum_ratios > Decimal::ZERO {
        let exact = Decimal::from(grand_total)
            .checked_div(sum_ratios)
            .ok_or(CourtsideError::AmountOverflow {
                context: "party unit price",
            })?;
        round_to_amount(exact, "party unit price")?
    } else {
        0
    };

    let mut participants = Vec::with_capacity(draft.participants.len());
    for (p, ratio) in draft.participants.iter().zip(ratios) {
        let raw_share = ratio
            .checked_mul(Decimal::from(unit_price))
            .ok_or(CourtsideError::AmountOverflow {
                context: "party share",
            })?;
        let share_amount = round_to_amount(raw_share, "party share")?;
        let total_amount = share_amount
            .checked_add(p.food_amount)
            .and_then(|t| t.checked_sub(p.paid_amount))
            .ok_or(CourtsideError::AmountOverflow {
                context: "party participant total",
            })?;

        tracing::debug!(
            guest = %p.name,
            ratio = %ratio,
            share = share_amount,
            food = p.food_amount,
            paid = p.paid_amount,
            total = total_amount,
            "Party share computed"
        );

        participants.push(PartyShare {
            name: p.name.clone(),
            player_id: p.player_id,
            ratio,
            share_amount,
            food_amount: p.food_amount,
            paid_amount: p.paid_amount,
            total_amount,
            note: p.note.clone(),
        });
    }

    let shares_total = sum_amounts(participants.iter().map(|p| p.share_amount), "party shares")?;
    let rounding_difference = grand_total
        .checked_sub(shares_total)
        .ok_or(CourtsideError::AmountOverflow {
            context: "party rounding difference",
        })?;

    tracing::info!(
        date = %draft.date,
        guests = participants.len(),
        grand_total,
        unit_price,
        rounding_difference,
        "Party bill settled"
    );

    Ok(PartySettlementResult {
        date: draft.date,
        base_amount: draft.base_amount,
        extras: draft.extras.clone(),
        total_extra,
        grand_total,
        sum_ratios,
        unit_price,
        participants,
        rounding_difference,
    })
}

fn validate_party_draft(draft: &PartyBillDraft) -> Result<()> {
    if draft.base_amount < 0 {
        return Err(CourtsideError::invalid(format!(
            "party base amount must be non-negative, got {}",
            draft.base_amount
        )));
    }
    if let Some(extra) = draft.extras.iter().find(|e| e.amount < 0) {
        return Err(CourtsideError::invalid(format!(
            "extra '{}' has negative amount {}",
            extra.name, extra.amount
        )));
    }
    if draft.participants.is_empty() {
        return Err(CourtsideError::invalid("a party bill needs at least one participant"));
    }
    for (i, p) in draft.participants.iter().enumerate() {
        if p.name.trim().is_empty() && p.player_id.is_none() {
            return Err(CourtsideError::invalid(format!(
                "participant #{} has neither a name nor a player",
                i + 1
            )));
        }
        if p.paid_amount < 0 || p.food_amount < 0 {
            return Err(CourtsideError::invalid(format!(
                "participant #{} has a negative paid or food amount",
                i + 1
            )));
        }
        if let Some(ratio) = p.ratio {
            if ratio < Decimal::ZERO {
                return Err(CourtsideError::invalid(format!(
                    "participant #{} has negative ratio {ratio}",
                    i + 1
                )));
            }
        }
    }
    Ok(())
}
