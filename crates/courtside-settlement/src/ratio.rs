//! Effective ratio resolution for court-bill participants.

use courtside_types::{CourtsideError, Player, RatioBook, Result};
use rust_decimal::Decimal;

/// Where an effective ratio came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioSource {
    Override,
    PlayerDefault,
    Policy,
    Fallback,
}

/// Resolve a participant's ratio.
///
/// Order: explicit override, the player's stored ratio, the default policy
/// for the player's gender (or the unscoped default), then `fallback`.
pub fn resolve_ratio(
    override_ratio: Option<Decimal>,
    player: &Player,
    ratios: &RatioBook,
    fallback: Decimal,
) -> Result<(Decimal, RatioSource)> {
    let (ratio, source) = if let Some(r) = override_ratio {
        (r, RatioSource::Override)
    } else if let Some(r) = player.default_ratio {
        (r, RatioSource::PlayerDefault)
    } else if let Some(r) = ratios.default_for(player.gender) {
        (r, RatioSource::Policy)
    } else {
        (fallback, RatioSource::Fallback)
    };

    if ratio < Decimal::ZERO {
        return Err(CourtsideError::invalid(format!(
            "negative ratio {ratio} for player {}",
            player.id
        )));
    }
    Ok((ratio, source))
}
