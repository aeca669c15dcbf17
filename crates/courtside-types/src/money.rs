//! Currency amounts and rounding.
//!
//! Amounts are whole minor currency units. Ratios and unit prices are
//! [`Decimal`] and are rounded half away from zero when they become amounts.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{CourtsideError, Result};

/// Integer currency amount.
pub type Amount = i64;

/// Round to the nearest whole unit, halves away from zero.
#[must_use]
pub fn round_half_away(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a decimal to an [`Amount`].
pub fn round_to_amount(value: Decimal, context: &'static str) -> Result<Amount> {
    round_half_away(value)
        .to_i64()
        .ok_or(CourtsideError::AmountOverflow { context })
}

/// `price × quantity` with overflow checking.
pub fn line_total(unit_price: Amount, quantity: i64, context: &'static str) -> Result<Amount> {
    unit_price
        .checked_mul(quantity)
        .ok_or(CourtsideError::AmountOverflow { context })
}

/// Checked sum of amounts.
pub fn sum_amounts<I>(amounts: I, context: &'static str) -> Result<Amount>
where
    I: IntoIterator<Item = Amount>,
{
    amounts.into_iter().try_fold(0, |acc: Amount, x| {
        acc.checked_add(x)
            .ok_or(CourtsideError::AmountOverflow { context })
    })
}
