use spl_math::uint::U256;

use crate::{state::RoundDirection, ErrorCode};

/// Truncating integer division.
pub fn floor_div(numerator: u128, denominator: u128) -> Result<u128, ErrorCode> {
    numerator
        .checked_div(denominator)
        .ok_or(ErrorCode::DivisionByZero)
}

/// Ceiling integer division.
///
/// A zero numerator stays zero; otherwise any remainder rounds the quotient up by one.
pub fn ceil_div(numerator: u128, denominator: u128) -> Result<u128, ErrorCode> {
    let quotient = floor_div(numerator, denominator)?;
    let remainder = numerator
        .checked_rem(denominator)
        .ok_or(ErrorCode::DivisionByZero)?;

    if remainder > 0 && numerator > 0 {
        // quotient < numerator here, so the increment cannot overflow
        Ok(quotient + 1)
    } else {
        Ok(quotient)
    }
}

pub fn div_round(
    numerator: u128,
    denominator: u128,
    round_direction: RoundDirection,
) -> Result<u128, ErrorCode> {
    match round_direction {
        RoundDirection::Floor => floor_div(numerator, denominator),
        RoundDirection::Ceiling => ceil_div(numerator, denominator),
    }
}

/// Narrows an intermediate result to a token amount.
pub fn to_u64(amount: u128) -> Result<u64, ErrorCode> {
    u64::try_from(amount).map_err(|_| ErrorCode::AmountOverflow)
}

pub fn u256_to_u64(amount: U256) -> Result<u64, ErrorCode> {
    if amount > U256::from(u64::MAX) {
        return Err(ErrorCode::AmountOverflow);
    }
    Ok(amount.as_u64())
}

/// `a * b` widened to u128, which cannot overflow for u64 inputs.
pub fn mul_wide(a: u64, b: u64) -> u128 {
    u128::from(a) * u128::from(b)
}
