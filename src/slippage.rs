//! Slippage bounds for submitting liquidity instructions on-chain.
//!
//! Tolerances are basis points (10^4 = 100%). Maximums round up and minimums round
//! down, so a bound is never less protective than the requested tolerance.

use crate::{
    constants::BASIS_POINTS_DENOMINATOR,
    state::LiquidityConfig,
    utils::{ceil_div, floor_div, mul_wide, to_u64},
    ErrorCode,
};

/// Largest amount a depositor should authorize for `amount` under `tolerance_bps`.
pub fn max_with_slippage(amount: u64, tolerance_bps: u64) -> Result<u64, ErrorCode> {
    let factor = BASIS_POINTS_DENOMINATOR
        .checked_add(tolerance_bps)
        .ok_or(ErrorCode::AmountOverflow)?;
    to_u64(ceil_div(
        mul_wide(amount, factor),
        u128::from(BASIS_POINTS_DENOMINATOR),
    )?)
}

/// Smallest amount a withdrawer should accept for `amount` under `tolerance_bps`.
pub fn min_with_slippage(amount: u64, tolerance_bps: u64) -> Result<u64, ErrorCode> {
    let factor = BASIS_POINTS_DENOMINATOR
        .checked_sub(tolerance_bps)
        .ok_or(ErrorCode::ToleranceOutOfRange)?;
    to_u64(floor_div(
        mul_wide(amount, factor),
        u128::from(BASIS_POINTS_DENOMINATOR),
    )?)
}

pub fn apply_deposit_slippage(
    required_token_a: u64,
    required_token_b: u64,
    tolerance_bps: u64,
    config: &LiquidityConfig,
) -> Result<(u64, u64), ErrorCode> {
    check_tolerance(tolerance_bps, config)?;
    Ok((
        max_with_slippage(required_token_a, tolerance_bps)?,
        max_with_slippage(required_token_b, tolerance_bps)?,
    ))
}

pub fn apply_withdrawal_slippage(
    expected_token_a: u64,
    expected_token_b: u64,
    tolerance_bps: u64,
    config: &LiquidityConfig,
) -> Result<(u64, u64), ErrorCode> {
    check_tolerance(tolerance_bps, config)?;
    Ok((
        min_with_slippage(expected_token_a, tolerance_bps)?,
        min_with_slippage(expected_token_b, tolerance_bps)?,
    ))
}

fn check_tolerance(tolerance_bps: u64, config: &LiquidityConfig) -> Result<(), ErrorCode> {
    if !config.is_slippage_in_range(tolerance_bps) {
        log::debug!(
            "slippage {} bps outside {}..={} bps",
            tolerance_bps,
            config.min_slippage_bps,
            config.max_slippage_bps
        );
        return Err(ErrorCode::ToleranceOutOfRange);
    }
    Ok(())
}
