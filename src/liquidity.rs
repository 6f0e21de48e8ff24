//! Liquidity operations for DEX
//!
//! This module provides the LP token math for pool deposits and withdrawals. Every
//! function reproduces the integer rounding of the on-chain constant-product program so
//! that amounts computed here are accepted by the program as-is.

use spl_math::uint::U256;

use crate::{
    constants::INITIAL_POOL_LP_AMOUNT,
    state::{RoundDirection, WithdrawalFee},
    utils::{div_round, floor_div, mul_wide, to_u64, u256_to_u64},
    ErrorCode,
};

/// Calculate the amount of LP tokens to mint for a deposit
///
/// # Arguments
/// * `token_a_amount` - Amount of token A being deposited
/// * `token_b_amount` - Amount of token B being deposited
/// * `token_a_reserve` - Current reserve of token A in the pool
/// * `token_b_reserve` - Current reserve of token B in the pool
/// * `total_lp_supply` - Current total supply of LP tokens
///
/// # Returns
/// The amount of LP tokens to mint. An empty pool always mints
/// [`INITIAL_POOL_LP_AMOUNT`]; otherwise the smaller of the two proportional estimates.
pub fn deposit_lp(
    token_a_amount: u64,
    token_b_amount: u64,
    token_a_reserve: u64,
    token_b_reserve: u64,
    total_lp_supply: u64,
) -> Result<u64, ErrorCode> {
    if total_lp_supply == 0 {
        // Initial liquidity provision, any positive ratio is accepted
        if token_a_amount == 0 || token_b_amount == 0 {
            return Err(ErrorCode::InvalidInitialDeposit);
        }
        return Ok(INITIAL_POOL_LP_AMOUNT);
    }

    if token_a_reserve == 0 || token_b_reserve == 0 {
        return Err(ErrorCode::ZeroReserves);
    }

    let token_a_lp = floor_div(
        mul_wide(token_a_amount, total_lp_supply),
        u128::from(token_a_reserve),
    )?;
    let token_b_lp = floor_div(
        mul_wide(token_b_amount, total_lp_supply),
        u128::from(token_b_reserve),
    )?;

    // Return the minimum so the more generous side never inflates the mint
    let lp_tokens = token_a_lp.min(token_b_lp);
    if lp_tokens == 0 {
        return Err(ErrorCode::ZeroLpTokens);
    }

    to_u64(lp_tokens)
}

/// Calculate the token amounts backing `lp_tokens` of an existing pool.
///
/// Use [`RoundDirection::Ceiling`] for what a depositor must supply and
/// [`RoundDirection::Floor`] for what a withdrawer receives.
pub fn required_tokens_for_lp(
    lp_tokens: u64,
    total_lp_supply: u64,
    token_a_reserve: u64,
    token_b_reserve: u64,
    round_direction: RoundDirection,
) -> Result<(u64, u64), ErrorCode> {
    if total_lp_supply == 0 {
        return Err(ErrorCode::ZeroLpSupply);
    }

    let token_a_amount = div_round(
        mul_wide(lp_tokens, token_a_reserve),
        u128::from(total_lp_supply),
        round_direction,
    )?;
    let token_b_amount = div_round(
        mul_wide(lp_tokens, token_b_reserve),
        u128::from(total_lp_supply),
        round_direction,
    )?;

    Ok((to_u64(token_a_amount)?, to_u64(token_b_amount)?))
}

/// Calculate the amount of tokens to return for a withdrawal
///
/// # Arguments
/// * `lp_tokens` - Amount of LP tokens being burned
/// * `total_lp_supply` - Current total supply of LP tokens
/// * `token_a_reserve` - Current reserve of token A in the pool
/// * `token_b_reserve` - Current reserve of token B in the pool
/// * `fee` - Withdrawal fee taken from the burned LP tokens before conversion
///
/// # Returns
/// A tuple (token_a_amount, token_b_amount) representing the amounts to return
pub fn withdraw_lp(
    lp_tokens: u64,
    total_lp_supply: u64,
    token_a_reserve: u64,
    token_b_reserve: u64,
    fee: WithdrawalFee,
) -> Result<(u64, u64), ErrorCode> {
    let lp_fee = floor_div(
        mul_wide(lp_tokens, fee.numerator),
        u128::from(fee.denominator),
    )?;
    let effective_lp = u128::from(lp_tokens)
        .checked_sub(lp_fee)
        .ok_or(ErrorCode::InvalidFee)?;

    let (token_a_amount, token_b_amount) = required_tokens_for_lp(
        to_u64(effective_lp)?,
        total_lp_supply,
        token_a_reserve,
        token_b_reserve,
        RoundDirection::Floor,
    )?;

    if token_a_amount > token_a_reserve || token_b_amount > token_b_reserve {
        return Err(ErrorCode::InsufficientLiquidity);
    }

    Ok((token_a_amount, token_b_amount))
}

/// Calculate the LP tokens minted for a deposit of only one side of the pair.
///
/// Balancer-style: `lp = floor(supply * (sqrt(1 + amount / reserve) - 1))`. Since
/// `floor(sqrt(x)) == isqrt(floor(x))`, this is evaluated exactly as
/// `isqrt(floor(supply^2 * (reserve + amount) / reserve)) - supply` in 256-bit integers.
pub fn deposit_single_token(
    source_amount: u64,
    source_reserve: u64,
    total_lp_supply: u64,
) -> Result<u64, ErrorCode> {
    if source_reserve == 0 {
        return Err(ErrorCode::ZeroSourceReserve);
    }

    let supply = U256::from(total_lp_supply);
    let reserve_after = U256::from(u128::from(source_reserve) + u128::from(source_amount));

    // supply^2 * (reserve + amount) < 2^193
    let scaled = (supply * supply * reserve_after)
        .checked_div(U256::from(source_reserve))
        .ok_or(ErrorCode::DivisionByZero)?;
    let lp_tokens = scaled
        .integer_sqrt()
        .checked_sub(supply)
        .ok_or(ErrorCode::AmountOverflow)?;

    if lp_tokens.is_zero() {
        return Err(ErrorCode::ZeroLpTokens);
    }

    u256_to_u64(lp_tokens)
}
