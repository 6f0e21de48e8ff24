//! Pre-flight checks for liquidity forms.
//!
//! Checks never stop at the first problem: every function returns all errors it finds so
//! a form can flag each field at once. Ratio and share math stays in integers.

use std::fmt;

use spl_math::uint::U256;
use thiserror::Error;

use crate::{
    constants::BASIS_POINTS_DENOMINATOR,
    state::LiquidityConfig,
    utils::{floor_div, mul_wide, to_u64},
    ErrorCode,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    ZeroAmount,
    InsufficientBalance,
    RatioOutOfTolerance,
    ToleranceOutOfRange,
    ExceedsLpBalance,
    /// Caller-reported LP balance is larger than the pool's whole supply.
    BalanceExceedsSupply,
}

/// The input a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenField {
    TokenA,
    TokenB,
    LpToken,
    Slippage,
}

impl fmt::Display for TokenField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenField::TokenA => "token A",
            TokenField::TokenB => "token B",
            TokenField::LpToken => "LP token",
            TokenField::Slippage => "slippage",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{detail}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub field: TokenField,
    /// The offending input value.
    pub value: u64,
    pub detail: String,
}

impl ValidationError {
    pub fn new(
        kind: ValidationErrorKind,
        field: TokenField,
        value: u64,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            field,
            value,
            detail: detail.into(),
        }
    }
}

/// Share of a pool in basis points, 10^4 = 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct PoolShare(pub u64);

impl PoolShare {
    pub fn bps(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PoolShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

/// `user_lp / total_lp` as a fixed-point percentage with two decimals, rounded down.
pub fn pool_share(user_lp: u64, total_lp_after_deposit: u64) -> Result<PoolShare, ErrorCode> {
    let share = floor_div(
        mul_wide(user_lp, BASIS_POINTS_DENOMINATOR),
        u128::from(total_lp_after_deposit),
    )?;
    Ok(PoolShare(to_u64(share)?))
}

pub fn validate_deposit(
    amount_a: u64,
    amount_b: u64,
    reserve_a: u64,
    reserve_b: u64,
    balance_a: u64,
    balance_b: u64,
    config: &LiquidityConfig,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (field, amount, balance) in [
        (TokenField::TokenA, amount_a, balance_a),
        (TokenField::TokenB, amount_b, balance_b),
    ] {
        if amount == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroAmount,
                field,
                amount,
                format!("{} amount must be greater than 0", field),
            ));
        } else if amount > balance {
            errors.push(ValidationError::new(
                ValidationErrorKind::InsufficientBalance,
                field,
                amount,
                format!("{} amount {} exceeds balance {}", field, amount, balance),
            ));
        }
    }

    if amount_a > 0
        && amount_b > 0
        && reserve_a > 0
        && reserve_b > 0
        && !is_ratio_within_tolerance(
            amount_a,
            amount_b,
            reserve_a,
            reserve_b,
            config.ratio_tolerance_bps,
        )
    {
        errors.push(ValidationError::new(
            ValidationErrorKind::RatioOutOfTolerance,
            TokenField::TokenB,
            amount_b,
            format!(
                "deposit ratio {}:{} deviates from pool ratio {}:{} by more than {} bps",
                amount_a, amount_b, reserve_a, reserve_b, config.ratio_tolerance_bps
            ),
        ));
    }

    errors
}

pub fn validate_withdrawal(lp_token_amount: u64, user_lp_balance: u64) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if lp_token_amount == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroAmount,
            TokenField::LpToken,
            lp_token_amount,
            "LP token amount must be greater than 0",
        ));
    } else if lp_token_amount > user_lp_balance {
        errors.push(ValidationError::new(
            ValidationErrorKind::ExceedsLpBalance,
            TokenField::LpToken,
            lp_token_amount,
            format!(
                "LP token amount {} exceeds balance {}",
                lp_token_amount, user_lp_balance
            ),
        ));
    }

    errors
}

pub fn validate_slippage(tolerance_bps: u64, config: &LiquidityConfig) -> Option<ValidationError> {
    if config.is_slippage_in_range(tolerance_bps) {
        return None;
    }
    Some(ValidationError::new(
        ValidationErrorKind::ToleranceOutOfRange,
        TokenField::Slippage,
        tolerance_bps,
        format!(
            "slippage {} bps must be between {} and {} bps",
            tolerance_bps, config.min_slippage_bps, config.max_slippage_bps
        ),
    ))
}

/// `|a/b - ra/rb| <= tolerance * ra/rb`, cross-multiplied:
/// `|a*rb - b*ra| * 10^4 <= tolerance_bps * b*ra`.
fn is_ratio_within_tolerance(
    amount_a: u64,
    amount_b: u64,
    reserve_a: u64,
    reserve_b: u64,
    tolerance_bps: u64,
) -> bool {
    let deposit_side = mul_wide(amount_a, reserve_b);
    let pool_side = mul_wide(amount_b, reserve_a);
    let deviation = deposit_side.abs_diff(pool_side);

    U256::from(deviation) * U256::from(BASIS_POINTS_DENOMINATOR)
        <= U256::from(pool_side) * U256::from(tolerance_bps)
}
