//! Property-based tests for the LP math invariants.

use proptest::prelude::*;
use spl_math::uint::U256;

use crate::{
    constants::INITIAL_POOL_LP_AMOUNT,
    liquidity::{deposit_lp, deposit_single_token, required_tokens_for_lp, withdraw_lp},
    slippage::{apply_deposit_slippage, apply_withdrawal_slippage},
    state::{LiquidityConfig, RoundDirection, WithdrawalFee},
    utils::{ceil_div, floor_div},
    ErrorCode,
};

const MAX_RESERVE: u64 = 1_000_000_000_000;

proptest! {
    #[test]
    fn initial_deposit_mints_constant(amount_a in 1..=u64::MAX, amount_b in 1..=u64::MAX) {
        prop_assert_eq!(deposit_lp(amount_a, amount_b, 0, 0, 0), Ok(INITIAL_POOL_LP_AMOUNT));
    }

    #[test]
    fn proportional_deposit_never_exceeds_either_estimate(
        amount_a in 1..MAX_RESERVE,
        amount_b in 1..MAX_RESERVE,
        reserve_a in 1..MAX_RESERVE,
        reserve_b in 1..MAX_RESERVE,
        lp_supply in 1..MAX_RESERVE,
    ) {
        let from_a = floor_div(amount_a as u128 * lp_supply as u128, reserve_a as u128).unwrap();
        let from_b = floor_div(amount_b as u128 * lp_supply as u128, reserve_b as u128).unwrap();

        match deposit_lp(amount_a, amount_b, reserve_a, reserve_b, lp_supply) {
            Ok(lp) => {
                prop_assert!(lp as u128 <= from_a);
                prop_assert!(lp as u128 <= from_b);
            }
            Err(ErrorCode::ZeroLpTokens) => prop_assert_eq!(from_a.min(from_b), 0),
            Err(ErrorCode::AmountOverflow) => prop_assert!(from_a.min(from_b) > u64::MAX as u128),
            Err(e) => prop_assert!(false, "unexpected error {:?}", e),
        }
    }

    #[test]
    fn ceiling_at_least_floor(numerator in any::<u128>(), denominator in 1..=u128::MAX) {
        let floor = floor_div(numerator, denominator).unwrap();
        let ceiling = ceil_div(numerator, denominator).unwrap();
        prop_assert!(ceiling >= floor);
        prop_assert_eq!(ceiling == floor, numerator % denominator == 0);
    }

    #[test]
    fn ceiling_of_zero_is_zero(denominator in 1..=u128::MAX) {
        prop_assert_eq!(ceil_div(0, denominator), Ok(0));
    }

    #[test]
    fn deposit_then_withdraw_never_profits(
        amount_a in 1..MAX_RESERVE,
        amount_b in 1..MAX_RESERVE,
        reserve_a in 1..MAX_RESERVE,
        reserve_b in 1..MAX_RESERVE,
        lp_supply in 1..MAX_RESERVE,
    ) {
        let Ok(lp) = deposit_lp(amount_a, amount_b, reserve_a, reserve_b, lp_supply) else {
            return Ok(());
        };
        let (paid_a, paid_b) = required_tokens_for_lp(
            lp,
            lp_supply,
            reserve_a,
            reserve_b,
            RoundDirection::Ceiling,
        )
        .unwrap();
        prop_assert!(paid_a <= amount_a);
        prop_assert!(paid_b <= amount_b);

        let Some(supply_after) = lp_supply.checked_add(lp) else {
            return Ok(());
        };
        let (out_a, out_b) = withdraw_lp(
            lp,
            supply_after,
            reserve_a + paid_a,
            reserve_b + paid_b,
            WithdrawalFee::ZERO,
        )
        .unwrap();
        prop_assert!(out_a <= paid_a);
        prop_assert!(out_b <= paid_b);
    }

    #[test]
    fn withdrawal_fee_never_increases_output(
        lp in 1..MAX_RESERVE,
        reserve_a in 1..MAX_RESERVE,
        reserve_b in 1..MAX_RESERVE,
        extra_supply in 0..MAX_RESERVE,
        numerator in 0..=10_000u64,
    ) {
        let supply = lp + extra_supply;
        let fee = WithdrawalFee::new(numerator, 10_000).unwrap();
        let (with_fee_a, with_fee_b) = withdraw_lp(lp, supply, reserve_a, reserve_b, fee).unwrap();
        let (no_fee_a, no_fee_b) =
            withdraw_lp(lp, supply, reserve_a, reserve_b, WithdrawalFee::ZERO).unwrap();
        prop_assert!(with_fee_a <= no_fee_a && no_fee_a <= reserve_a);
        prop_assert!(with_fee_b <= no_fee_b && no_fee_b <= reserve_b);
    }

    #[test]
    fn slippage_bounds_monotonic(
        amount_a in 0..MAX_RESERVE,
        amount_b in 0..MAX_RESERVE,
        low in 10..=500u64,
        high in 10..=500u64,
    ) {
        let config = LiquidityConfig::default();
        let (low, high) = (low.min(high), low.max(high));

        let (max_low_a, max_low_b) = apply_deposit_slippage(amount_a, amount_b, low, &config).unwrap();
        let (max_high_a, max_high_b) = apply_deposit_slippage(amount_a, amount_b, high, &config).unwrap();
        prop_assert!(amount_a <= max_low_a && max_low_a <= max_high_a);
        prop_assert!(amount_b <= max_low_b && max_low_b <= max_high_b);

        let (min_low_a, min_low_b) = apply_withdrawal_slippage(amount_a, amount_b, low, &config).unwrap();
        let (min_high_a, min_high_b) = apply_withdrawal_slippage(amount_a, amount_b, high, &config).unwrap();
        prop_assert!(amount_a >= min_low_a && min_low_a >= min_high_a);
        prop_assert!(amount_b >= min_low_b && min_low_b >= min_high_b);
    }

    #[test]
    fn single_token_deposit_is_exact_floor(
        source_amount in any::<u64>(),
        source_reserve in 1..=u64::MAX,
        lp_supply in any::<u64>(),
    ) {
        // lp = floor(S * (sqrt(1 + a/R) - 1)) iff
        // (S + lp)^2 * R <= S^2 * (R + a) < (S + lp + 1)^2 * R
        let supply = U256::from(lp_supply);
        let reserve = U256::from(source_reserve);
        let target = supply * supply * (reserve + U256::from(source_amount));
        let below = |lp: U256| (supply + lp) * (supply + lp) * reserve <= target;

        match deposit_single_token(source_amount, source_reserve, lp_supply) {
            Ok(lp) => {
                let lp = U256::from(lp);
                prop_assert!(lp > U256::zero());
                prop_assert!(below(lp));
                prop_assert!(!below(lp + U256::one()));
            }
            Err(ErrorCode::ZeroLpTokens) => prop_assert!(!below(U256::one())),
            Err(ErrorCode::AmountOverflow) => {
                prop_assert!(below(U256::from(u64::MAX) + U256::one()))
            }
            Err(e) => prop_assert!(false, "unexpected error {:?}", e),
        }
    }

    #[test]
    fn single_token_deposit_below_linear_estimate(
        source_amount in 1..MAX_RESERVE,
        source_reserve in 1..MAX_RESERVE,
        lp_supply in 1..=u64::MAX,
    ) {
        // sqrt(1 + r) - 1 <= r / 2
        let linear = U256::from(source_amount) * U256::from(lp_supply)
            / (U256::from(2u64) * U256::from(source_reserve));
        match deposit_single_token(source_amount, source_reserve, lp_supply) {
            Ok(lp) => prop_assert!(U256::from(lp) <= linear, "lp {} linear {}", lp, linear),
            Err(ErrorCode::ZeroLpTokens) | Err(ErrorCode::AmountOverflow) => {}
            Err(e) => prop_assert!(false, "unexpected error {:?}", e),
        }
    }
}
