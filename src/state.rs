use borsh::{BorshDeserialize, BorshSerialize};

use crate::{
    constants::{
        BASIS_POINTS_DENOMINATOR, DEFAULT_RATIO_TOLERANCE_BPS, MAX_SLIPPAGE_BPS, MIN_SLIPPAGE_BPS,
    },
    ErrorCode,
};

/// Which way a division result is rounded.
///
/// Amounts a depositor must supply round up, amounts owed to a user round down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundDirection {
    Floor,
    Ceiling,
}

/// Which pool reserve a single-token deposit adds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeDirection {
    AtoB,
    BtoA,
}

/// Freshly read on-chain state of one pool shard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolState {
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub lp_supply: u64,
}

impl PoolState {
    pub fn new(reserve_a: u64, reserve_b: u64, lp_supply: u64) -> Self {
        Self {
            reserve_a,
            reserve_b,
            lp_supply,
        }
    }

    /// A pool that never received a deposit.
    pub fn is_empty(&self) -> bool {
        self.lp_supply == 0
    }

    pub fn source_reserve(&self, direction: TradeDirection) -> u64 {
        match direction {
            TradeDirection::AtoB => self.reserve_a,
            TradeDirection::BtoA => self.reserve_b,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositRequest {
    pub amount_a: u64,
    pub amount_b: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawalRequest {
    pub lp_token_amount: u64,
}

/// Fraction of burned LP tokens kept by the pool on withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawalFee {
    pub numerator: u64,
    pub denominator: u64,
}

impl WithdrawalFee {
    pub const ZERO: WithdrawalFee = WithdrawalFee {
        numerator: 0,
        denominator: 1,
    };

    pub fn new(numerator: u64, denominator: u64) -> Result<Self, ErrorCode> {
        if denominator == 0 || numerator > denominator {
            return Err(ErrorCode::InvalidFee);
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct LiquidityConfig {
    pub withdrawal_fee_numerator: u64,
    pub withdrawal_fee_denominator: u64,
    pub min_slippage_bps: u64,    // 10^4 = 100%
    pub max_slippage_bps: u64,    // 10^4 = 100%
    pub ratio_tolerance_bps: u64, // 10^4 = 100%
}

impl Default for LiquidityConfig {
    fn default() -> Self {
        Self {
            withdrawal_fee_numerator: 0,
            withdrawal_fee_denominator: BASIS_POINTS_DENOMINATOR,
            min_slippage_bps: MIN_SLIPPAGE_BPS,
            max_slippage_bps: MAX_SLIPPAGE_BPS,
            ratio_tolerance_bps: DEFAULT_RATIO_TOLERANCE_BPS,
        }
    }
}

impl LiquidityConfig {
    pub fn validate(&self) -> Result<(), ErrorCode> {
        self.withdrawal_fee()?;
        if self.min_slippage_bps > self.max_slippage_bps
            || self.max_slippage_bps > BASIS_POINTS_DENOMINATOR
        {
            return Err(ErrorCode::InvalidConfig);
        }
        Ok(())
    }

    pub fn withdrawal_fee(&self) -> Result<WithdrawalFee, ErrorCode> {
        WithdrawalFee::new(self.withdrawal_fee_numerator, self.withdrawal_fee_denominator)
    }

    pub fn is_slippage_in_range(&self, tolerance_bps: u64) -> bool {
        (self.min_slippage_bps..=self.max_slippage_bps).contains(&tolerance_bps)
    }
}
