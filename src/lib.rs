//! LP Math Library
//!
//! Integer-only liquidity-provider token math for a sharded constant-product DEX:
//! LP minting for deposits, token amounts for withdrawals, slippage bounds and
//! pre-flight validation. Rounding matches the on-chain program bit for bit.

pub mod constants;
pub mod errors;
pub mod liquidity;
pub mod quote;
pub mod slippage;
pub mod state;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod proptest_properties;

// Re-export functions for convenience
pub use constants::{BASIS_POINTS_DENOMINATOR, INITIAL_POOL_LP_AMOUNT};
pub use errors::{ErrorCode, LpError};
pub use liquidity::{deposit_lp, deposit_single_token, required_tokens_for_lp, withdraw_lp};
pub use quote::{DepositQuote, LpCalculator, SingleTokenDepositQuote, WithdrawalQuote};
pub use slippage::{apply_deposit_slippage, apply_withdrawal_slippage};
pub use state::{
    DepositRequest, LiquidityConfig, PoolState, RoundDirection, TradeDirection,
    WithdrawalFee, WithdrawalRequest,
};
pub use utils::{ceil_div, floor_div};
pub use validation::{
    pool_share, validate_deposit, validate_withdrawal, PoolShare, TokenField, ValidationError,
    ValidationErrorKind,
};
