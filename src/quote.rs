//! Caller-facing quotes: validation, pool math, slippage bounds and pool share in one call.

use crate::{
    errors::LpError,
    liquidity::{deposit_lp, deposit_single_token, required_tokens_for_lp, withdraw_lp},
    slippage::{apply_deposit_slippage, apply_withdrawal_slippage, min_with_slippage},
    state::{
        DepositRequest, LiquidityConfig, PoolState, RoundDirection, TradeDirection,
        WithdrawalRequest,
    },
    validation::{
        pool_share, validate_deposit, validate_slippage, validate_withdrawal, PoolShare,
        TokenField, ValidationError, ValidationErrorKind,
    },
    ErrorCode,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositQuote {
    pub lp_tokens: u64,
    /// Token amounts the pool takes for `lp_tokens`, rounded up
    pub required_token_a: u64,
    pub required_token_b: u64,
    pub max_token_a: u64,
    pub max_token_b: u64,
    /// Depositor's share of the pool once the deposit lands
    pub pool_share: PoolShare,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalQuote {
    pub token_a: u64,
    pub token_b: u64,
    pub min_token_a: u64,
    pub min_token_b: u64,
    /// Share of the pool still held after burning
    pub remaining_pool_share: PoolShare,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleTokenDepositQuote {
    pub lp_tokens: u64,
    pub min_lp_tokens: u64,
    pub pool_share: PoolShare,
}

/// Quotes liquidity operations against caller-supplied pool state.
///
/// Holds nothing but its policy, so a single instance can be shared freely between
/// callers.
#[derive(Debug, Clone, Default)]
pub struct LpCalculator {
    config: LiquidityConfig,
}

impl LpCalculator {
    pub fn new(config: LiquidityConfig) -> Result<Self, LpError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LiquidityConfig {
        &self.config
    }

    pub fn quote_deposit(
        &self,
        pool: &PoolState,
        request: DepositRequest,
        balance_a: u64,
        balance_b: u64,
        slippage_bps: u64,
    ) -> Result<DepositQuote, LpError> {
        log_math_error(
            "deposit quote",
            self.deposit_quote(pool, request, balance_a, balance_b, slippage_bps),
        )
    }

    pub fn quote_withdrawal(
        &self,
        pool: &PoolState,
        request: WithdrawalRequest,
        user_lp_balance: u64,
        slippage_bps: u64,
    ) -> Result<WithdrawalQuote, LpError> {
        log_math_error(
            "withdrawal quote",
            self.withdrawal_quote(pool, request, user_lp_balance, slippage_bps),
        )
    }

    pub fn quote_single_token_deposit(
        &self,
        pool: &PoolState,
        direction: TradeDirection,
        source_amount: u64,
        source_balance: u64,
        slippage_bps: u64,
    ) -> Result<SingleTokenDepositQuote, LpError> {
        log_math_error(
            "single token deposit quote",
            self.single_token_deposit_quote(
                pool,
                direction,
                source_amount,
                source_balance,
                slippage_bps,
            ),
        )
    }

    fn deposit_quote(
        &self,
        pool: &PoolState,
        request: DepositRequest,
        balance_a: u64,
        balance_b: u64,
        slippage_bps: u64,
    ) -> Result<DepositQuote, LpError> {
        let mut errors = validate_deposit(
            request.amount_a,
            request.amount_b,
            pool.reserve_a,
            pool.reserve_b,
            balance_a,
            balance_b,
            &self.config,
        );
        errors.extend(validate_slippage(slippage_bps, &self.config));
        reject_if_any(errors)?;

        let lp_tokens = deposit_lp(
            request.amount_a,
            request.amount_b,
            pool.reserve_a,
            pool.reserve_b,
            pool.lp_supply,
        )?;

        let (required_token_a, required_token_b) = if pool.is_empty() {
            (request.amount_a, request.amount_b)
        } else {
            required_tokens_for_lp(
                lp_tokens,
                pool.lp_supply,
                pool.reserve_a,
                pool.reserve_b,
                RoundDirection::Ceiling,
            )?
        };

        let (max_token_a, max_token_b) = apply_deposit_slippage(
            required_token_a,
            required_token_b,
            slippage_bps,
            &self.config,
        )?;

        let total_after = pool
            .lp_supply
            .checked_add(lp_tokens)
            .ok_or(ErrorCode::AmountOverflow)?;
        let pool_share = pool_share(lp_tokens, total_after)?;

        log::debug!(
            "deposit quote: {} LP for {}/{} (max {}/{}), share {}",
            lp_tokens,
            required_token_a,
            required_token_b,
            max_token_a,
            max_token_b,
            pool_share
        );

        Ok(DepositQuote {
            lp_tokens,
            required_token_a,
            required_token_b,
            max_token_a,
            max_token_b,
            pool_share,
        })
    }

    fn withdrawal_quote(
        &self,
        pool: &PoolState,
        request: WithdrawalRequest,
        user_lp_balance: u64,
        slippage_bps: u64,
    ) -> Result<WithdrawalQuote, LpError> {
        let mut errors = validate_withdrawal(request.lp_token_amount, user_lp_balance);
        errors.extend(validate_slippage(slippage_bps, &self.config));
        if user_lp_balance > pool.lp_supply {
            errors.push(ValidationError::new(
                ValidationErrorKind::BalanceExceedsSupply,
                TokenField::LpToken,
                user_lp_balance,
                format!(
                    "LP balance {} exceeds pool supply {}",
                    user_lp_balance, pool.lp_supply
                ),
            ));
        }
        reject_if_any(errors)?;

        let (token_a, token_b) = withdraw_lp(
            request.lp_token_amount,
            pool.lp_supply,
            pool.reserve_a,
            pool.reserve_b,
            self.config.withdrawal_fee()?,
        )?;
        let (min_token_a, min_token_b) =
            apply_withdrawal_slippage(token_a, token_b, slippage_bps, &self.config)?;

        let remaining_lp = user_lp_balance - request.lp_token_amount;
        let remaining_supply = pool.lp_supply - request.lp_token_amount;
        let remaining_pool_share = if remaining_supply == 0 {
            PoolShare::default()
        } else {
            pool_share(remaining_lp, remaining_supply)?
        };

        log::debug!(
            "withdrawal quote: {} LP -> {}/{} (min {}/{})",
            request.lp_token_amount,
            token_a,
            token_b,
            min_token_a,
            min_token_b
        );

        Ok(WithdrawalQuote {
            token_a,
            token_b,
            min_token_a,
            min_token_b,
            remaining_pool_share,
        })
    }

    fn single_token_deposit_quote(
        &self,
        pool: &PoolState,
        direction: TradeDirection,
        source_amount: u64,
        source_balance: u64,
        slippage_bps: u64,
    ) -> Result<SingleTokenDepositQuote, LpError> {
        let field = match direction {
            TradeDirection::AtoB => TokenField::TokenA,
            TradeDirection::BtoA => TokenField::TokenB,
        };

        let mut errors = Vec::new();
        if source_amount == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroAmount,
                field,
                source_amount,
                format!("{} amount must be greater than 0", field),
            ));
        } else if source_amount > source_balance {
            errors.push(ValidationError::new(
                ValidationErrorKind::InsufficientBalance,
                field,
                source_amount,
                format!(
                    "{} amount {} exceeds balance {}",
                    field, source_amount, source_balance
                ),
            ));
        }
        errors.extend(validate_slippage(slippage_bps, &self.config));
        reject_if_any(errors)?;

        let lp_tokens =
            deposit_single_token(source_amount, pool.source_reserve(direction), pool.lp_supply)?;
        let min_lp_tokens = min_with_slippage(lp_tokens, slippage_bps)?;

        let total_after = pool
            .lp_supply
            .checked_add(lp_tokens)
            .ok_or(ErrorCode::AmountOverflow)?;
        let pool_share = pool_share(lp_tokens, total_after)?;

        log::debug!(
            "single token deposit quote: {} {} -> {} LP (min {})",
            source_amount,
            field,
            lp_tokens,
            min_lp_tokens
        );

        Ok(SingleTokenDepositQuote {
            lp_tokens,
            min_lp_tokens,
            pool_share,
        })
    }
}

/// Logs a fatal calculation error before it leaves the quote layer.
fn log_math_error<T>(operation: &str, result: Result<T, LpError>) -> Result<T, LpError> {
    if let Err(LpError::Math(code)) = &result {
        log::warn!("{} rejected: {}", operation, code);
    }
    result
}

fn reject_if_any(errors: Vec<ValidationError>) -> Result<(), LpError> {
    if errors.is_empty() {
        return Ok(());
    }
    log::debug!("rejected with {} validation error(s)", errors.len());
    Err(LpError::ValidationFailed(errors))
}
