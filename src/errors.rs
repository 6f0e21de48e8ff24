use anchor_lang::prelude::error_code;
use thiserror::Error;

use crate::validation::ValidationError;

#[error_code]
#[derive(PartialEq, Eq)]
pub enum ErrorCode {
    #[msg("Division by zero")]
    DivisionByZero,
    #[msg("Amount exceeds u64 range")]
    AmountOverflow,
    #[msg("Pool has LP supply but a zero reserve")]
    ZeroReserves,
    #[msg("Pool has no LP supply")]
    ZeroLpSupply,
    #[msg("Deposit would mint zero LP tokens")]
    ZeroLpTokens,
    #[msg("Source token reserve is 0")]
    ZeroSourceReserve,
    #[msg("Invalid initial deposit, both token amounts must be positive")]
    InvalidInitialDeposit,
    #[msg("Insufficient pool liquidity")]
    InsufficientLiquidity,
    #[msg("Slippage tolerance out of range")]
    ToleranceOutOfRange,
    #[msg("Validation failed")]
    ValidationFailed,
    #[msg("Invalid withdrawal fee")]
    InvalidFee,
    #[msg("Invalid liquidity config")]
    InvalidConfig,
}

/// Error returned by the quote layer: either a single fatal calculation error or every
/// validation problem found in the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LpError {
    #[error("{0}")]
    Math(ErrorCode),
    #[error("validation failed: {}", summarize(.0))]
    ValidationFailed(Vec<ValidationError>),
}

impl LpError {
    /// Collapses into the on-chain style error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            LpError::Math(code) => *code,
            LpError::ValidationFailed(_) => ErrorCode::ValidationFailed,
        }
    }

    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            LpError::Math(_) => &[],
            LpError::ValidationFailed(errors) => errors,
        }
    }
}

impl From<ErrorCode> for LpError {
    fn from(code: ErrorCode) -> Self {
        LpError::Math(code)
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{TokenField, ValidationErrorKind};

    #[test]
    fn test_math_error_display_uses_msg() {
        let err = LpError::from(ErrorCode::ZeroLpSupply);
        assert_eq!(err.to_string(), "Pool has no LP supply");
        assert_eq!(err.code(), ErrorCode::ZeroLpSupply);
        assert!(err.validation_errors().is_empty());
    }

    #[test]
    fn test_validation_failed_lists_every_error() {
        let err = LpError::ValidationFailed(vec![
            ValidationError::new(
                ValidationErrorKind::ZeroAmount,
                TokenField::TokenA,
                0,
                "token A amount must be greater than 0",
            ),
            ValidationError::new(
                ValidationErrorKind::InsufficientBalance,
                TokenField::TokenB,
                50,
                "token B amount 50 exceeds balance 10",
            ),
        ]);
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert_eq!(err.validation_errors().len(), 2);
        assert_eq!(
            err.to_string(),
            "validation failed: token A amount must be greater than 0; token B amount 50 exceeds balance 10"
        );
    }
}
