/// LP tokens minted for the first deposit into an empty pool, whatever the deposit ratio.
pub const INITIAL_POOL_LP_AMOUNT: u64 = 1_000_000_000;

/// 10^4 = 100%
pub const BASIS_POINTS_DENOMINATOR: u64 = 10_000;

/// 0.1%
pub const MIN_SLIPPAGE_BPS: u64 = 10;

/// 5%
pub const MAX_SLIPPAGE_BPS: u64 = 500;

/// Allowed deviation of a dual-token deposit from the pool ratio, 5%
pub const DEFAULT_RATIO_TOLERANCE_BPS: u64 = 500;
