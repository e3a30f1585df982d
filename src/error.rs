use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("Math error - overflow")]
    Overflow,
    #[error("Math error - underflow")]
    Underflow,
    #[error("Math error - division by zero")]
    DivisionByZero,
    #[error("BitMath error - zero input value")]
    ZeroValue,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    #[error("Range error - width {0} is outside [0, 10000)")]
    InvalidWidth(u16),
    #[error("Range error - no price range matches the requested width and amounts")]
    InfeasibleRange,
    #[error("Range error - sqrtPrice out of range")]
    PriceOutOfRange,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PositionError {
    #[error("Position error - amount0 and amount1 are both zero")]
    EmptyDeposit,
    #[error("Position error - deposit is too small for the snapped range")]
    ZeroLiquidity,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    #[error("State error - sqrtPrice out of bounds")]
    SqrtPriceOutOfBounds,
    #[error("State error - tick out of bounds")]
    TickOutOfBounds,
    #[error("State error - tick spacing must be positive")]
    InvalidTickSpacing,
    #[error("State error - ticks must be ordered multiples of the tick spacing")]
    InvalidTickRange,
    #[error("State error - liquidity is 0")]
    LiquidityIsZero,
    #[error("State error - pool is not initialized")]
    NotInitialized,
    #[error("State error - pool is already initialized")]
    AlreadyInitialized,
    #[error("State error - pool lock is poisoned")]
    PoolPoisoned,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    MathError(#[from] crate::error::MathError),

    #[error(transparent)]
    RangeError(#[from] crate::error::RangeError),

    #[error(transparent)]
    PositionError(#[from] crate::error::PositionError),

    #[error(transparent)]
    StateError(#[from] crate::error::StateError),
}
