//! The pool a position is minted into.
//!
//! The position builder only reads the current price and spacing and asks
//! the pool to mint; token custody stays behind [`LiquidityPool`].

pub mod v3_pool;

use crate::error::Error;
use alloy_primitives::{Address, U256};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot0 {
    pub sqrt_price_x96: U256,
    pub tick: i32,
}

/// Standard fee tiers, each with its own tick spacing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeeAmount {
    Low,
    Medium,
    High,
}

impl FeeAmount {
    pub const fn fee_pips(self) -> u32 {
        match self {
            FeeAmount::Low => 500,
            FeeAmount::Medium => 3000,
            FeeAmount::High => 10_000,
        }
    }

    pub const fn tick_spacing(self) -> i32 {
        match self {
            FeeAmount::Low => 10,
            FeeAmount::Medium => 60,
            FeeAmount::High => 200,
        }
    }
}

/// Pool state and the single mutation a position needs.
pub trait LiquidityPool {
    /// Sets the starting price. Fails if the pool already has one.
    fn initialize(&mut self, sqrt_price_x96: U256) -> Result<(), Error>;

    fn slot0(&self) -> Slot0;

    fn tick_spacing(&self) -> i32;

    fn token0(&self) -> Address;

    fn token1(&self) -> Address;

    /// Adds `liquidity` on `[tick_lower, tick_upper)` and returns the
    /// `(amount0, amount1)` the depositor owes, rounded up.
    fn mint(
        &mut self,
        tick_lower: i32,
        tick_upper: i32,
        liquidity: u128,
    ) -> Result<(U256, U256), Error>;
}
