//! Position builder: from a width and a deposit budget to a tick‑aligned
//! range, its liquidity and the amounts the pool collects.
//!
//! The range depends on which amounts are non‑zero:
//! - only `amount1`: a range wholly below the current price,
//! - only `amount0`: a range wholly above it,
//! - both: a straddling range whose token ratio matches the deposit.
//!
//! Raw bounds are snapped outwards to the pool's tick spacing, so the final
//! range is never narrower than requested, and liquidity is recomputed on
//! the snapped bounds. Owed amounts never exceed the deposit.

use crate::error::{Error, PositionError, RangeError, StateError};
use crate::math::liquidity_math::{
    amounts_for_liquidity, liquidity_for_region_at_current_price, liquidity_for_width,
};
use crate::math::range_math::{sqrt_lower_price_x96, sqrt_upper_price_x96, width_from_sqrt_prices};
use crate::math::tick_math::{
    get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, max_usable_tick, min_usable_tick,
};
use crate::math::tick_rounding::{Rounding, round_tick};
use crate::pool::{LiquidityPool, Slot0};
use crate::WIDTH_SCALE;
use alloy_primitives::U256;
use std::sync::Mutex;
use tracing::{debug, instrument, trace};

/// A position sized against the current pool state but not yet minted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionPlan {
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub sqrt_pl_x96: U256,
    pub sqrt_pu_x96: U256,
    pub liquidity: u128,
    /// Expected owed amounts, rounded up as the pool charges them.
    pub amount0_owed: U256,
    pub amount1_owed: U256,
}

/// A minted position and the amounts the pool charged for it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionResult {
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub sqrt_pl_x96: U256,
    pub sqrt_pu_x96: U256,
    pub liquidity: u128,
    pub amount0_owed: U256,
    pub amount1_owed: U256,
}

impl PositionPlan {
    /// Width of the snapped range.
    pub fn effective_width(&self) -> Result<u16, Error> {
        width_from_sqrt_prices(self.sqrt_pl_x96, self.sqrt_pu_x96)
    }
}

impl PositionResult {
    /// Width of the minted range.
    pub fn effective_width(&self) -> Result<u16, Error> {
        width_from_sqrt_prices(self.sqrt_pl_x96, self.sqrt_pu_x96)
    }
}

fn validate(width: u16, amount0: U256, amount1: U256) -> Result<(), Error> {
    if width >= WIDTH_SCALE {
        return Err(RangeError::InvalidWidth(width).into());
    }
    if amount0.is_zero() && amount1.is_zero() {
        return Err(PositionError::EmptyDeposit.into());
    }
    Ok(())
}

// Tick domain failures surface as the range leaving the representable prices.
#[inline(always)]
fn sqrt_price_at(tick: i32) -> Result<U256, Error> {
    get_sqrt_ratio_at_tick(tick).map_err(|_| RangeError::PriceOutOfRange.into())
}

#[inline(always)]
fn tick_at(sqrt_price_x96: U256) -> Result<i32, Error> {
    get_tick_at_sqrt_ratio(sqrt_price_x96).map_err(|_| RangeError::PriceOutOfRange.into())
}

#[inline(always)]
fn snap(tick: i32, tick_spacing: i32, rounding: Rounding) -> Result<i32, Error> {
    round_tick(tick, tick_spacing, rounding).map_err(|err| match err {
        StateError::InvalidTickSpacing => err.into(),
        _ => RangeError::PriceOutOfRange.into(),
    })
}

/// Tick range for the deposit, snapped outwards to `tick_spacing`.
fn snapped_ticks(
    slot0: Slot0,
    tick_spacing: i32,
    width: u16,
    amount0: U256,
    amount1: U256,
) -> Result<(i32, i32), Error> {
    let (tick_lower, tick_upper) = if amount0.is_zero() {
        // below the price: anchor the upper bound at or under the current tick
        let tick_upper = snap(slot0.tick + 1, tick_spacing, Rounding::Down)?;
        let sqrt_pl_x96 = sqrt_lower_price_x96(sqrt_price_at(tick_upper)?, width)?;
        let raw_lower = tick_at(sqrt_pl_x96)?;
        trace!(tick_upper, raw_lower, "range below current price");

        let tick_lower = snap((raw_lower + 1).min(tick_upper), tick_spacing, Rounding::Down)?;
        (tick_lower, tick_upper)
    } else if amount1.is_zero() {
        // above the price: anchor the lower bound strictly over the current tick
        let tick_lower = snap(slot0.tick + 1, tick_spacing, Rounding::Up)?;
        let sqrt_pu_x96 = sqrt_upper_price_x96(sqrt_price_at(tick_lower)?, width)?;
        let raw_upper = tick_at(sqrt_pu_x96)?;
        trace!(tick_lower, raw_upper, "range above current price");

        let tick_upper = snap(raw_upper + 1, tick_spacing, Rounding::Up)?;
        (tick_lower, tick_upper)
    } else {
        let (sqrt_pl_x96, sqrt_pu_x96) = if width == 0 {
            (slot0.sqrt_price_x96, slot0.sqrt_price_x96)
        } else {
            let (estimate, sqrt_pl_x96, sqrt_pu_x96) =
                liquidity_for_width(slot0.sqrt_price_x96, width, amount0, amount1)?;
            debug!(estimate, sqrt_pl_x96 = %sqrt_pl_x96, sqrt_pu_x96 = %sqrt_pu_x96, "raw straddling range");
            (sqrt_pl_x96, sqrt_pu_x96)
        };

        let tick_lower = snap(tick_at(sqrt_pl_x96)? + 1, tick_spacing, Rounding::Down)?;
        let tick_upper = snap(tick_at(sqrt_pu_x96)? + 1, tick_spacing, Rounding::Up)?;
        (tick_lower, tick_upper)
    };

    if tick_lower < min_usable_tick(tick_spacing)? || tick_upper > max_usable_tick(tick_spacing)? {
        return Err(RangeError::PriceOutOfRange.into());
    }
    Ok((tick_lower, tick_upper))
}

/// Sizes a position against the current state of `pool` without minting.
///
/// Fails with `InvalidWidth`, `EmptyDeposit` or `NotInitialized` before any
/// arithmetic, and with `ZeroLiquidity` when the deposit cannot fund a
/// single unit of liquidity on the snapped range.
#[instrument(level = "debug", skip(pool), err)]
pub fn plan_position<P: LiquidityPool + ?Sized>(
    pool: &P,
    width: u16,
    amount0: U256,
    amount1: U256,
) -> Result<PositionPlan, Error> {
    validate(width, amount0, amount1)?;

    let slot0 = pool.slot0();
    if slot0.sqrt_price_x96.is_zero() {
        return Err(StateError::NotInitialized.into());
    }
    let tick_spacing = pool.tick_spacing();

    let (tick_lower, tick_upper) = snapped_ticks(slot0, tick_spacing, width, amount0, amount1)?;
    let sqrt_pl_x96 = sqrt_price_at(tick_lower)?;
    let sqrt_pu_x96 = sqrt_price_at(tick_upper)?;

    let liquidity = liquidity_for_region_at_current_price(
        slot0.sqrt_price_x96,
        sqrt_pl_x96,
        sqrt_pu_x96,
        amount0,
        amount1,
    )?;
    if liquidity == 0 {
        return Err(PositionError::ZeroLiquidity.into());
    }

    let (amount0_owed, amount1_owed) =
        amounts_for_liquidity(slot0.sqrt_price_x96, sqrt_pl_x96, sqrt_pu_x96, liquidity, true)?;

    debug!(
        token0 = %pool.token0(),
        token1 = %pool.token1(),
        tick = slot0.tick,
        tick_lower,
        tick_upper,
        liquidity,
        "position planned"
    );

    Ok(PositionPlan {
        tick_lower,
        tick_upper,
        sqrt_pl_x96,
        sqrt_pu_x96,
        liquidity,
        amount0_owed,
        amount1_owed,
    })
}

/// Sizes a position with [`plan_position`] and mints it into `pool`.
///
/// The pool is only touched by the final mint; any failure before it leaves
/// the pool unchanged.
#[instrument(level = "debug", skip(pool), err)]
pub fn create_position<P: LiquidityPool + ?Sized>(
    pool: &mut P,
    width: u16,
    amount0: U256,
    amount1: U256,
) -> Result<PositionResult, Error> {
    let plan = plan_position(&*pool, width, amount0, amount1)?;
    let (amount0_owed, amount1_owed) = pool.mint(plan.tick_lower, plan.tick_upper, plan.liquidity)?;

    Ok(PositionResult {
        tick_lower: plan.tick_lower,
        tick_upper: plan.tick_upper,
        sqrt_pl_x96: plan.sqrt_pl_x96,
        sqrt_pu_x96: plan.sqrt_pu_x96,
        liquidity: plan.liquidity,
        amount0_owed,
        amount1_owed,
    })
}

/// [`create_position`] on a shared pool. The lock is held from the price
/// read through the mint.
pub fn create_position_locked<P: LiquidityPool>(
    pool: &Mutex<P>,
    width: u16,
    amount0: U256,
    amount1: U256,
) -> Result<PositionResult, Error> {
    let mut pool = pool.lock().map_err(|_| StateError::PoolPoisoned)?;
    create_position(&mut *pool, width, amount0, amount1)
}
