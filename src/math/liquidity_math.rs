use crate::error::{Error, MathError};
use crate::math::math_helpers::mul_div;
use crate::math::range_math::price_range_for_width;
use crate::math::sqrt_price_math::{get_amount_0_delta, get_amount_1_delta};
use crate::{Q96, RESOLUTION};
use alloy_primitives::aliases::U512;
use alloy_primitives::U256;

/// Applies a signed liquidity delta, failing instead of wrapping.
pub fn add_delta(x: u128, y: i128) -> Result<u128, MathError> {
    if y < 0 {
        x.checked_sub(y.unsigned_abs()).ok_or(MathError::Underflow)
    } else {
        x.checked_add(y as u128).ok_or(MathError::Overflow)
    }
}

#[inline(always)]
fn ordered(sqrt_pa_x96: U256, sqrt_pb_x96: U256) -> (U256, U256) {
    if sqrt_pa_x96 > sqrt_pb_x96 {
        (sqrt_pb_x96, sqrt_pa_x96)
    } else {
        (sqrt_pa_x96, sqrt_pb_x96)
    }
}

#[inline(always)]
fn to_liquidity(liquidity: U256) -> Result<u128, MathError> {
    u128::try_from(liquidity).map_err(|_| MathError::Overflow)
}

#[inline(always)]
fn widen(x: U256) -> U512 {
    let [l0, l1, l2, l3] = x.into_limbs();
    U512::from_limbs([l0, l1, l2, l3, 0, 0, 0, 0])
}

#[inline(always)]
fn narrow(x: U512) -> Result<U256, MathError> {
    let limbs = x.into_limbs();
    if limbs[4..].iter().any(|&limb| limb != 0) {
        return Err(MathError::Overflow);
    }
    Ok(U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

// amount0 * sqrtPl * sqrtPu / ((sqrtPu - sqrtPl) << 96), bounds already ordered.
// Floored once over the full product. A product past 512 bits implies a
// liquidity far beyond u128.
fn liquidity0(sqrt_pl_x96: U256, sqrt_pu_x96: U256, amount0: U256) -> Result<U256, MathError> {
    let denominator = widen(sqrt_pu_x96 - sqrt_pl_x96) << RESOLUTION;
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let numerator = widen(amount0)
        .checked_mul(widen(sqrt_pl_x96))
        .and_then(|product| product.checked_mul(widen(sqrt_pu_x96)))
        .ok_or(MathError::Overflow)?;
    narrow(numerator / denominator)
}

// amount1 / (sqrtPu - sqrtPl), bounds already ordered
fn liquidity1(sqrt_pl_x96: U256, sqrt_pu_x96: U256, amount1: U256) -> Result<U256, MathError> {
    mul_div(amount1, Q96, sqrt_pu_x96 - sqrt_pl_x96)
}

/// Liquidity supported by `amount0` over a range wholly above the current
/// price. Rounds down; equal bounds fail with `DivisionByZero`.
pub fn liquidity_for_region_above_current_price(
    sqrt_pa_x96: U256,
    sqrt_pb_x96: U256,
    amount0: U256,
) -> Result<u128, Error> {
    let (sqrt_pl_x96, sqrt_pu_x96) = ordered(sqrt_pa_x96, sqrt_pb_x96);
    Ok(to_liquidity(liquidity0(sqrt_pl_x96, sqrt_pu_x96, amount0)?)?)
}

/// Liquidity supported by `amount1` over a range wholly below the current
/// price. Rounds down; equal bounds fail with `DivisionByZero`.
pub fn liquidity_for_region_below_current_price(
    sqrt_pa_x96: U256,
    sqrt_pb_x96: U256,
    amount1: U256,
) -> Result<u128, Error> {
    let (sqrt_pl_x96, sqrt_pu_x96) = ordered(sqrt_pa_x96, sqrt_pb_x96);
    Ok(to_liquidity(liquidity1(sqrt_pl_x96, sqrt_pu_x96, amount1)?)?)
}

/// Largest liquidity that `amount0` and `amount1` can both fund over
/// `[sqrtPl, sqrtPu]` given the current price.
///
/// Below the range only token0 counts, above it only token1; inside it
/// the smaller of the two sub-range liquidities wins.
pub fn liquidity_for_region_at_current_price(
    sqrt_pc_x96: U256,
    sqrt_pa_x96: U256,
    sqrt_pb_x96: U256,
    amount0: U256,
    amount1: U256,
) -> Result<u128, Error> {
    let (sqrt_pl_x96, sqrt_pu_x96) = ordered(sqrt_pa_x96, sqrt_pb_x96);

    let liquidity = if sqrt_pc_x96 <= sqrt_pl_x96 {
        liquidity0(sqrt_pl_x96, sqrt_pu_x96, amount0)?
    } else if sqrt_pc_x96 < sqrt_pu_x96 {
        let from_amount0 = liquidity0(sqrt_pc_x96, sqrt_pu_x96, amount0)?;
        let from_amount1 = liquidity1(sqrt_pl_x96, sqrt_pc_x96, amount1)?;
        from_amount0.min(from_amount1)
    } else {
        liquidity1(sqrt_pl_x96, sqrt_pu_x96, amount1)?
    };

    Ok(to_liquidity(liquidity)?)
}

/// Sizes a straddling position of the given `width` in one step: solves
/// the range with [`price_range_for_width`] and returns
/// `(liquidity, sqrt_pl_x96, sqrt_pu_x96)`.
///
/// A zero width collapses the range onto the current price and supports no
/// liquidity.
pub fn liquidity_for_width(
    sqrt_pc_x96: U256,
    width: u16,
    amount0: U256,
    amount1: U256,
) -> Result<(u128, U256, U256), Error> {
    let (sqrt_pl_x96, sqrt_pu_x96) = price_range_for_width(sqrt_pc_x96, width, amount0, amount1)?;
    if sqrt_pl_x96 == sqrt_pu_x96 {
        return Ok((0, sqrt_pl_x96, sqrt_pu_x96));
    }

    let liquidity =
        liquidity_for_region_at_current_price(sqrt_pc_x96, sqrt_pl_x96, sqrt_pu_x96, amount0, amount1)?;
    Ok((liquidity, sqrt_pl_x96, sqrt_pu_x96))
}

/// Token amounts represented by `liquidity` over `[sqrtPl, sqrtPu]` at the
/// current price; the inverse of [`liquidity_for_region_at_current_price`].
///
/// Pass `round_up = true` for amounts a depositor owes.
pub fn amounts_for_liquidity(
    sqrt_pc_x96: U256,
    sqrt_pa_x96: U256,
    sqrt_pb_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<(U256, U256), Error> {
    let (sqrt_pl_x96, sqrt_pu_x96) = ordered(sqrt_pa_x96, sqrt_pb_x96);

    if sqrt_pc_x96 <= sqrt_pl_x96 {
        let amount0 = get_amount_0_delta(sqrt_pl_x96, sqrt_pu_x96, liquidity, round_up)?;
        Ok((amount0, U256::ZERO))
    } else if sqrt_pc_x96 < sqrt_pu_x96 {
        let amount0 = get_amount_0_delta(sqrt_pc_x96, sqrt_pu_x96, liquidity, round_up)?;
        let amount1 = get_amount_1_delta(sqrt_pl_x96, sqrt_pc_x96, liquidity, round_up)?;
        Ok((amount0, amount1))
    } else {
        let amount1 = get_amount_1_delta(sqrt_pl_x96, sqrt_pu_x96, liquidity, round_up)?;
        Ok((U256::ZERO, amount1))
    }
}
