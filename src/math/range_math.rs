use crate::error::{Error, MathError, RangeError};
use crate::math::bit_math::bit_length;
use crate::math::math_helpers::{mul_div, mul_div_rounding_up, sqrt, unlikely};
use crate::{MAX_SQRT_PRICE, Q192, Q96, U256_E4, WIDTH_SCALE};
use alloy_primitives::U256;

/// Amounts are scaled down to this many bits before entering the range
/// solver; only their ratio matters and `amount0 * sqrtPc` must fit 256 bits.
const AMOUNT_BITS: usize = 96;

#[inline(always)]
fn check_width(width: u16) -> Result<(), RangeError> {
    if unlikely(width >= WIDTH_SCALE) {
        return Err(RangeError::InvalidWidth(width));
    }
    Ok(())
}

#[inline(always)]
fn check_sqrt_price(sqrt_price_x96: U256) -> Result<(), RangeError> {
    if unlikely(sqrt_price_x96 > MAX_SQRT_PRICE) {
        return Err(RangeError::PriceOutOfRange);
    }
    Ok(())
}

/// Returns `sqrt((N - width) / (N + width))` in X96, rounded down.
///
/// This is the ratio `sqrtPl / sqrtPu` of any range whose width is `width`.
pub fn width_factor_x96(width: u16) -> Result<U256, RangeError> {
    check_width(width)?;
    let width = U256::from(width);
    Ok(sqrt(((U256_E4 - width) << 192) / (U256_E4 + width)))
}

/// Computes the lower sqrt price of a range of the given `width` that ends
/// at `sqrt_pu_x96`, i.e. `Pl = Pu * (N - width) / (N + width)`.
///
/// Rounds down, so the range is never narrower than requested. Width 0 is
/// the identity.
pub fn sqrt_lower_price_x96(sqrt_pu_x96: U256, width: u16) -> Result<U256, Error> {
    check_width(width)?;
    check_sqrt_price(sqrt_pu_x96)?;
    if width == 0 {
        return Ok(sqrt_pu_x96);
    }

    let factor = width_factor_x96(width)?;
    Ok(mul_div(sqrt_pu_x96, factor, Q96)?)
}

/// Computes the upper sqrt price of a range of the given `width` that starts
/// at `sqrt_pl_x96`, i.e. `Pu = Pl * (N + width) / (N - width)`.
///
/// Rounds up, so the range is never narrower than requested, and fails with
/// `PriceOutOfRange` when the bound leaves the representable range.
pub fn sqrt_upper_price_x96(sqrt_pl_x96: U256, width: u16) -> Result<U256, Error> {
    check_width(width)?;
    check_sqrt_price(sqrt_pl_x96)?;
    if width == 0 {
        return Ok(sqrt_pl_x96);
    }

    let factor = width_factor_x96(width)?;
    let sqrt_pu_x96 = mul_div_rounding_up(sqrt_pl_x96, Q96, factor)?;
    check_sqrt_price(sqrt_pu_x96)?;
    Ok(sqrt_pu_x96)
}

/// `(1 - v) + sqrt((1 - v)^2 + 4cv)` for `v` in `[0, 1]`, all in X96.
///
/// Both terms are non‑negative, so there is no cancellation. The X192
/// discriminant stays below `5 * 2^192`.
#[inline(always)]
fn quadratic_term(v: U256, factor: U256) -> U256 {
    let one_minus_v = Q96 - v;
    let discriminant = one_minus_v * one_minus_v + ((factor * v) << 2);
    one_minus_v + sqrt(discriminant)
}

/// Keeps `alpha` only if it satisfies `alpha > 1` and `alpha * c < 1`.
///
/// `c * alpha^2 + (t - 1) * alpha - t = 0` has roots whose product is
/// `-t / c < 0`; the negative root can never satisfy `alpha > 1`, so the
/// positive root is the only candidate.
fn admissible_root(alpha: U256, factor: U256) -> Result<U256, Error> {
    if alpha > Q96 && mul_div(alpha, factor, Q96)? < Q96 {
        Ok(alpha)
    } else {
        Err(RangeError::InfeasibleRange.into())
    }
}

fn normalize_amounts(amount0: U256, amount1: U256) -> (U256, U256) {
    let excess = bit_length(amount0.max(amount1)).saturating_sub(AMOUNT_BITS);
    (amount0 >> excess, amount1 >> excess)
}

/// Finds the range of the requested `width` around `sqrt_pc_x96` whose
/// token ratio matches `amount1 / amount0`.
///
/// With `C = sqrt((N - width) / (N + width))` the upper bound is
/// `Pu = Pc * alpha^2` and the lower bound `Pl = Pu * C^2`, where `alpha`
/// solves `C*Pc*alpha^2 + (r - Pc)*alpha - r = 0` for `r = amount1 / amount0`.
/// Dividing through by `Pc` leaves only `t = r / Pc`:
///
/// - `t <= 1`: `alpha = ((1 - t) + sqrt((1 - t)^2 + 4Ct)) / 2C`
/// - `t > 1`: `alpha = 2 / ((1 - u) + sqrt((1 - u)^2 + 4Cu))`, `u = 1 / t`
///
/// The upper bound rounds up and the lower bound down. Width 0 returns the
/// current price as both bounds; a zero amount cannot be matched by a
/// straddling range and fails with `InfeasibleRange`.
pub fn price_range_for_width(
    sqrt_pc_x96: U256,
    width: u16,
    amount0: U256,
    amount1: U256,
) -> Result<(U256, U256), Error> {
    check_width(width)?;
    check_sqrt_price(sqrt_pc_x96)?;
    if unlikely(sqrt_pc_x96.is_zero()) {
        return Err(RangeError::PriceOutOfRange.into());
    }
    if width == 0 {
        return Ok((sqrt_pc_x96, sqrt_pc_x96));
    }

    let (amount0, amount1) = normalize_amounts(amount0, amount1);
    if amount0.is_zero() || amount1.is_zero() {
        return Err(RangeError::InfeasibleRange.into());
    }

    let factor = width_factor_x96(width)?;

    // a0 * sqrtPc and a1 / sqrtPc on the same X96 scale; t is their ratio
    let value0 = amount0
        .checked_mul(sqrt_pc_x96)
        .ok_or(MathError::Overflow)?;
    let value1 = mul_div(amount1, Q192, sqrt_pc_x96)?;

    let alpha = if value1 <= value0 {
        let t = mul_div(value1, Q96, value0)?;
        mul_div(quadratic_term(t, factor), Q96, factor << 1)?
    } else {
        let u = mul_div(value0, Q96, value1)?;
        mul_div(Q96 << 1, Q96, quadratic_term(u, factor))?
    };
    let alpha = admissible_root(alpha, factor)?;

    let sqrt_pu_x96 = mul_div_rounding_up(sqrt_pc_x96, alpha, Q96)?;
    check_sqrt_price(sqrt_pu_x96)?;
    let sqrt_pl_x96 = sqrt_lower_price_x96(sqrt_pu_x96, width)?;

    if sqrt_pl_x96 >= sqrt_pc_x96 || sqrt_pc_x96 >= sqrt_pu_x96 {
        return Err(RangeError::InfeasibleRange.into());
    }
    Ok((sqrt_pl_x96, sqrt_pu_x96))
}

/// Recovers the width `N * (Pu - Pl) / (Pu + Pl)` of a range from its sqrt
/// price bounds, rounded to the nearest integer. Bound order does not matter.
pub fn width_from_sqrt_prices(sqrt_pa_x96: U256, sqrt_pb_x96: U256) -> Result<u16, Error> {
    let (sqrt_pl_x96, sqrt_pu_x96) = if sqrt_pa_x96 <= sqrt_pb_x96 {
        (sqrt_pa_x96, sqrt_pb_x96)
    } else {
        (sqrt_pb_x96, sqrt_pa_x96)
    };

    // (Pl / Pu) in X192, at most Q192
    let ratio = mul_div(sqrt_pl_x96, Q96, sqrt_pu_x96)?;
    let ratio_squared = ratio * ratio;

    let numerator = U256_E4 * (Q192 - ratio_squared);
    let denominator = Q192 + ratio_squared;
    let width = (numerator + (denominator >> 1)) / denominator;

    u16::try_from(width).map_err(|_| MathError::Overflow.into())
}

/// Encodes `sqrt(reserve1 / reserve0)` as an X96 sqrt price.
pub fn encode_sqrt_price_x96(reserve1: U256, reserve0: U256) -> Result<U256, Error> {
    Ok(sqrt(mul_div(reserve1, Q192, reserve0)?))
}
