use crate::error::MathError;
use crate::math::bit_math::most_significant_bit;
use alloy_primitives::U256;

const U256_ONE: U256 = U256::ONE;
const U256_TWO: U256 = U256::from_limbs([2, 0, 0, 0]);
const U256_THREE: U256 = U256::from_limbs([3, 0, 0, 0]);

#[inline(always)]
#[cold]
const fn cold_path() {}

#[inline(always)]
pub(crate) const fn likely(b: bool) -> bool {
    if !b {
        cold_path();
    }
    b
}

#[inline(always)]
pub(crate) const fn unlikely(b: bool) -> bool {
    if b {
        cold_path();
    }
    b
}

/// Computes `a * b / denominator` with full 512‑bit precision,
/// returning a `MathError` on overflow or division by zero.
///
/// When the product fits in 256 bits this is a single native division;
/// otherwise the high word of the product is folded back in with a
/// modular inverse of the denominator, mirroring Solidity's
/// `FullMath.mulDiv`.
#[inline(always)]
pub fn mul_div(a: U256, b: U256, mut denominator: U256) -> Result<U256, MathError> {
    if unlikely(denominator.is_zero()) {
        return Err(MathError::DivisionByZero);
    }

    let mm = a.mul_mod(b, U256::MAX);
    let mut prod0 = a.wrapping_mul(b);

    let (mut prod1, borrow1) = mm.overflowing_sub(prod0);
    if borrow1 {
        prod1 = prod1.wrapping_sub(U256_ONE);
    }

    if likely(prod1.is_zero()) {
        return Ok(prod0.wrapping_div(denominator));
    }

    if unlikely(denominator <= prod1) {
        return Err(MathError::Overflow);
    }

    let remainder = a.mul_mod(b, denominator);
    let (prod0_new, borrow2) = prod0.overflowing_sub(remainder);
    prod0 = prod0_new;
    if borrow2 {
        prod1 = prod1.wrapping_sub(U256_ONE);
    }

    let twos = denominator & denominator.wrapping_neg();
    denominator = denominator.wrapping_div(twos);
    prod0 = prod0.wrapping_div(twos);

    let twos_adj = twos
        .wrapping_neg()
        .wrapping_div(twos)
        .wrapping_add(U256_ONE);
    prod0 |= prod1.wrapping_mul(twos_adj);

    let mut inv = U256_THREE.wrapping_mul(denominator) ^ U256_TWO;

    macro_rules! newton_iteration {
        () => {
            inv = inv.wrapping_mul(U256_TWO.wrapping_sub(denominator.wrapping_mul(inv)))
        };
    }

    newton_iteration!();
    newton_iteration!();
    newton_iteration!();
    newton_iteration!();
    newton_iteration!();
    newton_iteration!();

    Ok(prod0.wrapping_mul(inv))
}

/// Like [`mul_div`], but rounds the result up when there is a
/// non‑zero remainder, returning an overflow error if the result
/// would exceed `U256::MAX`.
#[inline(always)]
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    let mut result = mul_div(a, b, denominator)?;

    if a.mul_mod(b, denominator) > U256::ZERO {
        if result >= U256::MAX {
            return Err(MathError::Overflow);
        }
        result += U256::ONE;
    }
    Ok(result)
}

/// Divides `a` by `b`, rounding the result up to the next integer
/// when there is a non‑zero remainder.
#[inline(always)]
pub fn div_rounding_up(a: U256, b: U256) -> Result<U256, MathError> {
    if unlikely(b.is_zero()) {
        return Err(MathError::DivisionByZero);
    }
    let (quotient, remainder) = a.div_rem(b);
    if remainder.is_zero() {
        Ok(quotient)
    } else {
        Ok(quotient + U256::ONE)
    }
}

/// Integer square root, `floor(sqrt(x))`.
///
/// Newton's method started from a power of two strictly above the root, so
/// the iterates decrease monotonically onto the floor. Exact for perfect
/// squares.
pub fn sqrt(x: U256) -> U256 {
    let Ok(msb) = most_significant_bit(x) else {
        return U256::ZERO;
    };

    // x < 2^(msb + 1), so sqrt(x) < 2^(msb / 2 + 1)
    let mut z = U256_ONE << (msb as usize / 2 + 1);
    loop {
        let y = (z + x / z) >> 1;
        if y >= z {
            return z;
        }
        z = y;
    }
}
