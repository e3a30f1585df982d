use crate::error::MathError;
use alloy_primitives::U256;

/// Returns the index (0–255) of the most significant set bit in a `U256`,
/// or `MathError::ZeroValue` if the input is zero.
///
/// Seeds the integer square root and sizes the amount normalisation in
/// the range solver.
pub fn most_significant_bit(x: U256) -> Result<u8, MathError> {
    if x.is_zero() {
        return Err(MathError::ZeroValue);
    }
    Ok(255 - x.leading_zeros() as u8)
}

/// Number of bits needed to represent `x`; zero for zero.
#[inline(always)]
pub fn bit_length(x: U256) -> usize {
    most_significant_bit(x).map_or(0, |msb| msb as usize + 1)
}
