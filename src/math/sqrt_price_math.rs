use crate::RESOLUTION;
use crate::math::math_helpers::{div_rounding_up, mul_div, mul_div_rounding_up, unlikely};
use crate::{
    Q96,
    error::{Error, MathError, RangeError},
};
use alloy_primitives::U256;

/// Amount of token0 spanned by `liquidity` between two sqrt prices,
/// `L * (sqrtB - sqrtA) / (sqrtA * sqrtB)`.
///
/// Round up for amounts a depositor owes, down for amounts paid out.
/// The bounds may be given in either order.
pub fn get_amount_0_delta(
    mut sqrt_ratio_a_x96: U256,
    mut sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, Error> {
    if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    };

    if unlikely(sqrt_ratio_a_x96.is_zero()) {
        return Err(RangeError::PriceOutOfRange.into());
    }

    let numerator1 = U256::from(liquidity) << RESOLUTION;
    let numerator2 = sqrt_ratio_b_x96 - sqrt_ratio_a_x96;

    if round_up {
        Ok(div_rounding_up(
            mul_div_rounding_up(numerator1, numerator2, sqrt_ratio_b_x96)?,
            sqrt_ratio_a_x96,
        )?)
    } else {
        Ok(mul_div(numerator1, numerator2, sqrt_ratio_b_x96)? / sqrt_ratio_a_x96)
    }
}

/// Amount of token1 spanned by `liquidity` between two sqrt prices,
/// `L * (sqrtB - sqrtA)`.
pub fn get_amount_1_delta(
    mut sqrt_ratio_a_x96: U256,
    mut sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, MathError> {
    if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    };
    let liquidity = U256::from(liquidity);

    if round_up {
        mul_div_rounding_up(liquidity, sqrt_ratio_b_x96 - sqrt_ratio_a_x96, Q96)
    } else {
        mul_div(liquidity, sqrt_ratio_b_x96 - sqrt_ratio_a_x96, Q96)
    }
}
