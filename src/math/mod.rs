pub mod math_helpers;
pub mod range_math;
pub mod sqrt_price_math;
pub mod tick_math;
pub mod tick_rounding;

pub mod bit_math;

pub mod liquidity_math;
