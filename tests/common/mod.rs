#![allow(dead_code)]

use clmm_range_math::{
    math::range_math::encode_sqrt_price_x96, pool::FeeAmount, Address, LiquidityPool, V3Pool,
    U256,
};

/// Prices as `(numerator, denominator)`. Small primes over 11 and as whole
/// numbers are the least friendly inputs for the fixed-point formulas.
pub const PRICES: [(u64, u64); 9] = [
    (2, 11),
    (3, 11),
    (5, 11),
    (7, 11),
    (1, 1),
    (2, 1),
    (3, 1),
    (5, 1),
    (7, 1),
];

/// `1`, small primes times 31 and the scale minus small primes times 37.
pub const WIDTHS: [u16; 9] = [1, 62, 93, 155, 217, 9926, 9889, 9815, 9741];

pub const FEES: [FeeAmount; 3] = [FeeAmount::Low, FeeAmount::Medium, FeeAmount::High];

pub fn sqrt_price(numerator: u64, denominator: u64) -> U256 {
    encode_sqrt_price_x96(U256::from(numerator), U256::from(denominator)).unwrap()
}

pub fn pool_at(numerator: u64, denominator: u64, fee: FeeAmount) -> V3Pool {
    let mut pool = V3Pool::new(
        Address::ZERO,
        Address::repeat_byte(0x11),
        Address::repeat_byte(0x22),
        fee,
    );
    pool.initialize(sqrt_price(numerator, denominator)).unwrap();
    pool
}

pub fn to_f64(value: U256) -> f64 {
    value.to_string().parse::<f64>().unwrap()
}

/// X96 fixed point to a float.
pub fn x96_to_f64(value: U256) -> f64 {
    to_f64(value) / 2f64.powi(96)
}

pub fn relative_error(actual: f64, expected: f64) -> f64 {
    ((actual - expected) / expected).abs()
}

pub fn shortfall(amount_in: U256, amount_out: U256) -> U256 {
    assert!(
        amount_out <= amount_in,
        "consumed {amount_out} out of a budget of {amount_in}"
    );
    amount_in - amount_out
}
