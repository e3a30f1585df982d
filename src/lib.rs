//! Width-parameterised range and liquidity math for Uniswap V3–style pools.
//!
//! This crate exposes:
//! - Low‑level fixed‑point primitives (`math::*`) for X96 sqrt prices, ticks,
//!   range widths and liquidity/amount conversions.
//! - A [`LiquidityPool`] collaborator trait and a lightweight in‑memory
//!   [`V3Pool`] that records minted liquidity.
//! - A position builder ([`position`]) that turns a width and a deposit
//!   budget into a tick‑aligned range, its liquidity and the amounts owed.
//!
//! # Examples
//!
//! ## Pure math
//! ```no_run
//! use clmm_range_math::{math::range_math, Q96, U256};
//!
//! // 100 bps wide range ending at price 1.0
//! let sqrt_pl = range_math::sqrt_lower_price_x96(Q96, 100).unwrap();
//! assert!(sqrt_pl < Q96);
//! assert_eq!(range_math::width_from_sqrt_prices(sqrt_pl, Q96).unwrap(), 100);
//! ```
//!
//! ## Building a position in an in‑memory pool
//! ```no_run
//! use clmm_range_math::{
//!     math::range_math::encode_sqrt_price_x96,
//!     pool::{FeeAmount, LiquidityPool},
//!     position::create_position,
//!     Address, V3Pool, U256,
//! };
//!
//! # let token_a = Address::ZERO;
//! # let token_b = Address::repeat_byte(1);
//! let mut pool = V3Pool::new(Address::ZERO, token_a, token_b, FeeAmount::Medium);
//! pool.initialize(encode_sqrt_price_x96(U256::from(1), U256::from(7)).unwrap())
//!     .unwrap();
//!
//! let position = create_position(&mut pool, 155, U256::from(10_000), U256::from(15_000)).unwrap();
//! println!(
//!     "[{}, {}) liquidity {} owes {} / {}",
//!     position.tick_lower,
//!     position.tick_upper,
//!     position.liquidity,
//!     position.amount0_owed,
//!     position.amount1_owed
//! );
//! ```

pub use alloy_primitives::{Address, U256};

pub mod error;
mod hash;
pub mod math;

pub use hash::FastMap;

pub mod pool;
pub mod position;

pub use pool::v3_pool::V3Pool;
pub use pool::LiquidityPool;

#[cfg(test)]
const U256_1: U256 = U256::from_limbs([1, 0, 0, 0]);
const U256_E4: U256 = U256::from_limbs([10000, 0, 0, 0]);

pub const RESOLUTION: u8 = 96;
pub const Q96: U256 = U256::from_limbs([0, 4294967296, 0, 0]);
pub const Q192: U256 = U256::from_limbs([0, 0, 0, 1]);

/// Largest sqrt price accepted by the range math, `2^160 - 1`.
pub const MAX_SQRT_PRICE: U256 = U256::from_limbs([u64::MAX, u64::MAX, u32::MAX as u64, 0]);

/// Scale `N` of the width metric `N * (Pu - Pl) / (Pu + Pl)`.
pub const WIDTH_SCALE: u16 = 10_000;
