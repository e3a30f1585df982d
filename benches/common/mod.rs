#![allow(dead_code)]

use clmm_range_math::{
    math::{
        liquidity_math::{amounts_for_liquidity, liquidity_for_region_at_current_price, liquidity_for_width},
        math_helpers::{mul_div, mul_div_rounding_up, sqrt},
        range_math::{
            encode_sqrt_price_x96, price_range_for_width, sqrt_lower_price_x96,
            sqrt_upper_price_x96, width_from_sqrt_prices,
        },
        sqrt_price_math::{get_amount_0_delta, get_amount_1_delta},
        tick_math::{get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio},
        tick_rounding::{round_tick, Rounding},
    },
    pool::FeeAmount,
    position::{create_position, plan_position},
    Address, LiquidityPool, V3Pool, Q96, U256,
};
use criterion::{BatchSize, Criterion};
use std::hint::black_box;

fn sqrt_price(numerator: u64, denominator: u64) -> U256 {
    encode_sqrt_price_x96(U256::from(numerator), U256::from(denominator)).unwrap()
}

fn pool_at(numerator: u64, denominator: u64) -> V3Pool {
    let mut pool = V3Pool::new(
        Address::ZERO,
        Address::repeat_byte(0x11),
        Address::repeat_byte(0x22),
        FeeAmount::Medium,
    );
    pool.initialize(sqrt_price(numerator, denominator)).unwrap();
    pool
}

pub fn bench_math_helpers(c: &mut Criterion) {
    let a = U256::from(u128::MAX) << 64;
    let b = Q96 + U256::from(12_345u32);

    c.bench_function("mul_div_fast_path", |bench| {
        bench.iter(|| mul_div(black_box(Q96), black_box(b), black_box(Q96)))
    });
    c.bench_function("mul_div_wide_product", |bench| {
        bench.iter(|| mul_div(black_box(a), black_box(b), black_box(Q96)))
    });
    c.bench_function("mul_div_rounding_up", |bench| {
        bench.iter(|| mul_div_rounding_up(black_box(a), black_box(b), black_box(Q96 + b)))
    });
    c.bench_function("sqrt_x192", |bench| {
        bench.iter(|| sqrt(black_box(a)))
    });
}

pub fn bench_tick_math(c: &mut Criterion) {
    let sqrt_price = sqrt_price(7, 11);

    c.bench_function("get_sqrt_ratio_at_tick", |bench| {
        bench.iter(|| get_sqrt_ratio_at_tick(black_box(-123_456)))
    });
    c.bench_function("get_tick_at_sqrt_ratio", |bench| {
        bench.iter(|| get_tick_at_sqrt_ratio(black_box(sqrt_price)))
    });
    c.bench_function("round_tick_auto", |bench| {
        bench.iter(|| round_tick(black_box(-17_070), black_box(60), Rounding::Auto))
    });
}

pub fn bench_range_math(c: &mut Criterion) {
    let sqrt_pc = sqrt_price(5, 11);

    c.bench_function("sqrt_lower_price_x96", |bench| {
        bench.iter(|| sqrt_lower_price_x96(black_box(sqrt_pc), black_box(217)))
    });
    c.bench_function("sqrt_upper_price_x96", |bench| {
        bench.iter(|| sqrt_upper_price_x96(black_box(sqrt_pc), black_box(217)))
    });
    c.bench_function("price_range_for_width", |bench| {
        bench.iter(|| {
            price_range_for_width(
                black_box(sqrt_pc),
                black_box(217),
                black_box(U256::from(1_234_567u32)),
                black_box(U256::from(7_654_321u32)),
            )
        })
    });

    let (sqrt_pl, sqrt_pu) = price_range_for_width(
        sqrt_pc,
        217,
        U256::from(1_234_567u32),
        U256::from(7_654_321u32),
    )
    .unwrap();
    c.bench_function("width_from_sqrt_prices", |bench| {
        bench.iter(|| width_from_sqrt_prices(black_box(sqrt_pl), black_box(sqrt_pu)))
    });
}

pub fn bench_liquidity_math(c: &mut Criterion) {
    let (sqrt_pl, sqrt_pc, sqrt_pu) = (sqrt_price(3, 11), sqrt_price(5, 11), sqrt_price(7, 11));
    let amount = U256::from(1_000_000_000u64);
    let liquidity = 1e18 as u128;

    c.bench_function("get_amount_0_delta", |bench| {
        bench.iter(|| get_amount_0_delta(black_box(sqrt_pc), black_box(sqrt_pu), black_box(liquidity), true))
    });
    c.bench_function("get_amount_1_delta", |bench| {
        bench.iter(|| get_amount_1_delta(black_box(sqrt_pl), black_box(sqrt_pc), black_box(liquidity), true))
    });
    c.bench_function("liquidity_for_region_at_current_price", |bench| {
        bench.iter(|| {
            liquidity_for_region_at_current_price(
                black_box(sqrt_pc),
                black_box(sqrt_pl),
                black_box(sqrt_pu),
                black_box(amount),
                black_box(amount),
            )
        })
    });
    c.bench_function("amounts_for_liquidity", |bench| {
        bench.iter(|| {
            amounts_for_liquidity(
                black_box(sqrt_pc),
                black_box(sqrt_pl),
                black_box(sqrt_pu),
                black_box(liquidity),
                true,
            )
        })
    });
    c.bench_function("liquidity_for_width", |bench| {
        bench.iter(|| liquidity_for_width(black_box(sqrt_pc), black_box(1_000), black_box(amount), black_box(amount)))
    });
}

pub fn bench_position(c: &mut Criterion) {
    let pool = pool_at(1, 7);
    let (amount0, amount1) = (U256::from(10_000u32), U256::from(15_000u32));

    c.bench_function("plan_position_two_sided", |bench| {
        bench.iter(|| plan_position(black_box(&pool), black_box(155), black_box(amount0), black_box(amount1)))
    });
    c.bench_function("plan_position_amount1_only", |bench| {
        bench.iter(|| plan_position(black_box(&pool), black_box(155), black_box(U256::ZERO), black_box(amount1)))
    });
    c.bench_function("create_position", |bench| {
        bench.iter_batched(
            || pool.clone(),
            |mut pool| create_position(&mut pool, 155, amount0, amount1),
            BatchSize::SmallInput,
        )
    });
}
