use crate::FastMap;
use crate::error::{Error, MathError, StateError};
use crate::math::liquidity_math::add_delta;
use crate::math::sqrt_price_math::{get_amount_0_delta, get_amount_1_delta};
use crate::math::tick_math::{
    MAX_SQRT_RATIO, MIN_SQRT_RATIO, get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio,
    max_usable_tick, min_usable_tick,
};
use crate::pool::{FeeAmount, LiquidityPool, Slot0};
use alloy_primitives::{Address, U160, U256};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInfo {
    pub liquidity_gross: u128,
    pub liquidity_net: i128,
}

/// Converts an `Address` into its `U160` numeric representation.
///
/// This is mainly used to compare or sort addresses by value.
#[inline(always)]
pub fn address_to_u160(address: Address) -> U160 {
    address.into()
}

/// Returns the token pair sorted by numeric address, as used by Uniswap V3.
pub fn sort_tokens(token0: Address, token1: Address) -> (Address, Address) {
    if address_to_u160(token0) < address_to_u160(token1) {
        (token0, token1)
    } else {
        (token1, token0)
    }
}

/// In‑memory concentrated liquidity pool.
///
/// Tracks the price, active liquidity, per‑tick liquidity and the token
/// balances deposited through [`LiquidityPool::mint`]. There is no swap
/// or fee accounting.
#[derive(Clone, Debug)]
pub struct V3Pool {
    pub pool_address: Address,
    pub token0: Address,
    pub token1: Address,
    pub fee: FeeAmount,
    pub slot0: Slot0,
    pub liquidity: u128,
    pub tick_spacing: i32,
    pub ticks: FastMap<i32, TickInfo>,
    pub reserve0: U256,
    pub reserve1: U256,
}

impl V3Pool {
    /// Constructs an uninitialized pool; call [`LiquidityPool::initialize`]
    /// before minting.
    pub fn new(pool_address: Address, token_a: Address, token_b: Address, fee: FeeAmount) -> Self {
        let (token0, token1) = sort_tokens(token_a, token_b);

        Self {
            pool_address,
            token0,
            token1,
            fee,
            slot0: Slot0::default(),
            liquidity: 0u128,
            tick_spacing: fee.tick_spacing(),
            ticks: FastMap::default(),
            reserve0: U256::ZERO,
            reserve1: U256::ZERO,
        }
    }

    #[inline(always)]
    pub fn is_initialized(&self) -> bool {
        !self.slot0.sqrt_price_x96.is_zero()
    }

    /// Returns the net liquidity delta at a given tick, if it exists.
    pub fn get_liquidity_net(&self, tick: &i32) -> Option<i128> {
        self.ticks
            .get(tick)
            .map(|tick_info| tick_info.liquidity_net)
    }

    fn check_ticks(&self, tick_lower: i32, tick_upper: i32) -> Result<(), StateError> {
        if self.tick_spacing <= 0 {
            return Err(StateError::InvalidTickSpacing);
        }
        if tick_lower >= tick_upper
            || tick_lower % self.tick_spacing != 0
            || tick_upper % self.tick_spacing != 0
        {
            return Err(StateError::InvalidTickRange);
        }
        if tick_lower < min_usable_tick(self.tick_spacing)?
            || tick_upper > max_usable_tick(self.tick_spacing)?
        {
            return Err(StateError::TickOutOfBounds);
        }
        Ok(())
    }

    fn next_tick_info(
        &self,
        tick: i32,
        liquidity_delta: i128,
        upper: bool,
    ) -> Result<TickInfo, Error> {
        let info = self.ticks.get(&tick).copied().unwrap_or_default();

        let liquidity_gross = add_delta(info.liquidity_gross, liquidity_delta)?;
        // crossing an upper tick left to right removes the liquidity again
        let liquidity_net = if upper {
            info.liquidity_net.checked_sub(liquidity_delta)
        } else {
            info.liquidity_net.checked_add(liquidity_delta)
        }
        .ok_or(MathError::Overflow)?;

        Ok(TickInfo {
            liquidity_gross,
            liquidity_net,
        })
    }
}

impl LiquidityPool for V3Pool {
    fn initialize(&mut self, sqrt_price_x96: U256) -> Result<(), Error> {
        if self.is_initialized() {
            return Err(StateError::AlreadyInitialized.into());
        }
        if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 >= MAX_SQRT_RATIO {
            return Err(StateError::SqrtPriceOutOfBounds.into());
        }

        let tick = get_tick_at_sqrt_ratio(sqrt_price_x96)?;
        self.slot0 = Slot0 {
            sqrt_price_x96,
            tick,
        };
        debug!(pool = %self.pool_address, sqrt_price_x96 = %sqrt_price_x96, tick, "pool initialized");
        Ok(())
    }

    #[inline(always)]
    fn slot0(&self) -> Slot0 {
        self.slot0
    }

    #[inline(always)]
    fn tick_spacing(&self) -> i32 {
        self.tick_spacing
    }

    #[inline(always)]
    fn token0(&self) -> Address {
        self.token0
    }

    #[inline(always)]
    fn token1(&self) -> Address {
        self.token1
    }

    fn mint(
        &mut self,
        tick_lower: i32,
        tick_upper: i32,
        liquidity: u128,
    ) -> Result<(U256, U256), Error> {
        if !self.is_initialized() {
            return Err(StateError::NotInitialized.into());
        }
        self.check_ticks(tick_lower, tick_upper)?;
        if liquidity == 0 {
            return Err(StateError::LiquidityIsZero.into());
        }
        let liquidity_delta = i128::try_from(liquidity).map_err(|_| MathError::Overflow)?;

        let sqrt_ratio_lower_x96 = get_sqrt_ratio_at_tick(tick_lower)?;
        let sqrt_ratio_upper_x96 = get_sqrt_ratio_at_tick(tick_upper)?;
        let Slot0 {
            sqrt_price_x96,
            tick,
        } = self.slot0;

        let (amount0, amount1) = if tick < tick_lower {
            let amount0 =
                get_amount_0_delta(sqrt_ratio_lower_x96, sqrt_ratio_upper_x96, liquidity, true)?;
            (amount0, U256::ZERO)
        } else if tick < tick_upper {
            let amount0 =
                get_amount_0_delta(sqrt_price_x96, sqrt_ratio_upper_x96, liquidity, true)?;
            let amount1 =
                get_amount_1_delta(sqrt_ratio_lower_x96, sqrt_price_x96, liquidity, true)?;
            (amount0, amount1)
        } else {
            let amount1 =
                get_amount_1_delta(sqrt_ratio_lower_x96, sqrt_ratio_upper_x96, liquidity, true)?;
            (U256::ZERO, amount1)
        };

        let reserve0 = self
            .reserve0
            .checked_add(amount0)
            .ok_or(MathError::Overflow)?;
        let reserve1 = self
            .reserve1
            .checked_add(amount1)
            .ok_or(MathError::Overflow)?;
        let active_liquidity = if tick_lower <= tick && tick < tick_upper {
            add_delta(self.liquidity, liquidity_delta)?
        } else {
            self.liquidity
        };

        let lower_info = self.next_tick_info(tick_lower, liquidity_delta, false)?;
        let upper_info = self.next_tick_info(tick_upper, liquidity_delta, true)?;

        self.ticks.insert(tick_lower, lower_info);
        self.ticks.insert(tick_upper, upper_info);
        trace!(tick = tick_lower, ?lower_info, "lower tick updated");
        trace!(tick = tick_upper, ?upper_info, "upper tick updated");
        self.reserve0 = reserve0;
        self.reserve1 = reserve1;
        self.liquidity = active_liquidity;

        debug!(
            pool = %self.pool_address,
            tick_lower,
            tick_upper,
            liquidity,
            amount0 = %amount0,
            amount1 = %amount1,
            "liquidity minted"
        );
        Ok((amount0, amount1))
    }
}
