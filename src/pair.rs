///! The pair engine itself: coordinates Slot0, active liquidity, the tick
///! table and bitmap, positions, and the oracle across `mint`/`burn`/
///! `collect`/`swap`, plus the owner-only protocol fee surface.
use std::collections::HashMap;

use crate::callback::{MintCallback, SwapCallback};
use crate::config::PairConfig;
use crate::error::PairError;
use crate::libraries::big_num::U256;
use crate::libraries::full_math::MulDiv;
use crate::libraries::{liquidity_math, sqrt_price_math, swap_math, tick_bitmap, tick_math};
use crate::state::oracle::Oracle;
use crate::state::position::{PositionInfo, PositionKey};
use crate::state::slot0::Slot0;
use crate::state::tick::{self, TickInfo};
use crate::state::tick::get_fee_growth_inside;

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

/// A single concentrated-liquidity pair between two tokens.
pub struct Pair {
    pub config: PairConfig,
    pub slot0: Slot0,
    /// Currently active liquidity, i.e. liquidity for the tick range
    /// containing `slot0.tick`.
    pub liquidity: u128,
    pub fee_growth_global_0: U256,
    pub fee_growth_global_1: U256,
    pub protocol_fees_token_0: u128,
    pub protocol_fees_token_1: u128,
    max_liquidity_per_tick: u128,

    ticks: HashMap<i32, TickInfo>,
    bitmap: tick_bitmap::TickBitmap,
    positions: HashMap<PositionKey, PositionInfo>,
    oracle: Oracle,
}

/// Running totals and flags for a single `swap` call, threaded through
/// the step loop. Stack-local by design — only the fields named in the
/// data model (`Slot0`, `liquidity`, the fee growth globals) persist.
struct SwapState {
    amount_specified_remaining: i128,
    amount_calculated: i128,
    sqrt_price_x96: U256,
    tick: i32,
    fee_growth_global: U256,
    protocol_fee: u128,
    liquidity: u128,
}

struct StepComputations {
    sqrt_price_start_x96: U256,
    tick_next: i32,
    initialized: bool,
    sqrt_price_next_x96: U256,
    amount_in: u128,
    amount_out: u128,
    fee_amount: u128,
}

impl Pair {
    /// `initialize`: sets the starting price and seeds the oracle. May
    /// only be called once.
    pub fn new(
        config: PairConfig,
        sqrt_price_x96: U256,
        block_timestamp: u32,
    ) -> Result<Self, PairError> {
        let (min_sqrt, max_sqrt) = tick_math::sqrt_price_bounds();
        if sqrt_price_x96 < min_sqrt {
            return Err(PairError::SqrtPriceTooLow);
        }
        if sqrt_price_x96 >= max_sqrt {
            return Err(PairError::SqrtPriceTooHigh);
        }
        let tick = tick_math::get_tick_at_sqrt_price(sqrt_price_x96)?;
        let (oracle, observation_index, observation_cardinality) = Oracle::new(block_timestamp);

        Ok(Pair {
            max_liquidity_per_tick: tick::tick_spacing_to_max_liquidity_per_tick(config.tick_spacing),
            config,
            slot0: Slot0 {
                sqrt_price_x96,
                tick,
                observation_index,
                observation_cardinality,
                observation_cardinality_next: observation_cardinality,
                fee_protocol: 0,
                unlocked: true,
            },
            liquidity: 0,
            fee_growth_global_0: U256::zero(),
            fee_growth_global_1: U256::zero(),
            protocol_fees_token_0: 0,
            protocol_fees_token_1: 0,
            ticks: HashMap::new(),
            bitmap: tick_bitmap::TickBitmap::new(),
            positions: HashMap::new(),
            oracle,
        })
    }

    fn lock(&mut self) -> Result<(), PairError> {
        if !self.slot0.unlocked {
            return Err(PairError::Locked);
        }
        self.slot0.unlocked = false;
        Ok(())
    }

    fn unlock(&mut self) {
        self.slot0.unlocked = true;
    }

    /// Adds liquidity for the given owner/tick-range, invoking `callback`
    /// to pull in the token amounts the mint requires. Returns the
    /// `(amount_0, amount_1)` that were owed.
    pub fn mint(
        &mut self,
        owner: u64,
        tick_lower: i32,
        tick_upper: i32,
        amount: u128,
        data: &[u8],
        callback: &mut dyn MintCallback,
        block_timestamp: u32,
    ) -> Result<(u128, u128), PairError> {
        self.lock()?;
        let result = self.mint_locked(owner, tick_lower, tick_upper, amount, data, callback, block_timestamp);
        self.unlock();
        result
    }

    fn mint_locked(
        &mut self,
        owner: u64,
        tick_lower: i32,
        tick_upper: i32,
        amount: u128,
        data: &[u8],
        callback: &mut dyn MintCallback,
        block_timestamp: u32,
    ) -> Result<(u128, u128), PairError> {
        if amount == 0 {
            return Err(PairError::ZeroAmountSpecified);
        }

        let (_, amount_0_int, amount_1_int) =
            self.modify_position(owner, tick_lower, tick_upper, amount as i128, block_timestamp)?;

        let amount_0 = amount_0_int as u128;
        let amount_1 = amount_1_int as u128;

        if amount_0 > 0 || amount_1 > 0 {
            callback.mint_callback(amount_0, amount_1, data);
        }

        Ok((amount_0, amount_1))
    }

    /// Removes liquidity from the given owner/tick-range. Unlike `mint`,
    /// does not transfer tokens out — it only credits the position with
    /// `tokens_owed`; `collect` performs the actual payout.
    pub fn burn(
        &mut self,
        owner: u64,
        tick_lower: i32,
        tick_upper: i32,
        amount: u128,
        block_timestamp: u32,
    ) -> Result<(u128, u128), PairError> {
        self.lock()?;
        let result = self.burn_locked(owner, tick_lower, tick_upper, amount, block_timestamp);
        self.unlock();
        result
    }

    fn burn_locked(
        &mut self,
        owner: u64,
        tick_lower: i32,
        tick_upper: i32,
        amount: u128,
        block_timestamp: u32,
    ) -> Result<(u128, u128), PairError> {
        let (_, amount_0_int, amount_1_int) = self.modify_position(
            owner,
            tick_lower,
            tick_upper,
            -(amount as i128),
            block_timestamp,
        )?;

        let amount_0 = (-amount_0_int) as u128;
        let amount_1 = (-amount_1_int) as u128;

        if amount_0 > 0 || amount_1 > 0 {
            let key = PositionKey { owner, tick_lower, tick_upper };
            let position = self.positions.get_mut(&key).ok_or(PairError::NoPosition)?;
            position.tokens_owed_0 = position.tokens_owed_0.saturating_add(amount_0);
            position.tokens_owed_1 = position.tokens_owed_1.saturating_add(amount_1);
        }

        Ok((amount_0, amount_1))
    }

    /// Pays out up to `(amount_0_requested, amount_1_requested)` of a
    /// position's accrued, uncollected fees/withdrawn principal.
    pub fn collect(
        &mut self,
        owner: u64,
        tick_lower: i32,
        tick_upper: i32,
        amount_0_requested: u128,
        amount_1_requested: u128,
    ) -> Result<(u128, u128), PairError> {
        self.lock()?;
        let key = PositionKey { owner, tick_lower, tick_upper };
        let position = self.positions.get_mut(&key).ok_or(PairError::NoPosition)?;

        let amount_0 = amount_0_requested.min(position.tokens_owed_0);
        let amount_1 = amount_1_requested.min(position.tokens_owed_1);

        if amount_0 > 0 {
            position.tokens_owed_0 -= amount_0;
        }
        if amount_1 > 0 {
            position.tokens_owed_1 -= amount_1;
        }
        self.unlock();
        Ok((amount_0, amount_1))
    }

    fn modify_position(
        &mut self,
        owner: u64,
        tick_lower: i32,
        tick_upper: i32,
        liquidity_delta: i128,
        block_timestamp: u32,
    ) -> Result<(i128, i128, i128), PairError> {
        tick::check_ticks_order(tick_lower, tick_upper)?;
        tick::check_tick_boundary(tick_lower, self.config.tick_spacing)?;
        tick::check_tick_boundary(tick_upper, self.config.tick_spacing)?;

        self.update_position(owner, tick_lower, tick_upper, liquidity_delta, block_timestamp)?;

        let mut amount_0: i128 = 0;
        let mut amount_1: i128 = 0;

        if liquidity_delta != 0 {
            if self.slot0.tick < tick_lower {
                amount_0 = sqrt_price_math::get_amount_0_delta_signed(
                    tick_math::get_sqrt_price_at_tick(tick_lower)?,
                    tick_math::get_sqrt_price_at_tick(tick_upper)?,
                    liquidity_delta,
                )?;
            } else if self.slot0.tick < tick_upper {
                let liquidity_before = self.liquidity;
                amount_0 = sqrt_price_math::get_amount_0_delta_signed(
                    self.slot0.sqrt_price_x96,
                    tick_math::get_sqrt_price_at_tick(tick_upper)?,
                    liquidity_delta,
                )?;
                amount_1 = sqrt_price_math::get_amount_1_delta_signed(
                    tick_math::get_sqrt_price_at_tick(tick_lower)?,
                    self.slot0.sqrt_price_x96,
                    liquidity_delta,
                )?;
                self.liquidity = liquidity_math::add_delta(liquidity_before, liquidity_delta)?;
            } else {
                amount_1 = sqrt_price_math::get_amount_1_delta_signed(
                    tick_math::get_sqrt_price_at_tick(tick_lower)?,
                    tick_math::get_sqrt_price_at_tick(tick_upper)?,
                    liquidity_delta,
                )?;
            }
        }

        Ok((liquidity_delta, amount_0, amount_1))
    }

    fn update_position(
        &mut self,
        owner: u64,
        tick_lower: i32,
        tick_upper: i32,
        liquidity_delta: i128,
        block_timestamp: u32,
    ) -> Result<(), PairError> {
        let mut flipped_lower = false;
        let mut flipped_upper = false;

        if liquidity_delta != 0 {
            flipped_lower = self.update_tick(tick_lower, liquidity_delta, false, block_timestamp)?;
            flipped_upper = self.update_tick(tick_upper, liquidity_delta, true, block_timestamp)?;
        }

        let lower = *self.ticks.get(&tick_lower).unwrap_or(&TickInfo::default());
        let upper = *self.ticks.get(&tick_upper).unwrap_or(&TickInfo::default());
        let (fee_growth_inside_0, fee_growth_inside_1) = get_fee_growth_inside(
            &lower,
            tick_lower,
            &upper,
            tick_upper,
            self.slot0.tick,
            self.fee_growth_global_0,
            self.fee_growth_global_1,
        );

        let key = PositionKey { owner, tick_lower, tick_upper };
        let position = self.positions.entry(key).or_insert_with(PositionInfo::default);
        position.update(liquidity_delta, fee_growth_inside_0, fee_growth_inside_1)?;

        if liquidity_delta < 0 {
            if flipped_lower {
                self.clear_tick_if_empty(tick_lower);
            }
            if flipped_upper {
                self.clear_tick_if_empty(tick_upper);
            }
        }

        Ok(())
    }

    fn update_tick(
        &mut self,
        tick_index: i32,
        liquidity_delta: i128,
        upper: bool,
        block_timestamp: u32,
    ) -> Result<bool, PairError> {
        let tick_current = self.slot0.tick;
        let max_liquidity = self.max_liquidity_per_tick;
        let (tick_cumulative, seconds_per_liquidity_cumulative) = self.oracle.current(
            self.slot0.observation_index,
            block_timestamp,
            tick_current,
            self.liquidity,
        );
        let tick_info = self.ticks.entry(tick_index).or_insert_with(TickInfo::default);
        let flipped = tick_info.update(
            tick_index,
            tick_current,
            liquidity_delta,
            self.fee_growth_global_0,
            self.fee_growth_global_1,
            tick_cumulative,
            seconds_per_liquidity_cumulative,
            block_timestamp,
            upper,
            max_liquidity,
        )?;
        if flipped {
            self.bitmap.flip_tick(tick_index, self.config.tick_spacing);
        }
        Ok(flipped)
    }

    fn clear_tick_if_empty(&mut self, tick_index: i32) {
        if let Some(tick_info) = self.ticks.get(&tick_index) {
            if !tick_info.is_initialized() {
                self.ticks.remove(&tick_index);
                self.bitmap.flip_tick(tick_index, self.config.tick_spacing);
            }
        }
    }

    /// Executes a swap. `amount_specified` positive means exact-input,
    /// negative means exact-output; `zero_for_one` selects the trade
    /// direction. Returns signed `(amount_0, amount_1)`: positive is
    /// owed to the pair, negative is owed to the caller.
    pub fn swap(
        &mut self,
        zero_for_one: bool,
        amount_specified: i128,
        sqrt_price_limit_x96: U256,
        data: &[u8],
        callback: &mut dyn SwapCallback,
        block_timestamp: u32,
    ) -> Result<(i128, i128), PairError> {
        self.lock()?;
        let result = self.swap_locked(
            zero_for_one,
            amount_specified,
            sqrt_price_limit_x96,
            data,
            callback,
            block_timestamp,
        );
        self.unlock();
        result
    }

    fn swap_locked(
        &mut self,
        zero_for_one: bool,
        amount_specified: i128,
        sqrt_price_limit_x96: U256,
        data: &[u8],
        callback: &mut dyn SwapCallback,
        block_timestamp: u32,
    ) -> Result<(i128, i128), PairError> {
        if amount_specified == 0 {
            return Err(PairError::ZeroAmountSpecified);
        }

        let (min_sqrt, max_sqrt) = tick_math::sqrt_price_bounds();
        let sqrt_price_start = self.slot0.sqrt_price_x96;
        if zero_for_one {
            if sqrt_price_limit_x96 >= sqrt_price_start || sqrt_price_limit_x96 <= min_sqrt {
                return Err(PairError::InvalidPriceLimit);
            }
        } else {
            if sqrt_price_limit_x96 <= sqrt_price_start || sqrt_price_limit_x96 >= max_sqrt {
                return Err(PairError::InvalidPriceLimit);
            }
        }

        let exact_input = amount_specified > 0;
        let cache_fee_protocol = if zero_for_one {
            self.slot0.fee_protocol_0()
        } else {
            self.slot0.fee_protocol_1()
        };

        let mut state = SwapState {
            amount_specified_remaining: amount_specified,
            amount_calculated: 0,
            sqrt_price_x96: sqrt_price_start,
            tick: self.slot0.tick,
            fee_growth_global: if zero_for_one {
                self.fee_growth_global_0
            } else {
                self.fee_growth_global_1
            },
            protocol_fee: 0,
            liquidity: self.liquidity,
        };

        while state.amount_specified_remaining != 0 && state.sqrt_price_x96 != sqrt_price_limit_x96 {
            let (tick_next_raw, initialized) = self.bitmap.next_initialized_tick_within_one_word(
                state.tick,
                self.config.tick_spacing,
                zero_for_one,
            );
            let tick_next = tick_next_raw.clamp(tick_math::MIN_TICK, tick_math::MAX_TICK);

            let sqrt_price_next = tick_math::get_sqrt_price_at_tick(tick_next)?;

            let mut step = StepComputations {
                sqrt_price_start_x96: state.sqrt_price_x96,
                tick_next,
                initialized,
                sqrt_price_next_x96: sqrt_price_next,
                amount_in: 0,
                amount_out: 0,
                fee_amount: 0,
            };

            let bounded_target = if (zero_for_one && step.sqrt_price_next_x96 < sqrt_price_limit_x96)
                || (!zero_for_one && step.sqrt_price_next_x96 > sqrt_price_limit_x96)
            {
                sqrt_price_limit_x96
            } else {
                step.sqrt_price_next_x96
            };

            let swap_step = swap_math::compute_swap_step(
                state.sqrt_price_x96,
                bounded_target,
                state.liquidity,
                state.amount_specified_remaining,
                self.config.fee_pips,
            )?;
            state.sqrt_price_x96 = swap_step.sqrt_ratio_next_x96;
            step.amount_in = swap_step.amount_in;
            step.amount_out = swap_step.amount_out;
            step.fee_amount = swap_step.fee_amount;

            if exact_input {
                state.amount_specified_remaining -= (step.amount_in + step.fee_amount) as i128;
                state.amount_calculated -= step.amount_out as i128;
            } else {
                state.amount_specified_remaining += step.amount_out as i128;
                state.amount_calculated += (step.amount_in + step.fee_amount) as i128;
            }

            if cache_fee_protocol > 0 {
                let delta = step.fee_amount / cache_fee_protocol as u128;
                step.fee_amount -= delta;
                state.protocol_fee += delta;
            }

            if state.liquidity > 0 {
                state.fee_growth_global = state
                    .fee_growth_global
                    .overflowing_add(
                        U256::from(step.fee_amount)
                            .mul_div_floor(U256::one() << 128, U256::from(state.liquidity))
                            .unwrap_or_default(),
                    )
                    .0;
            }

            if state.sqrt_price_x96 == step.sqrt_price_next_x96 {
                if step.initialized {
                    let (fee_growth_global_0, fee_growth_global_1) = if zero_for_one {
                        (state.fee_growth_global, self.fee_growth_global_1)
                    } else {
                        (self.fee_growth_global_0, state.fee_growth_global)
                    };
                    let (tick_cumulative, seconds_per_liquidity_cumulative) = self.oracle.current(
                        self.slot0.observation_index,
                        block_timestamp,
                        self.slot0.tick,
                        state.liquidity,
                    );
                    let mut liquidity_net = 0i128;
                    if let Some(tick_info) = self.ticks.get_mut(&step.tick_next) {
                        liquidity_net = tick_info.cross(
                            fee_growth_global_0,
                            fee_growth_global_1,
                            tick_cumulative,
                            seconds_per_liquidity_cumulative,
                            block_timestamp,
                        );
                    }
                    if zero_for_one {
                        liquidity_net = -liquidity_net;
                    }
                    state.liquidity = liquidity_math::add_delta(state.liquidity, liquidity_net)?;
                }
                state.tick = if zero_for_one { step.tick_next - 1 } else { step.tick_next };
            } else if state.sqrt_price_x96 != step.sqrt_price_start_x96 {
                state.tick = tick_math::get_tick_at_sqrt_price(state.sqrt_price_x96)?;
            }

            #[cfg(feature = "tracing")]
            trace!(tick = state.tick, sqrt_price = ?state.sqrt_price_x96, "swap step");
        }

        // the oracle is written using the tick the pool was at *before*
        // this swap moved it, matching the price that prevailed for the
        // time elapsed since the last write, and only when the tick
        // actually moved — otherwise there is nothing new to record
        if state.tick != self.slot0.tick {
            let (observation_index, observation_cardinality) = self.oracle.write(
                self.slot0.observation_index,
                block_timestamp,
                self.slot0.tick,
                self.liquidity,
            );
            self.slot0.sqrt_price_x96 = state.sqrt_price_x96;
            self.slot0.tick = state.tick;
            self.slot0.observation_index = observation_index;
            self.slot0.observation_cardinality = observation_cardinality;
        } else {
            self.slot0.sqrt_price_x96 = state.sqrt_price_x96;
        }

        if self.liquidity != state.liquidity {
            self.liquidity = state.liquidity;
        }

        if zero_for_one {
            self.fee_growth_global_0 = state.fee_growth_global;
            if state.protocol_fee > 0 {
                self.protocol_fees_token_0 += state.protocol_fee;
            }
        } else {
            self.fee_growth_global_1 = state.fee_growth_global;
            if state.protocol_fee > 0 {
                self.protocol_fees_token_1 += state.protocol_fee;
            }
        }

        let (amount_0, amount_1) = if zero_for_one == exact_input {
            (
                amount_specified - state.amount_specified_remaining,
                state.amount_calculated,
            )
        } else {
            (
                state.amount_calculated,
                amount_specified - state.amount_specified_remaining,
            )
        };

        #[cfg(feature = "tracing")]
        debug!(amount_0, amount_1, "swap settled");

        // the side that went negative was already paid out by the host
        // before this call returns; the callback's job is to make the pair
        // whole on the positive side
        callback.swap_callback(amount_0, amount_1, data);

        Ok((amount_0, amount_1))
    }

    /// Returns cumulative tick and seconds-per-liquidity values at each
    /// requested lookback window.
    pub fn observe(
        &self,
        seconds_agos: &[u32],
        block_timestamp: u32,
    ) -> Result<Vec<(i64, U256)>, PairError> {
        seconds_agos
            .iter()
            .map(|&seconds_ago| {
                self.oracle.observe_single(
                    block_timestamp,
                    seconds_ago,
                    self.slot0.tick,
                    self.slot0.observation_index,
                    self.liquidity,
                    self.slot0.observation_cardinality,
                )
            })
            .collect()
    }

    /// Increases the target cardinality the oracle's ring buffer grows
    /// into on its next write. Idempotent if `target` does not exceed
    /// the pair's current target.
    pub fn increase_observation_cardinality_next(&mut self, target: u16) {
        let next = self.oracle.grow(self.slot0.observation_cardinality_next, target);
        self.slot0.observation_cardinality_next = next;
    }

    /// Owner-only: sets the protocol fee split. The embedding host is
    /// responsible for authorizing the caller before invoking this.
    pub fn set_fee_protocol(&mut self, fee_protocol_0: u8, fee_protocol_1: u8) {
        self.slot0.set_fee_protocol(fee_protocol_0, fee_protocol_1);
    }

    /// Owner-only: pays out up to the requested amounts of accumulated
    /// protocol fees.
    pub fn collect_protocol(
        &mut self,
        amount_0_requested: u128,
        amount_1_requested: u128,
    ) -> (u128, u128) {
        let amount_0 = amount_0_requested.min(self.protocol_fees_token_0);
        let amount_1 = amount_1_requested.min(self.protocol_fees_token_1);
        self.protocol_fees_token_0 -= amount_0;
        self.protocol_fees_token_1 -= amount_1;
        (amount_0, amount_1)
    }

    pub fn position(&self, owner: u64, tick_lower: i32, tick_upper: i32) -> Option<&PositionInfo> {
        self.positions.get(&PositionKey { owner, tick_lower, tick_upper })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullCallback;
    impl MintCallback for NullCallback {
        fn mint_callback(&mut self, _amount_0_owed: u128, _amount_1_owed: u128, _data: &[u8]) {}
    }
    impl SwapCallback for NullCallback {
        fn swap_callback(&mut self, _amount_0_delta: i128, _amount_1_delta: i128, _data: &[u8]) {}
    }

    fn sample_config() -> PairConfig {
        PairConfig { tick_spacing: 60, fee_pips: 3000 }
    }

    fn price_at(tick: i32) -> U256 {
        tick_math::get_sqrt_price_at_tick(tick).unwrap()
    }

    #[test]
    fn initialize_sets_tick_from_price() {
        let pair = Pair::new(sample_config(), price_at(0), 1_000).unwrap();
        assert_eq!(pair.slot0.tick, 0);
        assert_eq!(pair.liquidity, 0);
    }

    #[test]
    fn rejects_out_of_range_initial_price() {
        let (min_sqrt, _) = tick_math::sqrt_price_bounds();
        assert!(Pair::new(sample_config(), min_sqrt - 1, 1_000).is_err());
    }

    #[test]
    fn mint_within_range_increases_active_liquidity() {
        let mut pair = Pair::new(sample_config(), price_at(0), 1_000).unwrap();
        let mut cb = NullCallback;
        let (amount_0, amount_1) = pair
            .mint(1, -600, 600, 1_000_000, b"", &mut cb, 1_000)
            .unwrap();
        assert!(amount_0 > 0 && amount_1 > 0);
        assert_eq!(pair.liquidity, 1_000_000);
    }

    #[test]
    fn mint_outside_range_does_not_affect_active_liquidity() {
        let mut pair = Pair::new(sample_config(), price_at(0), 1_000).unwrap();
        let mut cb = NullCallback;
        pair.mint(1, 600, 1200, 1_000_000, b"", &mut cb, 1_000).unwrap();
        assert_eq!(pair.liquidity, 0);
    }

    #[test]
    fn burn_then_collect_pays_out_principal() {
        let mut pair = Pair::new(sample_config(), price_at(0), 1_000).unwrap();
        let mut cb = NullCallback;
        pair.mint(1, -600, 600, 1_000_000, b"", &mut cb, 1_000).unwrap();
        let (amount_0, amount_1) = pair.burn(1, -600, 600, 1_000_000, 1_001).unwrap();
        assert!(amount_0 > 0 && amount_1 > 0);
        assert_eq!(pair.liquidity, 0);
        let (collected_0, collected_1) = pair.collect(1, -600, 600, u128::MAX, u128::MAX).unwrap();
        assert_eq!(collected_0, amount_0);
        assert_eq!(collected_1, amount_1);
    }

    #[test]
    fn swap_zero_for_one_decreases_price() {
        let mut pair = Pair::new(sample_config(), price_at(0), 1_000).unwrap();
        let mut cb = NullCallback;
        pair.mint(1, -6000, 6000, 1_000_000_000_000u128, b"", &mut cb, 1_000)
            .unwrap();
        let start_price = pair.slot0.sqrt_price_x96;
        let (min_sqrt, _) = tick_math::sqrt_price_bounds();
        let (amount_0, amount_1) = pair
            .swap(true, 1_000_000, min_sqrt + 1, b"", &mut cb, 1_001)
            .unwrap();
        assert!(amount_0 > 0);
        assert!(amount_1 < 0);
        assert!(pair.slot0.sqrt_price_x96 < start_price);
    }

    #[test]
    fn swap_one_for_zero_increases_price() {
        let mut pair = Pair::new(sample_config(), price_at(0), 1_000).unwrap();
        let mut cb = NullCallback;
        pair.mint(1, -6000, 6000, 1_000_000_000_000u128, b"", &mut cb, 1_000)
            .unwrap();
        let start_price = pair.slot0.sqrt_price_x96;
        let (_, max_sqrt) = tick_math::sqrt_price_bounds();
        pair.swap(false, 1_000_000, max_sqrt - 1, b"", &mut cb, 1_001)
            .unwrap();
        assert!(pair.slot0.sqrt_price_x96 > start_price);
    }

    #[test]
    fn swap_accrues_fees_to_global_growth() {
        let mut pair = Pair::new(sample_config(), price_at(0), 1_000).unwrap();
        let mut cb = NullCallback;
        pair.mint(1, -6000, 6000, 1_000_000_000_000u128, b"", &mut cb, 1_000)
            .unwrap();
        pair.swap(true, 1_000_000, price_at(-100), b"", &mut cb, 1_001)
            .unwrap();
        assert!(pair.fee_growth_global_0 > U256::zero());
    }

    #[test]
    fn reentrant_call_is_rejected() {
        let mut pair = Pair::new(sample_config(), price_at(0), 1_000).unwrap();
        pair.slot0.unlocked = false;
        let mut cb = NullCallback;
        assert_eq!(
            pair.mint(1, -600, 600, 1, b"", &mut cb, 1_000).unwrap_err(),
            PairError::Locked
        );
    }

    #[test]
    fn set_and_collect_protocol_fee() {
        let mut pair = Pair::new(sample_config(), price_at(0), 1_000).unwrap();
        pair.set_fee_protocol(4, 4);
        let mut cb = NullCallback;
        pair.mint(1, -6000, 6000, 1_000_000_000_000u128, b"", &mut cb, 1_000)
            .unwrap();
        pair.swap(true, 10_000_000, price_at(-1000), b"", &mut cb, 1_001)
            .unwrap();
        assert!(pair.protocol_fees_token_0 > 0);
        let (collected, _) = pair.collect_protocol(u128::MAX, u128::MAX);
        assert_eq!(collected, pair.protocol_fees_token_0 + collected - pair.protocol_fees_token_0);
        assert!(collected > 0);
    }
}
