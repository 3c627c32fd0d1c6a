///! Per-tick state and the arithmetic for crossing and initializing ticks.
use crate::error::PairError;
use crate::libraries::big_num::U256;
use crate::libraries::{liquidity_math, tick_math};

/// Info stored for a single initialized (or about-to-be-initialized) tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct TickInfo {
    /// Total position liquidity that references this tick.
    pub liquidity_gross: u128,
    /// Net liquidity added (subtracted) when the tick is crossed left to
    /// right (right to left).
    pub liquidity_net: i128,
    /// Fee growth per unit of liquidity on the other side of this tick,
    /// relative to the current tick. Only has relative meaning — the
    /// value depends on when the tick was initialized. Wraps mod 2^256
    /// by design, the same as the running global it is derived from.
    pub fee_growth_outside_0: U256,
    pub fee_growth_outside_1: U256,
    /// Tick-cumulative on the other side of this tick at the moment it
    /// was initialized (or last crossed). Wraps mod 2^64.
    pub tick_cumulative_outside: i64,
    /// Seconds-per-liquidity-cumulative on the other side of this tick.
    /// Wraps mod 2^160, kept as a `U256`.
    pub seconds_per_liquidity_outside: U256,
    /// Seconds on the other side of this tick.
    pub seconds_outside: u32,
}

impl TickInfo {
    pub fn is_initialized(&self) -> bool {
        self.liquidity_gross != 0
    }

    /// Updates a tick and returns whether it flipped from initialized to
    /// uninitialized, or vice versa.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        tick: i32,
        tick_current: i32,
        liquidity_delta: i128,
        fee_growth_global_0: U256,
        fee_growth_global_1: U256,
        tick_cumulative: i64,
        seconds_per_liquidity_cumulative: U256,
        time: u32,
        upper: bool,
        max_liquidity: u128,
    ) -> Result<bool, PairError> {
        let liquidity_gross_before = self.liquidity_gross;
        let liquidity_gross_after = liquidity_math::add_delta(liquidity_gross_before, liquidity_delta)?;

        if liquidity_gross_after > max_liquidity {
            return Err(PairError::LiquidityOverflow);
        }

        let flipped = (liquidity_gross_after == 0) != (liquidity_gross_before == 0);

        if liquidity_gross_before == 0 {
            // by convention, assume all growth before a tick was
            // initialized happened below the tick
            if tick <= tick_current {
                self.fee_growth_outside_0 = fee_growth_global_0;
                self.fee_growth_outside_1 = fee_growth_global_1;
                self.tick_cumulative_outside = tick_cumulative;
                self.seconds_per_liquidity_outside = seconds_per_liquidity_cumulative;
                self.seconds_outside = time;
            }
        }

        self.liquidity_gross = liquidity_gross_after;
        self.liquidity_net = if upper {
            self.liquidity_net - liquidity_delta
        } else {
            self.liquidity_net + liquidity_delta
        };

        Ok(flipped)
    }

    /// Transitions to this tick, returning the liquidity delta to apply to
    /// the pool's active liquidity.
    pub fn cross(
        &mut self,
        fee_growth_global_0: U256,
        fee_growth_global_1: U256,
        tick_cumulative: i64,
        seconds_per_liquidity_cumulative: U256,
        time: u32,
    ) -> i128 {
        self.fee_growth_outside_0 = fee_growth_global_0.overflowing_sub(self.fee_growth_outside_0).0;
        self.fee_growth_outside_1 = fee_growth_global_1.overflowing_sub(self.fee_growth_outside_1).0;
        self.tick_cumulative_outside = tick_cumulative.wrapping_sub(self.tick_cumulative_outside);
        self.seconds_per_liquidity_outside = seconds_per_liquidity_cumulative
            .overflowing_sub(self.seconds_per_liquidity_outside)
            .0;
        self.seconds_outside = time.wrapping_sub(self.seconds_outside);
        self.liquidity_net
    }

    /// Clears a tick's data once its last position has been removed.
    pub fn clear(&mut self) {
        *self = TickInfo::default();
    }
}

/// Returns the fee growth per unit of liquidity inside a position's
/// tick range: `fr = fg - f_below(lower) - f_above(upper)`.
pub fn get_fee_growth_inside(
    tick_lower: &TickInfo,
    tick_lower_index: i32,
    tick_upper: &TickInfo,
    tick_upper_index: i32,
    tick_current: i32,
    fee_growth_global_0: U256,
    fee_growth_global_1: U256,
) -> (U256, U256) {
    let (fee_growth_below_0, fee_growth_below_1) = if tick_current >= tick_lower_index {
        (tick_lower.fee_growth_outside_0, tick_lower.fee_growth_outside_1)
    } else {
        (
            fee_growth_global_0.overflowing_sub(tick_lower.fee_growth_outside_0).0,
            fee_growth_global_1.overflowing_sub(tick_lower.fee_growth_outside_1).0,
        )
    };

    let (fee_growth_above_0, fee_growth_above_1) = if tick_current < tick_upper_index {
        (tick_upper.fee_growth_outside_0, tick_upper.fee_growth_outside_1)
    } else {
        (
            fee_growth_global_0.overflowing_sub(tick_upper.fee_growth_outside_0).0,
            fee_growth_global_1.overflowing_sub(tick_upper.fee_growth_outside_1).0,
        )
    };

    (
        fee_growth_global_0
            .overflowing_sub(fee_growth_below_0)
            .0
            .overflowing_sub(fee_growth_above_0)
            .0,
        fee_growth_global_1
            .overflowing_sub(fee_growth_below_1)
            .0
            .overflowing_sub(fee_growth_above_1)
            .0,
    )
}

/// A tick is valid iff it lies within the global tick bounds and is a
/// multiple of the pool's tick spacing.
pub fn check_tick_boundary(tick: i32, tick_spacing: i32) -> Result<(), PairError> {
    if tick < tick_math::MIN_TICK {
        return Err(PairError::TickLowerOutOfRange);
    }
    if tick > tick_math::MAX_TICK {
        return Err(PairError::TickUpperOutOfRange);
    }
    if tick % tick_spacing != 0 {
        return Err(PairError::TickNotAligned);
    }
    Ok(())
}

pub fn check_ticks_order(tick_lower: i32, tick_upper: i32) -> Result<(), PairError> {
    if tick_lower >= tick_upper {
        return Err(PairError::TicksOutOfOrder);
    }
    Ok(())
}

/// Maximum liquidity allocation for a single tick, derived from tick
/// spacing so that the full tick range can never overflow the sum of
/// every position's liquidity at one tick.
pub fn tick_spacing_to_max_liquidity_per_tick(tick_spacing: i32) -> u128 {
    let min_tick = (tick_math::MIN_TICK / tick_spacing) * tick_spacing;
    let max_tick = (tick_math::MAX_TICK / tick_spacing) * tick_spacing;
    let num_ticks = ((max_tick - min_tick) / tick_spacing) as u128 + 1;
    u128::MAX / num_ticks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tick_at_or_below_current_snapshots_global_growth() {
        let mut tick = TickInfo::default();
        let flipped = tick
            .update(0, 10, 100, U256::from(5u64), U256::from(7u64), 42, U256::from(9u64), 1_000, false, u128::MAX)
            .unwrap();
        assert!(flipped);
        assert_eq!(tick.fee_growth_outside_0, U256::from(5u64));
        assert_eq!(tick.fee_growth_outside_1, U256::from(7u64));
        assert_eq!(tick.tick_cumulative_outside, 42);
        assert_eq!(tick.seconds_per_liquidity_outside, U256::from(9u64));
        assert_eq!(tick.seconds_outside, 1_000);
    }

    #[test]
    fn new_tick_above_current_does_not_snapshot() {
        let mut tick = TickInfo::default();
        tick.update(20, 10, 100, U256::from(5u64), U256::from(7u64), 42, U256::from(9u64), 1_000, false, u128::MAX)
            .unwrap();
        assert_eq!(tick.fee_growth_outside_0, U256::zero());
        assert_eq!(tick.tick_cumulative_outside, 0);
        assert_eq!(tick.seconds_outside, 0);
    }

    #[test]
    fn flips_only_on_zero_crossing() {
        let mut tick = TickInfo::default();
        assert!(tick
            .update(0, 0, 100, U256::zero(), U256::zero(), 0, U256::zero(), 0, false, u128::MAX)
            .unwrap());
        assert!(!tick
            .update(0, 0, 50, U256::zero(), U256::zero(), 0, U256::zero(), 0, false, u128::MAX)
            .unwrap());
        assert!(tick
            .update(0, 0, -150, U256::zero(), U256::zero(), 0, U256::zero(), 0, false, u128::MAX)
            .unwrap());
    }

    #[test]
    fn upper_tick_negates_liquidity_net() {
        let mut tick = TickInfo::default();
        tick.update(0, 0, 100, U256::zero(), U256::zero(), 0, U256::zero(), 0, true, u128::MAX)
            .unwrap();
        assert_eq!(tick.liquidity_net, -100);
    }

    #[test]
    fn cross_inverts_every_outside_accumulator() {
        let mut tick = TickInfo {
            liquidity_gross: 1,
            liquidity_net: 10,
            fee_growth_outside_0: U256::from(3u64),
            fee_growth_outside_1: U256::from(4u64),
            tick_cumulative_outside: 2,
            seconds_per_liquidity_outside: U256::from(1u64),
            seconds_outside: 100,
        };
        let delta = tick.cross(U256::from(10u64), U256::from(10u64), 12, U256::from(5u64), 300);
        assert_eq!(delta, 10);
        assert_eq!(tick.fee_growth_outside_0, U256::from(7u64));
        assert_eq!(tick.fee_growth_outside_1, U256::from(6u64));
        assert_eq!(tick.tick_cumulative_outside, 10);
        assert_eq!(tick.seconds_per_liquidity_outside, U256::from(4u64));
        assert_eq!(tick.seconds_outside, 200);
    }

    #[test]
    fn max_liquidity_per_tick_covers_full_range() {
        let max = tick_spacing_to_max_liquidity_per_tick(60);
        assert!(max > 0);
    }
}
