///! Computes the result of swapping some amount in, or out, within a single
///! tick range — i.e. while liquidity stays constant.
use super::big_num::U256;
use super::full_math::MulDiv;
use super::sqrt_price_math;
use crate::error::PairError;

/// Denominator for `fee_pips`: hundredths of a basis point (1e-6).
pub const FEE_RATE_DENOMINATOR: u32 = 1_000_000;

/// Result of a single swap step.
#[derive(Default, Debug, Clone, Copy)]
pub struct SwapStep {
    /// The price after swapping the amount in/out, never past the target.
    pub sqrt_ratio_next_x96: U256,
    /// The amount swapped in, of whichever token the swap direction takes in.
    pub amount_in: u128,
    /// The amount received, of whichever token the swap direction gives out.
    pub amount_out: u128,
    /// The portion of `amount_in` retained as a fee.
    pub fee_amount: u128,
}

/// Computes one step of a swap given the direction implied by
/// `sqrt_ratio_current_x96` vs `sqrt_ratio_target_x96`, and whether the
/// swap is exact-input (`amount_remaining >= 0`) or exact-output.
///
/// The fee, plus `amount_in`, never exceeds `amount_remaining` for an
/// exact-input swap.
pub fn compute_swap_step(
    sqrt_ratio_current_x96: U256,
    sqrt_ratio_target_x96: U256,
    liquidity: u128,
    amount_remaining: i128,
    fee_pips: u32,
) -> Result<SwapStep, PairError> {
    let zero_for_one = sqrt_ratio_current_x96 >= sqrt_ratio_target_x96;
    let exact_in = amount_remaining >= 0;
    let mut step = SwapStep::default();

    if exact_in {
        let amount_remaining_less_fee = (amount_remaining as u128)
            .mul_div_floor_u128(
                (FEE_RATE_DENOMINATOR - fee_pips) as u128,
                FEE_RATE_DENOMINATOR as u128,
            )
            .ok_or(PairError::PriceOverflow)?;
        step.amount_in = if zero_for_one {
            sqrt_price_math::get_amount_0_delta_unsigned(
                sqrt_ratio_target_x96,
                sqrt_ratio_current_x96,
                liquidity,
                true,
            )?
        } else {
            sqrt_price_math::get_amount_1_delta_unsigned(
                sqrt_ratio_current_x96,
                sqrt_ratio_target_x96,
                liquidity,
                true,
            )?
        };
        step.sqrt_ratio_next_x96 = if amount_remaining_less_fee >= step.amount_in {
            sqrt_ratio_target_x96
        } else {
            sqrt_price_math::get_next_sqrt_price_from_input(
                sqrt_ratio_current_x96,
                liquidity,
                amount_remaining_less_fee,
                zero_for_one,
            )?
        };
    } else {
        step.amount_out = if zero_for_one {
            sqrt_price_math::get_amount_1_delta_unsigned(
                sqrt_ratio_target_x96,
                sqrt_ratio_current_x96,
                liquidity,
                false,
            )?
        } else {
            sqrt_price_math::get_amount_0_delta_unsigned(
                sqrt_ratio_current_x96,
                sqrt_ratio_target_x96,
                liquidity,
                false,
            )?
        };
        let amount_remaining_abs = (-amount_remaining) as u128;
        step.sqrt_ratio_next_x96 = if amount_remaining_abs >= step.amount_out {
            sqrt_ratio_target_x96
        } else {
            sqrt_price_math::get_next_sqrt_price_from_output(
                sqrt_ratio_current_x96,
                liquidity,
                amount_remaining_abs,
                zero_for_one,
            )?
        };
    }

    let reached_target = sqrt_ratio_target_x96 == step.sqrt_ratio_next_x96;

    if zero_for_one {
        if !(reached_target && exact_in) {
            step.amount_in = sqrt_price_math::get_amount_0_delta_unsigned(
                step.sqrt_ratio_next_x96,
                sqrt_ratio_current_x96,
                liquidity,
                true,
            )?;
        }
        if !(reached_target && !exact_in) {
            step.amount_out = sqrt_price_math::get_amount_1_delta_unsigned(
                step.sqrt_ratio_next_x96,
                sqrt_ratio_current_x96,
                liquidity,
                false,
            )?;
        }
    } else {
        if !(reached_target && exact_in) {
            step.amount_in = sqrt_price_math::get_amount_1_delta_unsigned(
                sqrt_ratio_current_x96,
                step.sqrt_ratio_next_x96,
                liquidity,
                true,
            )?;
        }
        if !(reached_target && !exact_in) {
            step.amount_out = sqrt_price_math::get_amount_0_delta_unsigned(
                sqrt_ratio_current_x96,
                step.sqrt_ratio_next_x96,
                liquidity,
                false,
            )?;
        }
    }

    // cap output to not exceed the remaining amount requested
    if !exact_in && step.amount_out > (-amount_remaining) as u128 {
        step.amount_out = (-amount_remaining) as u128;
    }

    step.fee_amount = if exact_in && step.sqrt_ratio_next_x96 != sqrt_ratio_target_x96 {
        // target wasn't reached: whatever's left of the input is fee, not dust
        (amount_remaining as u128)
            .checked_sub(step.amount_in)
            .ok_or(PairError::PriceOverflow)?
    } else {
        step.amount_in
            .mul_div_ceil_u128(fee_pips as u128, (FEE_RATE_DENOMINATOR - fee_pips) as u128)
            .ok_or(PairError::PriceOverflow)?
    };

    Ok(step)
}

/// `u128`-native `mul_div_floor`/`mul_div_ceil` built on top of the `U256`
/// widening used throughout this crate, for the two spots above that work
/// directly in token units rather than Q64.96 price units.
trait MulDivU128 {
    fn mul_div_floor_u128(self, num: u128, denom: u128) -> Option<u128>;
    fn mul_div_ceil_u128(self, num: u128, denom: u128) -> Option<u128>;
}

impl MulDivU128 for u128 {
    fn mul_div_floor_u128(self, num: u128, denom: u128) -> Option<u128> {
        use super::big_num::U256;
        let r = (U256::from(self) * U256::from(num)) / U256::from(denom);
        if r > U256::from(u128::MAX) {
            None
        } else {
            Some(r.as_u128())
        }
    }

    fn mul_div_ceil_u128(self, num: u128, denom: u128) -> Option<u128> {
        use super::big_num::U256;
        let r = (U256::from(self) * U256::from(num) + U256::from(denom - 1)) / U256::from(denom);
        if r > U256::from(u128::MAX) {
            None
        } else {
            Some(r.as_u128())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libraries::tick_math;

    fn price_at(tick: i32) -> U256 {
        tick_math::get_sqrt_price_at_tick(tick).unwrap()
    }

    #[test]
    fn exact_input_never_exceeds_amount_remaining() {
        let current = price_at(0);
        let target = price_at(1000);
        let step = compute_swap_step(current, target, 10_000_000, 1_000, 3000).unwrap();
        assert!(step.amount_in + step.fee_amount <= 1_000);
    }

    #[test]
    fn exact_output_caps_at_remaining() {
        let current = price_at(0);
        let target = price_at(-1000);
        let step = compute_swap_step(current, target, 10_000_000_000, -500, 3000).unwrap();
        assert!(step.amount_out <= 500);
    }

    #[test]
    fn zero_fee_swap_has_no_fee_amount_when_target_reached() {
        let current = price_at(0);
        let target = price_at(1);
        let step = compute_swap_step(current, target, 1_000_000_000_000, 1_000_000, 0).unwrap();
        if step.sqrt_ratio_next_x96 == target {
            assert_eq!(step.fee_amount, 0);
        }
    }
}
