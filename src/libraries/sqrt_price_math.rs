///! Finds price changes for a given change in token supply, and vice versa.
use super::big_num::U256;
use super::fixed_point_96;
use super::full_math::MulDiv;
use super::unsafe_math::UnsafeMathTrait;
use crate::error::PairError;

/// Gets the next sqrt price `√P'` given a delta of token 0.
///
/// Always rounds up because:
/// 1. In the exact-output case, token 0 supply decreases, raising price.
///    Moving the price up ensures the exact output is still met.
/// 2. In the exact-input case, token 0 supply increases, lowering price.
///    Rounding down here would overshoot the price impact we owe the
///    trader; we only need to meet the input amount, not over-deliver.
///
/// # Formula
///
/// `√P' = √P * L / (L + Δx*√P)`, or if `Δx*√P` overflows,
/// `√P' = L / (L/√P + Δx)`.
pub fn get_next_sqrt_price_from_amount_0_rounding_up(
    sqrt_p_x96: U256,
    liquidity: u128,
    amount: u128,
    add: bool,
) -> Result<U256, PairError> {
    if amount == 0 {
        return Ok(sqrt_p_x96);
    }
    let numerator_1 = U256::from(liquidity) << fixed_point_96::RESOLUTION;

    if add {
        if let Some(product) = U256::from(amount).checked_mul(sqrt_p_x96) {
            let denominator = numerator_1 + product;
            if denominator >= numerator_1 {
                return numerator_1
                    .mul_div_ceil(sqrt_p_x96, denominator)
                    .ok_or(PairError::PriceOverflow);
            }
        }
        let denom = (numerator_1 / sqrt_p_x96)
            .checked_add(U256::from(amount))
            .ok_or(PairError::PriceOverflow)?;
        Ok(U256::div_rounding_up(numerator_1, denom))
    } else {
        let product = U256::from(amount)
            .checked_mul(sqrt_p_x96)
            .ok_or(PairError::PriceOverflow)?;
        if numerator_1 <= product {
            return Err(PairError::PriceOverflow);
        }
        let denominator = numerator_1 - product;
        numerator_1
            .mul_div_ceil(sqrt_p_x96, denominator)
            .ok_or(PairError::PriceOverflow)
    }
}

/// Gets the next sqrt price given a delta of token 1.
///
/// Always rounds down for the symmetric reason `amount_0` rounds up.
///
/// # Formula
///
/// `√P' = √P + Δy / L`
pub fn get_next_sqrt_price_from_amount_1_rounding_down(
    sqrt_p_x96: U256,
    liquidity: u128,
    amount: u128,
    add: bool,
) -> Result<U256, PairError> {
    if add {
        let quotient = (U256::from(amount) << fixed_point_96::RESOLUTION) / U256::from(liquidity);
        Ok(sqrt_p_x96 + quotient)
    } else {
        let quotient = U256::div_rounding_up(
            U256::from(amount) << fixed_point_96::RESOLUTION,
            U256::from(liquidity),
        );
        if sqrt_p_x96 <= quotient {
            return Err(PairError::PriceOverflow);
        }
        Ok(sqrt_p_x96 - quotient)
    }
}

/// Gets the next sqrt price given an input amount of token 0 or token 1.
pub fn get_next_sqrt_price_from_input(
    sqrt_p_x96: U256,
    liquidity: u128,
    amount_in: u128,
    zero_for_one: bool,
) -> Result<U256, PairError> {
    if sqrt_p_x96.is_zero() || liquidity == 0 {
        return Err(PairError::PriceOverflow);
    }
    if zero_for_one {
        get_next_sqrt_price_from_amount_0_rounding_up(sqrt_p_x96, liquidity, amount_in, true)
    } else {
        get_next_sqrt_price_from_amount_1_rounding_down(sqrt_p_x96, liquidity, amount_in, true)
    }
}

/// Gets the next sqrt price given an output amount of token 0 or token 1.
pub fn get_next_sqrt_price_from_output(
    sqrt_p_x96: U256,
    liquidity: u128,
    amount_out: u128,
    zero_for_one: bool,
) -> Result<U256, PairError> {
    if sqrt_p_x96.is_zero() || liquidity == 0 {
        return Err(PairError::PriceOverflow);
    }
    if zero_for_one {
        get_next_sqrt_price_from_amount_1_rounding_down(sqrt_p_x96, liquidity, amount_out, false)
    } else {
        get_next_sqrt_price_from_amount_0_rounding_up(sqrt_p_x96, liquidity, amount_out, false)
    }
}

/// Gets the amount_0 delta between two prices, for a given amount of liquidity.
///
/// `Δx = L * (1/√P_lower - 1/√P_upper) = L * (√P_upper - √P_lower) / (√P_upper * √P_lower)`
pub fn get_amount_0_delta_unsigned(
    mut sqrt_ratio_a_x96: U256,
    mut sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<u128, PairError> {
    if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        std::mem::swap(&mut sqrt_ratio_a_x96, &mut sqrt_ratio_b_x96);
    }
    if sqrt_ratio_a_x96.is_zero() {
        return Err(PairError::PriceOverflow);
    }

    let numerator_1 = U256::from(liquidity) << fixed_point_96::RESOLUTION;
    let numerator_2 = sqrt_ratio_b_x96 - sqrt_ratio_a_x96;

    let result = if round_up {
        let inner = numerator_1
            .mul_div_ceil(numerator_2, sqrt_ratio_b_x96)
            .ok_or(PairError::PriceOverflow)?;
        U256::div_rounding_up(inner, sqrt_ratio_a_x96)
    } else {
        numerator_1
            .mul_div_floor(numerator_2, sqrt_ratio_b_x96)
            .ok_or(PairError::PriceOverflow)?
            / sqrt_ratio_a_x96
    };
    if result > U256::from(u128::MAX) {
        return Err(PairError::PriceOverflow);
    }
    Ok(result.as_u128())
}

/// Gets the amount_1 delta between two prices, for a given amount of liquidity.
///
/// `Δy = L * (√P_upper - √P_lower)`
pub fn get_amount_1_delta_unsigned(
    mut sqrt_ratio_a_x96: U256,
    mut sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<u128, PairError> {
    if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        std::mem::swap(&mut sqrt_ratio_a_x96, &mut sqrt_ratio_b_x96);
    }
    let delta = sqrt_ratio_b_x96 - sqrt_ratio_a_x96;
    let q96 = fixed_point_96::q96();
    let result = if round_up {
        U256::from(liquidity)
            .mul_div_ceil(delta, q96)
            .ok_or(PairError::PriceOverflow)?
    } else {
        U256::from(liquidity)
            .mul_div_floor(delta, q96)
            .ok_or(PairError::PriceOverflow)?
    };
    if result > U256::from(u128::MAX) {
        return Err(PairError::PriceOverflow);
    }
    Ok(result.as_u128())
}

/// Signed token_0 delta between two prices, for a signed change in liquidity.
pub fn get_amount_0_delta_signed(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: i128,
) -> Result<i128, PairError> {
    if liquidity < 0 {
        let unsigned =
            get_amount_0_delta_unsigned(sqrt_ratio_a_x96, sqrt_ratio_b_x96, -liquidity as u128, false)?;
        Ok(-(unsigned as i128))
    } else {
        let unsigned =
            get_amount_0_delta_unsigned(sqrt_ratio_a_x96, sqrt_ratio_b_x96, liquidity as u128, true)?;
        Ok(unsigned as i128)
    }
}

/// Signed token_1 delta between two prices, for a signed change in liquidity.
pub fn get_amount_1_delta_signed(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: i128,
) -> Result<i128, PairError> {
    if liquidity < 0 {
        let unsigned =
            get_amount_1_delta_unsigned(sqrt_ratio_a_x96, sqrt_ratio_b_x96, -liquidity as u128, false)?;
        Ok(-(unsigned as i128))
    } else {
        let unsigned =
            get_amount_1_delta_unsigned(sqrt_ratio_a_x96, sqrt_ratio_b_x96, liquidity as u128, true)?;
        Ok(unsigned as i128)
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
    fn amount_0_delta_is_symmetric_in_argument_order() {
        let a = price_at(-1000);
        let b = price_at(1000);
        let forward = get_amount_0_delta_unsigned(a, b, 1_000_000, false).unwrap();
        let backward = get_amount_0_delta_unsigned(b, a, 1_000_000, false).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn rounding_up_gives_at_least_as_much_as_rounding_down() {
        let a = price_at(-12345);
        let b = price_at(6789);
        let down = get_amount_1_delta_unsigned(a, b, 123_456_789, false).unwrap();
        let up = get_amount_1_delta_unsigned(a, b, 123_456_789, true).unwrap();
        assert!(up >= down);
    }

    #[test]
    fn input_then_output_round_trip_moves_price_back() {
        let start = price_at(0);
        let liquidity = 10_000_000_000u128;
        let after_in =
            get_next_sqrt_price_from_input(start, liquidity, 1_000_000, false).unwrap();
        assert!(after_in > start);
    }

    #[test]
    fn zero_amount_is_a_no_op() {
        let start = price_at(100);
        let unchanged =
            get_next_sqrt_price_from_amount_0_rounding_up(start, 1_000, 0, true).unwrap();
        assert_eq!(unchanged, start);
    }
}
