///! Conversion between a tick index and the Q64.96 sqrt price it represents.
use crate::error::PairError;
use crate::libraries::big_num::U256;

/// The minimum tick that may be passed to `get_sqrt_price_at_tick`.
pub const MIN_TICK: i32 = -887272;
/// The maximum tick that may be passed to `get_sqrt_price_at_tick`.
pub const MAX_TICK: i32 = -MIN_TICK;

/// The sqrt price for `MIN_TICK`.
pub const MIN_SQRT_PRICE: u128 = 4295128739;
/// The sqrt price for `MAX_TICK`. Exceeds `u128`, kept as a `U256` literal
/// via `sqrt_price_bounds`; the constant below is for display/comparison
/// against `u128` values only where it is known to fit is not assumed.
pub const MAX_SQRT_PRICE_STR: &str = "1461446703485210103287273052203988822378723970342";

/// Returns `(MIN_SQRT_PRICE, MAX_SQRT_PRICE)` as `U256`.
pub fn sqrt_price_bounds() -> (U256, U256) {
    (
        U256::from(MIN_SQRT_PRICE),
        U256::from_dec_str(MAX_SQRT_PRICE_STR).expect("valid decimal literal"),
    )
}

/// Computes `sqrtP(tick) * 2^96`, the Q64.96 sqrt price at a given tick.
///
/// Ported from the magic-constant bit-chain used by every Uniswap v3-style
/// implementation: each bit of `abs(tick)` multiplies in a precomputed
/// constant approximating `sqrt(1.0001)^(2^i)` in Q128.128, accumulated in
/// `U256` to avoid truncation, then the whole product is inverted for
/// positive ticks and rounded down to Q128.96 before the final round-up.
pub fn get_sqrt_price_at_tick(tick: i32) -> Result<U256, PairError> {
    if tick < MIN_TICK || tick > MAX_TICK {
        return Err(PairError::TickOutOfRange);
    }
    let abs_tick = tick.unsigned_abs();

    let mut ratio: U256 = if abs_tick & 0x1 != 0 {
        U256::from_str_radix("fffcb933bd6fad37aa2d162d1a594001", 16).unwrap()
    } else {
        U256::from(1u128) << 128
    };

    let mul_shift =
        |ratio: U256, hex_const: &str| -> U256 {
            (ratio * U256::from_str_radix(hex_const, 16).unwrap()) >> 128
        };

    if abs_tick & 0x2 != 0 {
        ratio = mul_shift(ratio, "fff97272373d413259a46990580e213a");
    }
    if abs_tick & 0x4 != 0 {
        ratio = mul_shift(ratio, "fff2e50f5f656932ef12357cf3c7fdcc");
    }
    if abs_tick & 0x8 != 0 {
        ratio = mul_shift(ratio, "ffe5caca7e10e4e61c3624eaa0941cd0");
    }
    if abs_tick & 0x10 != 0 {
        ratio = mul_shift(ratio, "ffcb9843d60f6159c9db58835c926644");
    }
    if abs_tick & 0x20 != 0 {
        ratio = mul_shift(ratio, "ff973b41fa98c081472e6896dfb254c0");
    }
    if abs_tick & 0x40 != 0 {
        ratio = mul_shift(ratio, "ff2ea16466c96a3843ec78b326b52861");
    }
    if abs_tick & 0x80 != 0 {
        ratio = mul_shift(ratio, "fe5dee046a99a2a811c461f1969c3053");
    }
    if abs_tick & 0x100 != 0 {
        ratio = mul_shift(ratio, "fcbe86c7900a88aedcffc83b479aa3a4");
    }
    if abs_tick & 0x200 != 0 {
        ratio = mul_shift(ratio, "f987a7253ac413176f2b074cf7815e54");
    }
    if abs_tick & 0x400 != 0 {
        ratio = mul_shift(ratio, "f3392b0822b70005940c7a398e4b70f3");
    }
    if abs_tick & 0x800 != 0 {
        ratio = mul_shift(ratio, "e7159475a2c29b7443b29c7fa6e889d9");
    }
    if abs_tick & 0x1000 != 0 {
        ratio = mul_shift(ratio, "d097f3bdfd2022b8845ad8f792aa5825");
    }
    if abs_tick & 0x2000 != 0 {
        ratio = mul_shift(ratio, "a9f746462d870fdf8a65dc1f90e061e5");
    }
    if abs_tick & 0x4000 != 0 {
        ratio = mul_shift(ratio, "70d869a156d2a1b890bb3df62baf32f7");
    }
    if abs_tick & 0x8000 != 0 {
        ratio = mul_shift(ratio, "31be135f97d08fd981231505542fcfa6");
    }
    if abs_tick & 0x10000 != 0 {
        ratio = mul_shift(ratio, "9aa508b5b7a84e1c677de54f3e99bc9");
    }
    if abs_tick & 0x20000 != 0 {
        ratio = mul_shift(ratio, "5d6af8dedb81196699c329225ee604");
    }
    if abs_tick & 0x40000 != 0 {
        ratio = mul_shift(ratio, "2216e584f5fa1ea926041bedfe98");
    }
    if abs_tick & 0x80000 != 0 {
        ratio = mul_shift(ratio, "48a170391f7dc42444e8fa2");
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q128.96, rounding up.
    let shifted = ratio >> 32;
    let remainder_nonzero = (ratio & ((U256::from(1u128) << 32) - 1)) != U256::zero();
    let sqrt_price_x96 = if remainder_nonzero {
        shifted + U256::one()
    } else {
        shifted
    };

    Ok(sqrt_price_x96)
}

/// Inverse of `get_sqrt_price_at_tick`: the greatest tick whose sqrt price
/// does not exceed `sqrt_price_x96`.
///
/// `get_sqrt_price_at_tick` is strictly increasing in `tick`, so rather than
/// port the bit-shift log-approximation used by gas-metered implementations
/// this binary-searches over the tick domain directly against that forward
/// function — ~21 evaluations, correct by the same monotonicity invariant
/// the forward function is tested against.
pub fn get_tick_at_sqrt_price(sqrt_price_x96: U256) -> Result<i32, PairError> {
    let (min_sqrt, max_sqrt) = sqrt_price_bounds();
    if sqrt_price_x96 < min_sqrt || sqrt_price_x96 >= max_sqrt {
        return Err(PairError::SqrtPriceOutOfRange);
    }

    let mut lo = MIN_TICK;
    let mut hi = MAX_TICK;
    while lo < hi {
        // bias the midpoint high so the loop converges on the greatest
        // tick whose price does not exceed the target
        let mid = lo + (hi - lo + 1) / 2;
        let mid_price = get_sqrt_price_at_tick(mid)?;
        if mid_price <= sqrt_price_x96 {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    Ok(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_tick_matches_min_sqrt_price() {
        assert_eq!(get_sqrt_price_at_tick(MIN_TICK).unwrap(), U256::from(MIN_SQRT_PRICE));
    }

    #[test]
    fn max_tick_matches_max_sqrt_price() {
        let (_, max_sqrt) = sqrt_price_bounds();
        let at_max = get_sqrt_price_at_tick(MAX_TICK).unwrap();
        // the price at MAX_TICK rounds to just under MAX_SQRT_PRICE because
        // the price at MAX_TICK+1 would be the one that is never reached
        assert!(at_max <= max_sqrt);
        assert!(max_sqrt - at_max < U256::from(1_000_000_000u64));
    }

    #[test]
    fn rejects_out_of_range_ticks() {
        assert!(get_sqrt_price_at_tick(MIN_TICK - 1).is_err());
        assert!(get_sqrt_price_at_tick(MAX_TICK + 1).is_err());
    }

    #[test]
    fn sqrt_price_strictly_increases_with_tick() {
        let mut prev = get_sqrt_price_at_tick(MIN_TICK).unwrap();
        for tick in [-500000, -100000, -1, 0, 1, 100000, 500000, MAX_TICK] {
            let price = get_sqrt_price_at_tick(tick).unwrap();
            assert!(price > prev, "price did not increase at tick {tick}");
            prev = price;
        }
    }

    #[test]
    fn tick_round_trips_through_sqrt_price() {
        for tick in [-887272, -443636, -200000, -1, 0, 1, 7, 200000, 443636, 887271] {
            let price = get_sqrt_price_at_tick(tick).unwrap();
            let recovered = get_tick_at_sqrt_price(price).unwrap();
            assert_eq!(recovered, tick);
        }
    }

    #[test]
    fn tick_at_min_sqrt_price_is_min_tick() {
        let (min_sqrt, _) = sqrt_price_bounds();
        assert_eq!(get_tick_at_sqrt_price(min_sqrt).unwrap(), MIN_TICK);
    }

    #[test]
    fn rejects_sqrt_price_outside_bounds() {
        let (min_sqrt, max_sqrt) = sqrt_price_bounds();
        assert!(get_tick_at_sqrt_price(min_sqrt - 1).is_err());
        assert!(get_tick_at_sqrt_price(max_sqrt).is_err());
    }
}
