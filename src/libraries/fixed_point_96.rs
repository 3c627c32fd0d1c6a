/// Q64.96 resolution: sqrt prices are stored as `sqrtP * 2^96`.
pub const RESOLUTION: u8 = 96;

use crate::libraries::big_num::U256;

/// `2^96` as a `U256`, the fixed-point one used throughout sqrt-price math.
pub fn q96() -> U256 {
    U256::one() << RESOLUTION
}
