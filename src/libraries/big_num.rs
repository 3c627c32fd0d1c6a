//! Fixed-width big integers used as intermediate types for overflow-safe
//! fixed-point arithmetic. U128 stands in for `u128` so it can be widened;
//! U256 and U512 exist purely as intermediates for `mulDiv`-style products.
use uint::construct_uint;

construct_uint! {
    pub struct U128(2);
}

construct_uint! {
    pub struct U256(4);
}

construct_uint! {
    pub struct U512(8);
}
