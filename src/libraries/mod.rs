pub mod big_num;
pub mod fixed_point_96;
pub mod full_math;
pub mod liquidity_math;
pub mod sqrt_price_math;
pub mod swap_math;
pub mod tick_bitmap;
pub mod tick_math;
pub mod unsafe_math;

pub use big_num::*;
pub use fixed_point_96::*;
pub use full_math::*;
pub use liquidity_math::*;
pub use sqrt_price_math::*;
pub use swap_math::*;
pub use tick_bitmap::*;
pub use tick_math::*;
pub use unsafe_math::*;
