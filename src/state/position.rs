///! Per-owner, per-range position accounting: liquidity and the fees owed
///! to it since the position's fee growth checkpoint was last taken.
use crate::error::PairError;
use crate::libraries::big_num::U256;
use crate::libraries::full_math::MulDiv;
use crate::libraries::liquidity_math;

/// Key identifying a position: owner plus the tick range it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey {
    pub owner: u64,
    pub tick_lower: i32,
    pub tick_upper: i32,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PositionInfo {
    /// Amount of liquidity owned by this position.
    pub liquidity: u128,
    /// Fee growth per unit of liquidity, in token_0/token_1, as of the
    /// last update to liquidity or fees owed.
    pub fee_growth_inside_0_last: U256,
    pub fee_growth_inside_1_last: U256,
    /// Fees owed to the position owner, in token_0/token_1, not yet
    /// collected.
    pub tokens_owed_0: u128,
    pub tokens_owed_1: u128,
}

impl PositionInfo {
    /// Credits this position with any fees earned since its last
    /// checkpoint and applies `liquidity_delta`. A no-op update with zero
    /// liquidity and zero delta is allowed even once a position still
    /// exists only to be fully burned, matching the checkpoint-or-skip
    /// behavior positions need around `burn`.
    pub fn update(
        &mut self,
        liquidity_delta: i128,
        fee_growth_inside_0: U256,
        fee_growth_inside_1: U256,
    ) -> Result<(), PairError> {
        if self.liquidity == 0 && liquidity_delta == 0 {
            return Ok(());
        }

        let tokens_owed_0 = fee_growth_delta_to_tokens_owed(
            fee_growth_inside_0.overflowing_sub(self.fee_growth_inside_0_last).0,
            self.liquidity,
        );
        let tokens_owed_1 = fee_growth_delta_to_tokens_owed(
            fee_growth_inside_1.overflowing_sub(self.fee_growth_inside_1_last).0,
            self.liquidity,
        );

        self.liquidity = liquidity_math::add_delta(self.liquidity, liquidity_delta)?;
        self.fee_growth_inside_0_last = fee_growth_inside_0;
        self.fee_growth_inside_1_last = fee_growth_inside_1;

        if tokens_owed_0 > 0 || tokens_owed_1 > 0 {
            self.tokens_owed_0 = self.tokens_owed_0.saturating_add(tokens_owed_0);
            self.tokens_owed_1 = self.tokens_owed_1.saturating_add(tokens_owed_1);
        }
        Ok(())
    }
}

/// `2^128`, the resolution fee growth accumulators are carried at.
fn q128() -> U256 {
    U256::one() << 128
}

/// `floor(fee_growth_delta * liquidity / 2^128)`, saturating at `u128::MAX`
/// — fee amounts owed never realistically approach that bound.
fn fee_growth_delta_to_tokens_owed(fee_growth_delta: U256, liquidity: u128) -> u128 {
    match U256::from(liquidity).mul_div_floor(fee_growth_delta, q128()) {
        Some(v) if v <= U256::from(u128::MAX) => v.as_u128(),
        _ => u128::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_mint_has_no_fees_owed() {
        let mut pos = PositionInfo::default();
        pos.update(1_000, U256::zero(), U256::zero()).unwrap();
        assert_eq!(pos.liquidity, 1_000);
        assert_eq!(pos.tokens_owed_0, 0);
    }

    #[test]
    fn subsequent_update_credits_fee_growth_delta() {
        let mut pos = PositionInfo::default();
        pos.update(1_000, U256::zero(), U256::zero()).unwrap();
        let growth = U256::from(1u64) << 128; // 1.0 in Q128.128 terms
        pos.update(0, growth, U256::zero()).unwrap();
        assert_eq!(pos.tokens_owed_0, 1_000);
    }

    #[test]
    fn zero_delta_on_untouched_position_is_noop() {
        let mut pos = PositionInfo::default();
        pos.update(0, U256::from(123u64), U256::from(456u64)).unwrap();
        assert_eq!(pos.fee_growth_inside_0_last, U256::zero());
    }

    #[test]
    fn burning_all_liquidity_still_checkpoints_fees() {
        let mut pos = PositionInfo::default();
        pos.update(1_000, U256::zero(), U256::zero()).unwrap();
        let growth = U256::from(1u64) << 128;
        pos.update(-1_000, growth, growth).unwrap();
        assert_eq!(pos.liquidity, 0);
        assert_eq!(pos.tokens_owed_0, 1_000);
        assert_eq!(pos.tokens_owed_1, 1_000);
    }
}
