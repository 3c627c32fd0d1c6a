///! The pair's packed "hot" state: current price, tick, oracle write
///! cursor, protocol fee split, and the reentrancy lock.
use crate::libraries::big_num::U256;

#[derive(Debug, Clone, Copy)]
pub struct Slot0 {
    /// The current Q64.96 sqrt price.
    pub sqrt_price_x96: U256,
    /// The tick corresponding to `sqrt_price_x96`. Note this may not
    /// always be the tick that `sqrt_price_x96` would map to exactly,
    /// since this value is only updated on `swap`/`mint`/`burn`, never
    /// recomputed eagerly.
    pub tick: i32,
    /// The index of the most recently written oracle observation.
    pub observation_index: u16,
    /// The number of oracle observations currently populated.
    pub observation_cardinality: u16,
    /// The target cardinality `observation_cardinality` grows towards.
    pub observation_cardinality_next: u16,
    /// The protocol fee as a percentage of the trade fee, expressed as
    /// two packed 4-bit-resolution fractions: `fee_protocol % 16` for
    /// token_0, `fee_protocol >> 4` for token_1. `0` means no protocol
    /// fee is charged.
    pub fee_protocol: u8,
    /// Reentrancy guard. `mint`/`swap`/`burn`/`collect` all require this
    /// to be `true` on entry and leave it `true` on exit; it only reads
    /// `false` transiently while a callback is suspended mid-call.
    pub unlocked: bool,
}

impl Slot0 {
    pub fn fee_protocol_0(&self) -> u8 {
        self.fee_protocol % 16
    }

    pub fn fee_protocol_1(&self) -> u8 {
        self.fee_protocol >> 4
    }

    pub fn set_fee_protocol(&mut self, fee_protocol_0: u8, fee_protocol_1: u8) {
        self.fee_protocol = fee_protocol_0 + (fee_protocol_1 << 4);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Slot0 {
        Slot0 {
            sqrt_price_x96: U256::zero(),
            tick: 0,
            observation_index: 0,
            observation_cardinality: 1,
            observation_cardinality_next: 1,
            fee_protocol: 0,
            unlocked: true,
        }
    }

    #[test]
    fn fee_protocol_packs_two_nibbles() {
        let mut slot0 = sample();
        slot0.set_fee_protocol(4, 6);
        assert_eq!(slot0.fee_protocol_0(), 4);
        assert_eq!(slot0.fee_protocol_1(), 6);
    }
}
