///! Sparse bitmap of initialized ticks, one bit per tick-spacing-multiple,
///! packed into 256-bit words keyed by a signed word index.
use std::collections::HashMap;

use crate::libraries::big_num::U256;

/// Splits a compressed tick (`tick / tick_spacing`, already floor-divided)
/// into the word it lives in and its bit position within that word.
fn position(compressed: i32) -> (i16, u8) {
    let word_pos = (compressed >> 8) as i16;
    let bit_pos = (compressed & 0xff) as u8;
    (word_pos, bit_pos)
}

/// Divides `tick` by `tick_spacing`, rounding towards negative infinity
/// (as opposed to Rust's default truncation towards zero).
pub fn compress(tick: i32, tick_spacing: i32) -> i32 {
    let mut compressed = tick / tick_spacing;
    if tick < 0 && tick % tick_spacing != 0 {
        compressed -= 1;
    }
    compressed
}

fn most_significant_bit(x: U256) -> Option<u8> {
    if x.is_zero() {
        None
    } else {
        Some((255u32 - x.leading_zeros()) as u8)
    }
}

fn least_significant_bit(x: U256) -> Option<u8> {
    if x.is_zero() {
        None
    } else {
        Some(x.trailing_zeros() as u8)
    }
}

/// Sparse mapping from word index to a 256-bit initialized/uninitialized
/// mask, one bit per tick that is a multiple of the pool's tick spacing.
/// Words with no initialized tick are simply absent from the map.
#[derive(Debug, Default, Clone)]
pub struct TickBitmap {
    words: HashMap<i16, U256>,
}

impl TickBitmap {
    pub fn new() -> Self {
        Self {
            words: HashMap::new(),
        }
    }

    pub fn is_initialized(&self, tick: i32, tick_spacing: i32) -> bool {
        let compressed = compress(tick, tick_spacing);
        let (word_pos, bit_pos) = position(compressed);
        match self.words.get(&word_pos) {
            Some(word) => (*word & (U256::one() << bit_pos)) != U256::zero(),
            None => false,
        }
    }

    /// Flips the bit for `tick` (must already be a multiple of `tick_spacing`).
    pub fn flip_tick(&mut self, tick: i32, tick_spacing: i32) {
        debug_assert_eq!(tick % tick_spacing, 0);
        let compressed = tick / tick_spacing;
        let (word_pos, bit_pos) = position(compressed);
        let mask = U256::one() << bit_pos;
        let word = self.words.entry(word_pos).or_insert_with(U256::zero);
        *word ^= mask;
        if word.is_zero() {
            self.words.remove(&word_pos);
        }
    }

    /// Finds the next initialized tick contained in the same word as the
    /// one containing `tick`, searching left (`lte = true`) or right.
    /// Returns the tick and whether it is actually initialized — when no
    /// initialized tick exists in the word, the boundary tick of the word
    /// is returned with `initialized = false` so the caller can keep
    /// scanning word-by-word.
    pub fn next_initialized_tick_within_one_word(
        &self,
        tick: i32,
        tick_spacing: i32,
        lte: bool,
    ) -> (i32, bool) {
        let compressed = compress(tick, tick_spacing);

        if lte {
            let (word_pos, bit_pos) = position(compressed);
            let mask = (U256::one() << bit_pos) - U256::one() + (U256::one() << bit_pos);
            let masked = self.words.get(&word_pos).copied().unwrap_or_default() & mask;
            let initialized = !masked.is_zero();
            let next = if initialized {
                (compressed - (bit_pos as i32 - most_significant_bit(masked).unwrap() as i32))
                    * tick_spacing
            } else {
                (compressed - bit_pos as i32) * tick_spacing
            };
            (next, initialized)
        } else {
            let (word_pos, bit_pos) = position(compressed + 1);
            let mask = !((U256::one() << bit_pos) - U256::one());
            let masked = self.words.get(&word_pos).copied().unwrap_or_default() & mask;
            let initialized = !masked.is_zero();
            let next = if initialized {
                (compressed + 1 + (least_significant_bit(masked).unwrap() as i32 - bit_pos as i32))
                    * tick_spacing
            } else {
                (compressed + 1 + (255 - bit_pos as i32)) * tick_spacing
            };
            (next, initialized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_then_query_is_initialized() {
        let mut bitmap = TickBitmap::new();
        assert!(!bitmap.is_initialized(60, 60));
        bitmap.flip_tick(60, 60);
        assert!(bitmap.is_initialized(60, 60));
        bitmap.flip_tick(60, 60);
        assert!(!bitmap.is_initialized(60, 60));
    }

    #[test]
    fn empty_word_is_removed_after_flip_back() {
        let mut bitmap = TickBitmap::new();
        bitmap.flip_tick(120, 60);
        assert_eq!(bitmap.words.len(), 1);
        bitmap.flip_tick(120, 60);
        assert!(bitmap.words.is_empty());
    }

    #[test]
    fn next_initialized_searches_left() {
        let mut bitmap = TickBitmap::new();
        bitmap.flip_tick(-60, 60);
        bitmap.flip_tick(60, 60);
        let (next, initialized) = bitmap.next_initialized_tick_within_one_word(120, 60, true);
        assert!(initialized);
        assert_eq!(next, 60);
    }

    #[test]
    fn next_initialized_searches_right() {
        let mut bitmap = TickBitmap::new();
        bitmap.flip_tick(-60, 60);
        bitmap.flip_tick(60, 60);
        let (next, initialized) = bitmap.next_initialized_tick_within_one_word(-120, 60, false);
        assert!(initialized);
        assert_eq!(next, -60);
    }

    #[test]
    fn compress_rounds_toward_negative_infinity() {
        assert_eq!(compress(-1, 60), -1);
        assert_eq!(compress(-60, 60), -1);
        assert_eq!(compress(-61, 60), -2);
        assert_eq!(compress(60, 60), 1);
    }
}
