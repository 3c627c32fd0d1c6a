//! The subset of factory-level parameters a pair needs at construction
//! time. The factory itself (fee-tier registry, pair deployment) is out
//! of scope; this is the slice of its output a pair actually consumes.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairConfig {
    /// The minimum spacing between initializable ticks.
    pub tick_spacing: i32,
    /// The trade fee, in hundredths of a basis point (1e-6 resolution).
    pub fee_pips: u32,
}
