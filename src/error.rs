//! Stable error codes for the pair engine, one variant per short identifier
//! a caller can match on without depending on the message text.
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairError {
    /// LOK: reentrant call while the pair is locked.
    #[error("LOK: reentrant call")]
    Locked,

    /// AI: pair already initialized.
    #[error("AI: already initialized")]
    AlreadyInitialized,

    /// MIN: value below the minimum allowed.
    #[error("MIN: sqrt price below MIN_SQRT_PRICE")]
    SqrtPriceTooLow,

    /// MAX: value above the maximum allowed.
    #[error("MAX: sqrt price above MAX_SQRT_PRICE")]
    SqrtPriceTooHigh,

    /// TLU: tick lower must be less than tick upper.
    #[error("TLU: tick_lower >= tick_upper")]
    TicksOutOfOrder,

    /// TLM: tick lower out of range (below MIN_TICK or misaligned).
    #[error("TLM: tick_lower out of range")]
    TickLowerOutOfRange,

    /// TUM: tick upper out of range (above MAX_TICK or misaligned).
    #[error("TUM: tick_upper out of range")]
    TickUpperOutOfRange,

    /// LO: liquidity gross would exceed the per-tick maximum.
    #[error("LO: liquidity overflow at tick")]
    LiquidityOverflow,

    /// NP: no position found at the given key.
    #[error("NP: no position")]
    NoPosition,

    /// CP: callback returned without paying the full amount owed.
    #[error("CP: callback underpaid")]
    CallbackUnderpaid,

    /// M0: mint did not deliver the token_0 amount it promised.
    #[error("M0: insufficient token_0 from callback")]
    InsufficientToken0,

    /// M1: mint did not deliver the token_1 amount it promised.
    #[error("M1: insufficient token_1 from callback")]
    InsufficientToken1,

    /// IIA: swap invariant violated — balance did not increase by the
    /// amount the swap step computed as input.
    #[error("IIA: invalid input amount")]
    InvalidInputAmount,

    /// SPL: sqrt price limit is on the wrong side of the current price, or
    /// outside the global bounds, for the requested swap direction.
    #[error("SPL: sqrt price limit invalid for direction")]
    InvalidPriceLimit,

    /// AS: swap amount specified is zero.
    #[error("AS: amount specified is zero")]
    ZeroAmountSpecified,

    /// OLD: oracle observation requested for a timestamp older than the
    /// oldest stored observation.
    #[error("OLD: observation older than oldest stored")]
    ObservationTooOld,

    /// I: oracle not yet initialized / cardinality target already met.
    #[error("I: not initialized")]
    NotInitialized,

    /// TN: target timestamp is after the current block timestamp.
    #[error("TN: observation timestamp in the future")]
    ObservationInFuture,

    /// Arithmetic overflow inside a fixed-point or sqrt-price computation
    /// that has no single-letter code of its own in the interface table.
    #[error("arithmetic overflow in price computation")]
    PriceOverflow,

    /// A tick argument fell outside [MIN_TICK, MAX_TICK].
    #[error("tick out of [MIN_TICK, MAX_TICK]")]
    TickOutOfRange,

    /// A sqrt price argument fell outside [MIN_SQRT_PRICE, MAX_SQRT_PRICE).
    #[error("sqrt price out of range")]
    SqrtPriceOutOfRange,

    /// Liquidity delta would drive gross liquidity at a tick negative.
    #[error("liquidity subtraction underflow")]
    LiquiditySub,

    /// Liquidity delta would overflow gross liquidity at a tick.
    #[error("liquidity addition overflow")]
    LiquidityAdd,

    /// tick % tick_spacing != 0.
    #[error("tick not aligned to tick spacing")]
    TickNotAligned,
}
