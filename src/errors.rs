//! Error taxonomy for the matching engine's public API.

use thiserror::Error;

/// Failure modes surfaced by [`crate::engine::MatchingEngine`]. No entry
/// point panics on caller-supplied input; every failure is returned here
/// with no partial state change.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Reserved for completeness with spec's error taxonomy. Unreachable in
    /// practice: `Side` is a closed two-variant enum, so the type system
    /// already rejects anything that isn't `Buy` or `Sell`.
    #[error("invalid side")]
    InvalidSide,

    #[error("invalid quantity")]
    InvalidQuantity,

    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("unknown order: {0}")]
    UnknownOrder(u64),

    #[error("order {order_id} not found on expected side of instrument {instmt}")]
    SideMismatch { order_id: u64, instmt: String },
}
