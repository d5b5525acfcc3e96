//! Immutable trade records emitted by the matching engine.

use crate::orders::Side;

/// A single execution, attributed to exactly one order (the aggressor or one
/// specific passive order). A single match against a price level produces
/// one aggressor [`Trade`] followed by one passive [`Trade`] per resting
/// order it consumed — never mutated once emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    pub order_id: u64,
    pub instmt: String,
    pub trade_price: u64,
    pub trade_qty: u64,
    pub trade_side: Side,
    pub trade_id: u64,
}
