//! Per-instrument order book: bid/ask price ladders plus an id index.
//!
//! Each side is a [`BTreeMap`] keyed by price, FIFO-ordered [`VecDeque`] per
//! level — the same shape the teacher crate uses, generalized from a single
//! implicit instrument to the explicit per-instrument book the matching
//! engine now owns one of per traded instrument. `asks` iterates ascending
//! (best ask = lowest price, at the front); `bids` iterates descending (best
//! bid = highest price, at the back), so both "best price" accesses are a
//! single BTreeMap end lookup.

use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::orders::{Order, Side};

/// A FIFO queue of orders resting at one price.
pub type PriceLevel = VecDeque<Order>;

/// Bid/ask ladders and the order-id index for a single instrument.
#[derive(Debug, Default)]
pub struct OrderBook {
    /// Buy orders, keyed by price ascending; best bid is `bids.last_key_value()`.
    pub bids: BTreeMap<u64, PriceLevel>,
    /// Sell orders, keyed by price ascending; best ask is `asks.first_key_value()`.
    pub asks: BTreeMap<u64, PriceLevel>,
    /// order_id -> side, so cancel/amend can find the right ladder without
    /// scanning both. The order itself lives only in its price level.
    order_locations: HashMap<u64, Side>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self {
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            order_locations: HashMap::new(),
        }
    }

    fn ladder(&self, side: Side) -> &BTreeMap<u64, PriceLevel> {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn ladder_mut(&mut self, side: Side) -> &mut BTreeMap<u64, PriceLevel> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Best price on `side`: max for bids, min for asks. `None` if empty.
    pub fn best_price(&self, side: Side) -> Option<u64> {
        match side {
            Side::Buy => self.bids.keys().next_back().copied(),
            Side::Sell => self.asks.keys().next().copied(),
        }
    }

    /// Whether `side` crosses `opposite_best` given an incoming `price`
    /// (`0` is the market-order sentinel, which always crosses).
    pub fn crosses(side: Side, price: u64, opposite_best: u64) -> bool {
        if price == 0 {
            return true;
        }
        match side {
            Side::Buy => price >= opposite_best,
            Side::Sell => price <= opposite_best,
        }
    }

    /// Appends `order` to the FIFO tail of its side's ladder at its price,
    /// creating the level on demand, and indexes it by id. Caller must only
    /// call this for orders with `leaves_qty > 0` and a non-market price.
    pub(crate) fn rest(&mut self, order: Order) {
        debug_assert!(order.leaves_qty > 0);
        debug_assert!(!order.is_market());
        let side = order.side;
        let price = order.price;
        let order_id = order.order_id;
        self.ladder_mut(side).entry(price).or_default().push_back(order);
        self.order_locations.insert(order_id, side);
    }

    /// Removes the order from `order_locations`; called the moment an
    /// order's `leaves_qty` reaches zero, whether by full fill or by
    /// cancellation (see spec open question O-1).
    pub(crate) fn unindex(&mut self, order_id: u64) {
        self.order_locations.remove(&order_id);
    }

    /// Deletes `price` from `side`'s ladder if its level is now empty.
    pub(crate) fn prune_if_empty(&mut self, side: Side, price: u64) {
        let ladder = self.ladder_mut(side);
        if ladder.get(&price).is_some_and(VecDeque::is_empty) {
            ladder.remove(&price);
        }
    }

    pub(crate) fn level_mut(&mut self, side: Side, price: u64) -> Option<&mut PriceLevel> {
        self.ladder_mut(side).get_mut(&price)
    }

    /// Removes and returns the resting order `order_id`, or `None` if it
    /// cannot be located (unknown id, or present in the index but absent
    /// from the expected ladder — see spec's `SideMismatch`).
    pub fn remove(&mut self, order_id: u64) -> Option<Order> {
        let side = *self.order_locations.get(&order_id)?;
        let ladder = self.ladder_mut(side);
        let mut found_price = None;
        let mut removed = None;
        for (&price, level) in ladder.iter_mut() {
            if let Some(pos) = level.iter().position(|o| o.order_id == order_id) {
                removed = level.remove(pos);
                found_price = Some(price);
                break;
            }
        }
        match (removed, found_price) {
            (Some(order), Some(price)) => {
                self.prune_if_empty(side, price);
                self.order_locations.remove(&order_id);
                Some(order)
            }
            _ => None,
        }
    }

    /// `true` if `order_id` is currently resting on this book.
    pub fn contains(&self, order_id: u64) -> bool {
        self.order_locations.contains_key(&order_id)
    }

    /// Looks up the side a resting order is indexed under, without removing it.
    pub fn side_of(&self, order_id: u64) -> Option<Side> {
        self.order_locations.get(&order_id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Total resting quantity at `price` on `side`, `0` if the level doesn't exist.
    pub fn level_qty(&self, side: Side, price: u64) -> u64 {
        self.ladder(side)
            .get(&price)
            .map(|level| level.iter().map(|o| o.leaves_qty).sum())
            .unwrap_or(0)
    }
}
