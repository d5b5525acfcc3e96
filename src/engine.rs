//! The matching engine: monotonic id counters, crossing detection, the
//! price-time matching loop, and the amend/cancel primitives.
//!
//! The loop's shape is grounded on the teacher crate's `match_incoming_side`
//! (walk a `BTreeMap` ladder best-price-first, drain the FIFO head of each
//! level), generalized to the spec's two-trade-per-fill attribution (one
//! aggressor trade per level, one passive trade per resting order consumed)
//! and per-instrument books instead of a single implicit book.

use tracing::{debug, trace, warn};

use crate::book_store::BookStore;
use crate::errors::EngineError;
use crate::orderbook::OrderBook;
use crate::orders::{Order, Side};
use crate::trade::Trade;

/// Owns every instrument's book plus the engine-wide monotonic id counters.
#[derive(Debug, Default)]
pub struct MatchingEngine {
    books: BookStore,
    curr_order_id: u64,
    curr_trade_id: u64,
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self {
            books: BookStore::new(),
            curr_order_id: 0,
            curr_trade_id: 0,
        }
    }

    /// Pre-sizes the book store for a known universe of instruments.
    pub fn with_capacity(instruments: usize) -> Self {
        Self {
            books: BookStore::with_capacity(instruments),
            curr_order_id: 0,
            curr_trade_id: 0,
        }
    }

    /// Read access to the books, for inspection/testing (spec §6).
    pub fn books(&self) -> &BookStore {
        &self.books
    }

    fn next_order_id(&mut self) -> u64 {
        self.curr_order_id += 1;
        self.curr_order_id
    }

    /// Accepts an incoming order, matches it against resting liquidity on
    /// the opposite side, and rests any remainder (spec §4.3).
    ///
    /// Never errors for an unknown instrument — the book is created on
    /// demand. Errors only on `qty == 0` (`InvalidQuantity`); `Side` being a
    /// closed enum means `InvalidSide` can never actually be constructed
    /// here (see `EngineError::InvalidSide`).
    pub fn add_order(
        &mut self,
        instmt: &str,
        price: u64,
        qty: u64,
        side: Side,
    ) -> Result<(Order, Vec<Trade>), EngineError> {
        if qty == 0 {
            return Err(EngineError::InvalidQuantity);
        }

        let order_id = self.next_order_id();
        let mut aggressor = Order::new(order_id, instmt, price, qty, side);
        debug!(order_id, instmt, ?side, price, qty, "add_order");

        let book = self.books.get_or_create(instmt);
        let trades = Self::match_aggressor(&mut self.curr_trade_id, book, &mut aggressor);

        if aggressor.leaves_qty > 0 {
            if aggressor.is_market() {
                warn!(order_id, leftover = aggressor.leaves_qty, "market order residual abandoned");
            } else {
                book.rest(aggressor.clone());
            }
        }

        Ok((aggressor, trades))
    }

    /// Walks the ladder opposite `aggressor.side`, best-price-first,
    /// consuming levels until the aggressor is exhausted or the crossing
    /// condition fails.
    fn match_aggressor(curr_trade_id: &mut u64, book: &mut OrderBook, aggressor: &mut Order) -> Vec<Trade> {
        let opposite = aggressor.side.opposite();
        let mut trades = Vec::new();

        while aggressor.leaves_qty > 0 {
            let Some(best) = book.best_price(opposite) else {
                break;
            };
            if !OrderBook::crosses(aggressor.side, aggressor.price, best) {
                break;
            }
            trace!(price = best, "consuming price level");
            Self::consume_level(curr_trade_id, book, aggressor, opposite, best, &mut trades);
        }

        trades
    }

    /// Consumes as much of the level at `price` on `opposite` as the
    /// aggressor needs: one aggressor trade for the whole level match, then
    /// one passive trade per FIFO-resting order hit (spec §4.3).
    fn consume_level(
        curr_trade_id: &mut u64,
        book: &mut OrderBook,
        aggressor: &mut Order,
        opposite: Side,
        price: u64,
        trades: &mut Vec<Trade>,
    ) {
        let next_trade_id = |counter: &mut u64| {
            *counter += 1;
            *counter
        };

        let level_qty = book.level_qty(opposite, price);
        let mut match_qty = level_qty.min(aggressor.leaves_qty);
        debug_assert!(match_qty > 0);

        aggressor.apply_fill(match_qty);
        trades.push(Trade {
            order_id: aggressor.order_id,
            instmt: aggressor.instmt.clone(),
            trade_price: price,
            trade_qty: match_qty,
            trade_side: aggressor.side,
            trade_id: next_trade_id(curr_trade_id),
        });

        while match_qty > 0 {
            let level = book
                .level_mut(opposite, price)
                .expect("level exists while match_qty remains");
            let head = level.front_mut().expect("level non-empty while match_qty remains");

            let fill = match_qty.min(head.leaves_qty);
            let head_id = head.order_id;
            let head_instmt = head.instmt.clone();
            let head_side = head.side;
            head.apply_fill(fill);

            trades.push(Trade {
                order_id: head_id,
                instmt: head_instmt,
                trade_price: price,
                trade_qty: fill,
                trade_side: head_side,
                trade_id: next_trade_id(curr_trade_id),
            });

            match_qty -= fill;

            if level.front().is_some_and(|o| o.leaves_qty == 0) {
                level.pop_front();
                book.unindex(head_id);
            }
        }

        book.prune_if_empty(opposite, price);
    }

    /// Removes a resting order from the book. Returns the order with
    /// `leaves_qty == 0`; `cum_qty` is preserved (spec §4.4).
    pub fn cancel_order(&mut self, order_id: u64, instmt: &str) -> Result<Order, EngineError> {
        let book = self
            .books
            .get_mut(instmt)
            .ok_or_else(|| EngineError::UnknownInstrument(instmt.to_string()))?;

        if !book.contains(order_id) {
            warn!(order_id, instmt, "cancel: unknown order");
            return Err(EngineError::UnknownOrder(order_id));
        }

        let mut order = book.remove(order_id).ok_or_else(|| {
            warn!(order_id, instmt, "cancel: side mismatch");
            EngineError::SideMismatch {
                order_id,
                instmt: instmt.to_string(),
            }
        })?;
        order.cancel();
        debug!(order_id, instmt, "cancel_order");
        Ok(order)
    }

    /// Cancel + re-add with quantity semantics that preserve already-executed
    /// volume (spec §4.5). Always yields a new order id — amend is not
    /// id-preserving, even for a pure quantity change (spec O-3).
    pub fn amend_order(
        &mut self,
        order_id: u64,
        instmt: &str,
        amended_price: u64,
        amended_qty: u64,
    ) -> Result<(Order, Vec<Trade>), EngineError> {
        let book = self
            .books
            .get(instmt)
            .ok_or_else(|| EngineError::UnknownInstrument(instmt.to_string()))?;
        if !book.contains(order_id) {
            return Err(EngineError::UnknownOrder(order_id));
        }

        // Peek the cum_qty without mutating yet, so a rejected amend leaves
        // the original order resting untouched.
        let original_side = book
            .side_of(order_id)
            .ok_or_else(|| EngineError::SideMismatch {
                order_id,
                instmt: instmt.to_string(),
            })?;
        let original_cum_qty = self
            .peek_cum_qty(instmt, original_side, order_id)
            .ok_or_else(|| EngineError::SideMismatch {
                order_id,
                instmt: instmt.to_string(),
            })?;

        let new_qty = amended_qty
            .checked_sub(original_cum_qty)
            .filter(|&q| q > 0)
            .ok_or(EngineError::InvalidQuantity)?;

        let original = self.cancel_order(order_id, instmt)?;
        debug!(
            order_id,
            new_order_will_follow = true,
            instmt,
            new_qty,
            "amend_order: cancelled original leg"
        );
        self.add_order(instmt, amended_price, new_qty, original.side)
    }

    fn peek_cum_qty(&self, instmt: &str, side: Side, order_id: u64) -> Option<u64> {
        let book = self.books.get(instmt)?;
        let ladder = match side {
            Side::Buy => &book.bids,
            Side::Sell => &book.asks,
        };
        ladder
            .values()
            .flat_map(|level| level.iter())
            .find(|o| o.order_id == order_id)
            .map(|o| o.cum_qty)
    }
}
