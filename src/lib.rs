//! A single-threaded, in-process limit-order matching engine.
//!
//! The engine accepts buy/sell orders for one or more instruments, matches
//! them against resting liquidity under strict price-time priority, emits a
//! deterministic stream of trades, and keeps any unmatched residual on the
//! book until it is filled, cancelled, or amended. It holds no external
//! state: no persistence, no wire protocol, no networking, no concurrency of
//! its own — callers serialize access and own the process.
//!
//! ```
//! use order_book_engine::{MatchingEngine, Side};
//!
//! let mut engine = MatchingEngine::new();
//! let (resting, trades) = engine.add_order("BTC-USD", 100, 1, Side::Buy).unwrap();
//! assert!(trades.is_empty());
//!
//! let (_, trades) = engine.add_order("BTC-USD", 100, 1, Side::Sell).unwrap();
//! assert_eq!(trades.len(), 2);
//! assert_eq!(resting.order_id, 1);
//! ```

pub mod book_store;
pub mod engine;
pub mod errors;
pub mod orderbook;
pub mod orders;
pub mod trade;

pub use book_store::BookStore;
pub use engine::MatchingEngine;
pub use errors::EngineError;
pub use orderbook::OrderBook;
pub use orders::{Order, Side};
pub use trade::Trade;
