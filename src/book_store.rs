//! Instrument-keyed book store.
//!
//! Grounded on the teacher crate's `AppState`/book-manager pattern (a plain
//! `HashMap` keyed by instrument, lazily populated) but generalized to the
//! spec's single-threaded, no-external-state core: no `Arc<Mutex<_>>`
//! wrapping, since the engine is in-process and owned by exactly one caller.

use std::collections::HashMap;

use crate::orderbook::OrderBook;

/// Maps instrument id -> its [`OrderBook`], creating books on first
/// reference. Books are never torn down; they live for the store's lifetime.
#[derive(Debug, Default)]
pub struct BookStore {
    books: HashMap<String, OrderBook>,
}

impl BookStore {
    pub fn new() -> Self {
        Self { books: HashMap::new() }
    }

    /// Pre-sizes the instrument map for a known universe of `instruments`.
    pub fn with_capacity(instruments: usize) -> Self {
        Self {
            books: HashMap::with_capacity(instruments),
        }
    }

    /// Returns the book for `instmt`, creating an empty one if this is the
    /// first reference. `add_order` is never an error for a new instrument.
    pub(crate) fn get_or_create(&mut self, instmt: &str) -> &mut OrderBook {
        self.books.entry(instmt.to_string()).or_default()
    }

    /// Read-only lookup; `None` if the instrument has never been referenced.
    pub fn get(&self, instmt: &str) -> Option<&OrderBook> {
        self.books.get(instmt)
    }

    pub(crate) fn get_mut(&mut self, instmt: &str) -> Option<&mut OrderBook> {
        self.books.get_mut(instmt)
    }

    /// All instruments with a book, in no particular order.
    pub fn instruments(&self) -> impl Iterator<Item = &str> {
        self.books.keys().map(String::as_str)
    }
}
