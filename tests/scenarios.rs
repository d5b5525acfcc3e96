//! Literal end-to-end scenarios from the matching engine's specification,
//! instrument `"X"`. Prices are plain integer ticks (spec's decimal examples
//! map onto ticks 1:1 or 10:1 as noted per test); a market order is denoted
//! by `price == 0`.

use order_book_engine::{MatchingEngine, Side, Trade};

/// S1. Rest then cancel.
#[test]
fn s1_rest_then_cancel() {
    let mut engine = MatchingEngine::new();

    let (order, trades) = engine.add_order("X", 100, 1, Side::Buy).unwrap();
    assert_eq!(order.order_id, 1);
    assert!(trades.is_empty());
    assert_eq!(engine.books().get("X").unwrap().bids.len(), 1);

    let cancelled = engine.cancel_order(1, "X").unwrap();
    assert_eq!(cancelled.cum_qty, 0);
    assert_eq!(cancelled.leaves_qty, 0);
    assert!(engine.books().get("X").unwrap().bids.is_empty());
}

/// S2. Single full fill.
#[test]
fn s2_single_full_fill() {
    let mut engine = MatchingEngine::new();

    let (buy, buy_trades) = engine.add_order("X", 100, 1, Side::Buy).unwrap();
    assert_eq!(buy.order_id, 1);
    assert!(buy_trades.is_empty());

    let (sell, trades) = engine.add_order("X", 100, 1, Side::Sell).unwrap();
    assert_eq!(sell.order_id, 2);
    assert_eq!(
        trades,
        vec![
            Trade {
                order_id: 2,
                instmt: "X".into(),
                trade_price: 100,
                trade_qty: 1,
                trade_side: Side::Sell,
                trade_id: 1,
            },
            Trade {
                order_id: 1,
                instmt: "X".into(),
                trade_price: 100,
                trade_qty: 1,
                trade_side: Side::Buy,
                trade_id: 2,
            },
        ]
    );
    assert_eq!(sell.leaves_qty, 0);
    assert!(engine.books().get("X").unwrap().is_empty());
}

/// S3. Ten rests, one sweeping sell.
#[test]
fn s3_ten_rests_one_sweeping_sell() {
    let mut engine = MatchingEngine::new();
    for _ in 0..10 {
        engine.add_order("X", 100, 1, Side::Buy).unwrap();
    }

    let (sell, trades) = engine.add_order("X", 100, 10, Side::Sell).unwrap();
    assert_eq!(sell.order_id, 11);
    assert_eq!(trades.len(), 11);

    assert_eq!(trades[0].order_id, 11);
    assert_eq!(trades[0].trade_qty, 10); // aggressor trade covers the whole level
    assert_eq!(trades[0].trade_id, 1);

    for i in 1..=10u64 {
        let t = &trades[i as usize];
        assert_eq!(t.order_id, i);
        assert_eq!(t.trade_qty, 1);
        assert_eq!(t.trade_price, 100);
        assert_eq!(t.trade_id, i + 1);
    }
    assert!(engine.books().get("X").unwrap().is_empty());
}

/// S4. Walk levels.
#[test]
fn s4_walk_levels() {
    let mut engine = MatchingEngine::new();
    for i in 1..=10u64 {
        engine.add_order("X", 100 + i, 1, Side::Buy).unwrap();
    }

    let (sell, trades) = engine.add_order("X", 100, 10, Side::Sell).unwrap();
    assert_eq!(sell.order_id, 11);
    assert_eq!(trades.len(), 20);

    for i in 0..10u64 {
        let aggressor_trade = &trades[(2 * i) as usize];
        let passive_trade = &trades[(2 * i + 1) as usize];
        let price = 110 - i;
        assert_eq!(aggressor_trade.order_id, 11);
        assert_eq!(aggressor_trade.trade_price, price);
        assert_eq!(aggressor_trade.trade_qty, 1);
        assert_eq!(passive_trade.order_id, 10 - i);
        assert_eq!(passive_trade.trade_price, price);
        assert_eq!(passive_trade.trade_qty, 1);
    }
    assert!(engine.books().get("X").unwrap().is_empty());
}

/// S5. Market sell sweeps with price == 0.
#[test]
fn s5_market_sell_sweeps_resting_buys() {
    let mut engine = MatchingEngine::new();
    for _ in 0..10 {
        engine.add_order("X", 100, 1, Side::Buy).unwrap();
    }

    let (sell, trades) = engine.add_order("X", 0, 10, Side::Sell).unwrap();
    assert_eq!(sell.order_id, 11);
    assert_eq!(sell.price, 0); // the sentinel is never rewritten to the traded price
    assert_eq!(trades.len(), 11);
    assert!(trades.iter().all(|t| t.trade_price == 100));
    assert!(engine.books().get("X").unwrap().is_empty());
}

/// S6. Cancel after partial fill.
#[test]
fn s6_cancel_after_partial_fill() {
    let mut engine = MatchingEngine::new();
    engine.add_order("X", 101, 1, Side::Buy).unwrap(); // id 1, better price
    engine.add_order("X", 100, 2, Side::Buy).unwrap(); // id 2

    let (_, trades) = engine.add_order("X", 100, 2, Side::Sell).unwrap(); // id 3
    assert_eq!(trades.len(), 4);

    let cancelled = engine.cancel_order(2, "X").unwrap();
    assert_eq!(cancelled.cum_qty, 1);
    assert_eq!(cancelled.leaves_qty, 0);
    assert!(engine.books().get("X").unwrap().is_empty());
}

/// S7. Amend price up with partial fill.
#[test]
fn s7_amend_after_partial_fill() {
    let mut engine = MatchingEngine::new();
    engine.add_order("X", 100, 3, Side::Buy).unwrap(); // id 1
    engine.add_order("X", 100, 1, Side::Buy).unwrap(); // id 2

    engine.add_order("X", 100, 1, Side::Sell).unwrap(); // id 3, fills id 1 by 1

    let (amended, trades) = engine.amend_order(1, "X", 100, 2).unwrap();
    // amend always yields a fresh id: cancel doesn't consume a counter slot,
    // so the next add after ids 1-3 is 4.
    assert_eq!(amended.order_id, 4);
    assert_eq!(amended.qty, 2 - 1); // amended_qty - prior cum_qty
    assert_eq!(amended.cum_qty, 0);
    assert_eq!(amended.leaves_qty, 1);
    assert!(trades.is_empty());
}
