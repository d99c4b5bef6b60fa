//! Sweep semantics: snapshot stability, ordering, and sink re-entrancy.

use crate::common::{instrument, noop, px};
use matchcore_rs::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

#[test]
fn test_sweep_processes_bids_descending_then_asks_ascending() {
    let processed: Arc<Mutex<Vec<i64>>> = Arc::new(Mutex::new(Vec::new()));

    let limit_sink: OrderHandler = {
        let processed = Arc::clone(&processed);
        Arc::new(move |order: &Arc<Order>| {
            processed.lock().unwrap().push(order.priority_key());
        })
    };

    let core = MatchingCore::new(instrument(), noop(), noop(), limit_sink);
    for raw in [9_900, 10_100] {
        core.add_order(Arc::new(Order::limit(
            OrderId::new_uuid(),
            OrderSide::Buy,
            100,
            px(raw),
        )))
        .unwrap();
    }
    for raw in [10_200, 10_050] {
        core.add_order(Arc::new(Order::limit(
            OrderId::new_uuid(),
            OrderSide::Sell,
            100,
            px(raw),
        )))
        .unwrap();
    }

    // Make every order marketable so the sink records the full sweep order.
    core.set_ask_raw(1);
    core.set_bid_raw(1_000_000);
    core.iterate(1);

    assert_eq!(*processed.lock().unwrap(), vec![10_100, 9_900, 10_050, 10_200]);
}

#[test]
fn test_reentrant_delete_does_not_disturb_the_current_sweep() {
    let core_slot: Arc<OnceLock<Arc<MatchingCore>>> = Arc::new(OnceLock::new());
    let fills = Arc::new(AtomicUsize::new(0));

    let first = Arc::new(Order::limit(
        OrderId::from_u64(1),
        OrderSide::Buy,
        100,
        px(10_100),
    ));
    let second = Arc::new(Order::limit(
        OrderId::from_u64(2),
        OrderSide::Buy,
        100,
        px(10_050),
    ));
    let second_id = second.client_order_id();

    // Filling the first order deletes the second from the working set,
    // re-entering the core mid-sweep.
    let limit_sink: OrderHandler = {
        let core_slot = Arc::clone(&core_slot);
        let fills = Arc::clone(&fills);
        Arc::new(move |_order: &Arc<Order>| {
            fills.fetch_add(1, Ordering::Relaxed);
            if let Some(core) = core_slot.get() {
                core.delete_order(&second_id);
            }
        })
    };

    let core = Arc::new(MatchingCore::new(instrument(), noop(), noop(), limit_sink));
    let _ = core_slot.set(Arc::clone(&core));

    core.add_order(Arc::clone(&first)).unwrap();
    core.add_order(Arc::clone(&second)).unwrap();
    core.set_ask_raw(10_000);

    core.iterate(1);

    // Deletion does not reach the snapshot: the second order, never closed,
    // is still matched in the sweep that deleted it.
    assert_eq!(fills.load(Ordering::Relaxed), 2);
    assert!(!core.order_exists(&second_id));
    assert_eq!(core.bid_order_count(), 1);
}

#[test]
fn test_order_added_by_sink_waits_for_the_next_sweep() {
    let core_slot: Arc<OnceLock<Arc<MatchingCore>>> = Arc::new(OnceLock::new());
    let added = Arc::new(Order::limit(
        OrderId::from_u64(2),
        OrderSide::Buy,
        100,
        px(10_200),
    ));

    let limit_sink: OrderHandler = {
        let core_slot = Arc::clone(&core_slot);
        let added = Arc::clone(&added);
        Arc::new(move |order: &Arc<Order>| {
            order.close();
            if let Some(core) = core_slot.get() {
                // Idempotent across sweeps: the duplicate add is rejected.
                let _ = core.add_order(Arc::clone(&added));
            }
        })
    };

    let core = Arc::new(MatchingCore::new(instrument(), noop(), noop(), limit_sink));
    let _ = core_slot.set(Arc::clone(&core));

    let seed = Arc::new(Order::limit(
        OrderId::from_u64(1),
        OrderSide::Buy,
        100,
        px(10_100),
    ));
    core.add_order(Arc::clone(&seed)).unwrap();
    core.set_ask_raw(10_000);

    core.iterate(1);
    // The sink's order entered the working set but not the running sweep.
    assert!(core.order_exists(&added.client_order_id()));
    assert_eq!(added.liquidity_side(), None);

    core.iterate(2);
    assert_eq!(added.liquidity_side(), Some(LiquiditySide::Maker));
    assert!(added.is_closed());
}

#[test]
fn test_orders_deleted_before_the_sweep_are_not_matched() {
    let fills = Arc::new(AtomicUsize::new(0));
    let limit_sink: OrderHandler = {
        let fills = Arc::clone(&fills);
        Arc::new(move |_order: &Arc<Order>| {
            fills.fetch_add(1, Ordering::Relaxed);
        })
    };

    let core = MatchingCore::new(instrument(), noop(), noop(), limit_sink);
    let order = Arc::new(Order::limit(
        OrderId::from_u64(1),
        OrderSide::Buy,
        100,
        px(10_100),
    ));
    core.add_order(Arc::clone(&order)).unwrap();
    core.set_ask_raw(10_000);

    core.delete_order(&order.client_order_id());
    core.iterate(1);

    assert_eq!(fills.load(Ordering::Relaxed), 0);
}

#[test]
fn test_closed_orders_are_skipped() {
    let fills = Arc::new(AtomicUsize::new(0));
    let limit_sink: OrderHandler = {
        let fills = Arc::clone(&fills);
        Arc::new(move |_order: &Arc<Order>| {
            fills.fetch_add(1, Ordering::Relaxed);
        })
    };

    let core = MatchingCore::new(instrument(), noop(), noop(), limit_sink);
    let open = Arc::new(Order::limit(
        OrderId::from_u64(1),
        OrderSide::Buy,
        100,
        px(10_100),
    ));
    let closed = Arc::new(Order::limit(
        OrderId::from_u64(2),
        OrderSide::Buy,
        100,
        px(10_050),
    ));
    closed.close();

    core.add_order(Arc::clone(&open)).unwrap();
    core.add_order(Arc::clone(&closed)).unwrap();
    core.set_ask_raw(10_000);

    core.iterate(1);

    assert_eq!(fills.load(Ordering::Relaxed), 1);
    assert_eq!(closed.liquidity_side(), None);
}
