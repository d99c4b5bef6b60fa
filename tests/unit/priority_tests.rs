//! Priority keys and side-list ordering.

use crate::common::{instrument, noop, px};
use matchcore_rs::prelude::*;
use std::sync::Arc;

fn core() -> MatchingCore {
    MatchingCore::new(instrument(), noop(), noop(), noop())
}

#[test]
fn test_priority_key_per_order_type() {
    let id = OrderId::new_uuid;
    let limit = px(10_100);
    let trigger = px(10_050);

    assert_eq!(
        Order::limit(id(), OrderSide::Buy, 1, limit).priority_key(),
        10_100
    );
    assert_eq!(
        Order::market_to_limit(id(), OrderSide::Buy, 1, limit).priority_key(),
        10_100
    );
    assert_eq!(
        Order::stop_market(id(), OrderSide::Buy, 1, trigger).priority_key(),
        10_050
    );
    assert_eq!(
        Order::market_if_touched(id(), OrderSide::Buy, 1, trigger).priority_key(),
        10_050
    );
    assert_eq!(
        Order::trailing_stop_market(id(), OrderSide::Buy, 1, trigger).priority_key(),
        10_050
    );
    assert_eq!(
        Order::stop_limit(id(), OrderSide::Buy, 1, limit, trigger).priority_key(),
        10_050
    );
    assert_eq!(
        Order::limit_if_touched(id(), OrderSide::Buy, 1, limit, trigger).priority_key(),
        10_050
    );
    assert_eq!(
        Order::trailing_stop_limit(id(), OrderSide::Buy, 1, limit, trigger).priority_key(),
        10_050
    );
}

#[test]
fn test_conditional_limit_orders_requeue_at_limit_once_triggered() {
    for order in [
        Order::stop_limit(OrderId::new_uuid(), OrderSide::Sell, 1, px(9_900), px(9_950)),
        Order::limit_if_touched(OrderId::new_uuid(), OrderSide::Sell, 1, px(9_900), px(9_950)),
        Order::trailing_stop_limit(OrderId::new_uuid(), OrderSide::Sell, 1, px(9_900), px(9_950)),
    ] {
        assert_eq!(order.priority_key(), 9_950);
        order.set_triggered(true);
        assert_eq!(order.priority_key(), 9_900);
    }
}

#[test]
fn test_mixed_types_share_one_priority_ladder() {
    let core = core();
    core.add_order(Arc::new(Order::limit(
        OrderId::from_u64(1),
        OrderSide::Buy,
        1,
        px(10_100),
    )))
    .unwrap();
    core.add_order(Arc::new(Order::stop_market(
        OrderId::from_u64(2),
        OrderSide::Buy,
        1,
        px(10_200),
    )))
    .unwrap();
    core.add_order(Arc::new(Order::stop_limit(
        OrderId::from_u64(3),
        OrderSide::Buy,
        1,
        px(9_800),
        px(10_150),
    )))
    .unwrap();

    let keys: Vec<i64> = core
        .get_orders_bid()
        .iter()
        .map(|o| o.priority_key())
        .collect();
    assert_eq!(keys, vec![10_200, 10_150, 10_100]);
}

#[test]
fn test_add_order_resorts_with_current_keys() {
    let core = core();
    let conditional = Arc::new(Order::stop_limit(
        OrderId::from_u64(1),
        OrderSide::Buy,
        1,
        px(9_800),
        px(10_150),
    ));
    core.add_order(Arc::clone(&conditional)).unwrap();
    core.add_order(Arc::new(Order::limit(
        OrderId::from_u64(2),
        OrderSide::Buy,
        1,
        px(10_100),
    )))
    .unwrap();

    // Queued at its trigger while dormant.
    let keys: Vec<i64> = core
        .get_orders_bid()
        .iter()
        .map(|o| o.priority_key())
        .collect();
    assert_eq!(keys, vec![10_150, 10_100]);

    // Triggering moves the order to its limit price; the next insert
    // re-sorts the side with the new key.
    conditional.set_triggered(true);
    core.add_order(Arc::new(Order::limit(
        OrderId::from_u64(3),
        OrderSide::Buy,
        1,
        px(10_000),
    )))
    .unwrap();

    let keys: Vec<i64> = core
        .get_orders_bid()
        .iter()
        .map(|o| o.priority_key())
        .collect();
    assert_eq!(keys, vec![10_100, 10_000, 9_800]);
}
