//! Property-based tests for the working-set and predicate invariants.

use crate::common::{instrument, noop};
use matchcore_rs::prelude::*;
use proptest::prelude::*;
use std::sync::Arc;

fn core() -> MatchingCore {
    MatchingCore::new(instrument(), noop(), noop(), noop())
}

fn arb_side() -> impl Strategy<Value = OrderSide> {
    prop_oneof![Just(OrderSide::Buy), Just(OrderSide::Sell)]
}

/// One random working-set mutation: an add (true) or a delete (false) of a
/// limit order drawn from a small id space so collisions are frequent.
fn arb_op() -> impl Strategy<Value = (bool, u64, OrderSide, i64)> {
    (any::<bool>(), 0u64..16, arb_side(), -10_000i64..10_000)
}

proptest! {
    #[test]
    fn prop_index_and_side_lists_agree(ops in prop::collection::vec(arb_op(), 1..64)) {
        let core = core();
        for (is_add, id_seed, side, raw) in ops {
            let id = OrderId::from_u64(id_seed);
            if is_add {
                let _ = core.add_order(Arc::new(Order::limit(id, side, 1, Price::new(raw, 2))));
            } else {
                core.delete_order(&id);
            }

            let bids = core.get_orders_bid();
            let asks = core.get_orders_ask();

            // Every order is indexed and lives in exactly the list chosen
            // by its side.
            prop_assert_eq!(core.order_count(), bids.len() + asks.len());
            for order in &bids {
                prop_assert_eq!(order.side(), OrderSide::Buy);
                prop_assert!(core.order_exists(&order.client_order_id()));
            }
            for order in &asks {
                prop_assert_eq!(order.side(), OrderSide::Sell);
                prop_assert!(core.order_exists(&order.client_order_id()));
            }

            // Bids descend and asks ascend by priority key.
            prop_assert!(bids.windows(2).all(|w| w[0].priority_key() >= w[1].priority_key()));
            prop_assert!(asks.windows(2).all(|w| w[0].priority_key() <= w[1].priority_key()));
        }
    }

    #[test]
    fn prop_order_exists_iff_get_order_is_some(id_seed in 0u64..16, present in any::<bool>()) {
        let core = core();
        let id = OrderId::from_u64(id_seed);
        if present {
            core.add_order(Arc::new(Order::limit(id, OrderSide::Buy, 1, Price::new(100, 2))))
                .unwrap();
        }
        prop_assert_eq!(core.order_exists(&id), core.get_order(&id).is_some());
    }

    #[test]
    fn prop_limit_matched_is_raw_compare_against_ask(
        ask in proptest::option::of(-10_000i64..10_000),
        price in -10_000i64..10_000,
    ) {
        let core = core();
        if let Some(raw) = ask {
            core.set_ask_raw(raw);
        }
        let matched = core.is_limit_matched(OrderSide::Buy, Price::new(price, 2));
        prop_assert_eq!(matched, ask.is_some_and(|a| a <= price));
    }

    #[test]
    fn prop_limit_matched_is_raw_compare_against_bid(
        bid in proptest::option::of(-10_000i64..10_000),
        price in -10_000i64..10_000,
    ) {
        let core = core();
        if let Some(raw) = bid {
            core.set_bid_raw(raw);
        }
        let matched = core.is_limit_matched(OrderSide::Sell, Price::new(price, 2));
        prop_assert_eq!(matched, bid.is_some_and(|b| b >= price));
    }

    #[test]
    fn prop_stop_and_touch_are_mirrors(market in -10_000i64..10_000, trigger in -10_000i64..10_000) {
        let trigger = Price::new(trigger, 2);

        // A buy consults the ask, a sell the bid; swapping the side and the
        // consulted slot turns a stop into a touch and vice versa.
        let ask_side = core();
        ask_side.set_ask_raw(market);
        let bid_side = core();
        bid_side.set_bid_raw(market);

        prop_assert_eq!(
            ask_side.is_stop_triggered(OrderSide::Buy, trigger),
            bid_side.is_touch_triggered(OrderSide::Sell, trigger)
        );
        prop_assert_eq!(
            ask_side.is_touch_triggered(OrderSide::Buy, trigger),
            bid_side.is_stop_triggered(OrderSide::Sell, trigger)
        );
    }

    #[test]
    fn prop_reset_restores_the_empty_state(ops in prop::collection::vec(arb_op(), 1..32)) {
        let core = core();
        core.set_bid_raw(9_900);
        core.set_ask_raw(10_000);
        core.set_last_raw(9_950);
        for (_, id_seed, side, raw) in ops {
            let _ = core.add_order(Arc::new(Order::limit(
                OrderId::from_u64(id_seed),
                side,
                1,
                Price::new(raw, 2),
            )));
        }

        core.reset();

        prop_assert_eq!(core.bid(), None);
        prop_assert_eq!(core.ask(), None);
        prop_assert_eq!(core.last(), None);
        prop_assert_eq!(core.order_count(), 0);
        prop_assert!(core.get_orders().is_empty());
    }

    #[test]
    fn prop_delete_is_idempotent(id_seed in 0u64..16, extra_deletes in 1usize..4) {
        let core = core();
        let id = OrderId::from_u64(id_seed);
        core.add_order(Arc::new(Order::limit(id, OrderSide::Sell, 1, Price::new(100, 2))))
            .unwrap();

        core.delete_order(&id);
        let count_after_first = core.order_count();
        for _ in 0..extra_deletes {
            core.delete_order(&id);
        }

        prop_assert_eq!(count_after_first, 0);
        prop_assert_eq!(core.order_count(), 0);
        prop_assert!(!core.order_exists(&id));
    }
}
