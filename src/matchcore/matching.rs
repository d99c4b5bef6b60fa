//! The per-type matchers, the dispatcher, and the sweep.
//!
//! Matchers are no-ops while their activation predicate is false. All
//! effects flow through the three injected sinks and the activation fields
//! of the order itself; the matchers never touch the core's collections.

use super::core::MatchingCore;
use super::error::MatchingCoreError;
use super::predicates::determine_liquidity_side;
use crate::model::{LiquiditySide, Order, OrderType};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tracing::{error, trace};

impl MatchingCore {
    /// Matches one order against the current top of book, dispatching on its
    /// order type.
    ///
    /// `initial` marks the first examination of a newly arrived order;
    /// conditional limit orders use it to decide their liquidity side and
    /// whether the triggered price is stamped (see
    /// [`Self::iterate`] for the recurring sweep, which always passes
    /// `false`).
    ///
    /// # Errors
    /// Returns [`MatchingCoreError::InvalidOrderType`] for market orders,
    /// which never rest and therefore cannot be matched here.
    pub fn match_order(
        &self,
        order: &Arc<Order>,
        initial: bool,
    ) -> Result<(), MatchingCoreError> {
        match order.order_type() {
            OrderType::Limit | OrderType::MarketToLimit => self.match_limit_order(order),
            OrderType::StopLimit | OrderType::TrailingStopLimit => {
                self.match_stop_limit_order(order, initial);
            }
            OrderType::StopMarket | OrderType::TrailingStopMarket => {
                self.match_stop_market_order(order);
            }
            OrderType::LimitIfTouched => self.match_limit_if_touched_order(order, initial),
            OrderType::MarketIfTouched => self.match_market_if_touched_order(order),
            OrderType::Market => {
                return Err(MatchingCoreError::InvalidOrderType {
                    order_type: OrderType::Market,
                });
            }
        }
        Ok(())
    }

    /// Sweeps the working set against the current market.
    ///
    /// The sweep operates on a snapshot of the side lists taken at entry,
    /// bids first (descending priority) then asks (ascending priority).
    /// Orders the sinks close or delete mid-sweep are not re-examined:
    /// deletions do not reach the snapshot, and closed orders are skipped by
    /// flag. Orders added by sinks are first examined on the next sweep.
    ///
    /// `timestamp_ns` is recorded for sink consumption via
    /// [`MatchingCore::last_sweep_ns`]; the core itself never consults a
    /// clock.
    pub fn iterate(&self, timestamp_ns: u64) {
        self.ts_last_sweep.store(timestamp_ns, Ordering::Relaxed);

        let snapshot: Vec<Arc<Order>> = {
            let bids = self.bids_read();
            let asks = self.asks_read();
            bids.iter().chain(asks.iter()).cloned().collect()
        };

        for order in snapshot {
            if order.is_closed() {
                continue;
            }
            if let Err(err) = self.match_order(&order, false) {
                // Unreachable through add_order, which admits passive orders
                // only.
                error!("iterate: skipping {}: {}", order.client_order_id(), err);
            }
        }
    }

    /// Limit and market-to-limit orders: fill as maker once the opposite
    /// side reaches the limit price.
    fn match_limit_order(&self, order: &Arc<Order>) {
        if self.is_limit_matched(order.side(), order.limit_px()) {
            order.set_liquidity_side(LiquiditySide::Maker);
            trace!("Filling limit order {order}");
            (self.fill_limit_order)(order);
        }
    }

    /// Stop-market and trailing stop-market orders: a market fill at the
    /// instant the stop trigger is reached. The fill sink is the sole
    /// observer; there is no separate trigger event for this family.
    fn match_stop_market_order(&self, order: &Arc<Order>) {
        let trigger_price = order.trigger_px();
        if self.is_stop_triggered(order.side(), trigger_price) {
            order.set_triggered_price(trigger_price);
            trace!("Stop order {order} triggered");
            (self.fill_market_order)(order);
        }
    }

    /// Stop-limit and trailing stop-limit orders.
    ///
    /// Once triggered the order behaves as a plain limit order. At the
    /// instant of triggering it may already be marketable — the trigger took
    /// the order through its own limit — in which case it fills immediately
    /// as taker.
    fn match_stop_limit_order(&self, order: &Arc<Order>, initial: bool) {
        if order.is_triggered() {
            self.match_limit_order(order);
            return;
        }

        let trigger_price = order.trigger_px();
        if self.is_stop_triggered(order.side(), trigger_price) {
            let price = order.limit_px();
            order.set_triggered_price(trigger_price);
            order.set_liquidity_side(determine_liquidity_side(
                initial,
                order.side(),
                price,
                trigger_price,
            ));
            trace!("Stop limit order {order} triggered");
            (self.trigger_stop_order)(order);

            if self.is_limit_matched(order.side(), price) {
                order.set_liquidity_side(LiquiditySide::Taker);
                trace!("Filling stop limit order {order} on trigger");
                (self.fill_limit_order)(order);
            }
        }
    }

    /// Market-if-touched orders: a market fill at the instant the touch
    /// trigger is reached.
    fn match_market_if_touched_order(&self, order: &Arc<Order>) {
        let trigger_price = order.trigger_px();
        if self.is_touch_triggered(order.side(), trigger_price) {
            order.set_triggered_price(trigger_price);
            trace!("Market-if-touched order {order} triggered");
            (self.fill_market_order)(order);
        }
    }

    /// Limit-if-touched orders.
    ///
    /// Unlike stop-limit, the triggered price is stamped only on non-initial
    /// sweeps: when the touch condition already holds on arrival, the caller
    /// keeps the right to fix the triggered price itself.
    fn match_limit_if_touched_order(&self, order: &Arc<Order>, initial: bool) {
        if order.is_triggered() {
            self.match_limit_order(order);
            return;
        }

        let trigger_price = order.trigger_px();
        if self.is_touch_triggered(order.side(), trigger_price) {
            if !initial {
                order.set_triggered_price(trigger_price);
            }
            let price = order.limit_px();
            order.set_liquidity_side(determine_liquidity_side(
                initial,
                order.side(),
                price,
                trigger_price,
            ));
            trace!("Limit-if-touched order {order} triggered");
            (self.trigger_stop_order)(order);

            if self.is_limit_matched(order.side(), price) {
                order.set_liquidity_side(LiquiditySide::Taker);
                trace!("Filling limit-if-touched order {order} on trigger");
                (self.fill_limit_order)(order);
            }
        }
    }
}
