//! Core matching state for a single instrument.

use crate::model::{Instrument, Order, OrderId, Price};
use crossbeam::atomic::AtomicCell;
use dashmap::DashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::trace;

/// An injected event sink invoked with the order being triggered or filled.
///
/// Sinks run synchronously on the caller's thread. A sink that captured an
/// `Arc<MatchingCore>` at wiring time may re-enter the core (for example to
/// delete the order it was handed); no lock is held across a sink invocation.
pub type OrderHandler = Arc<dyn Fn(&Arc<Order>) + Send + Sync>;

/// The matching core for one instrument.
///
/// Owns the instrument's top-of-book price state and the working set of
/// passive orders, and decides on every market data update which orders
/// trigger or fill. The effects of those decisions are delegated to three
/// injected sinks; the core knows nothing about venues, accounts, or
/// positions.
///
/// A core has a single logical owner and all operations are synchronous with
/// no suspension points. Two cores for different instruments share no state.
pub struct MatchingCore {
    /// The instrument this core matches.
    pub(super) instrument: Arc<Instrument>,

    /// Best bid raw price; `None` until the first bid update arrives.
    pub(super) bid: AtomicCell<Option<i64>>,

    /// Best ask raw price; `None` until the first ask update arrives.
    pub(super) ask: AtomicCell<Option<i64>>,

    /// Last traded raw price. Stored for snapshots and analytics; consulted
    /// by no matching predicate.
    pub(super) last: AtomicCell<Option<i64>>,

    /// Index of working orders by client order id.
    pub(super) orders: DashMap<OrderId, Arc<Order>>,

    /// Buy-side working orders, sorted descending by priority key
    /// (most aggressive first).
    pub(super) orders_bid: RwLock<Vec<Arc<Order>>>,

    /// Sell-side working orders, sorted ascending by priority key
    /// (most aggressive first).
    pub(super) orders_ask: RwLock<Vec<Arc<Order>>>,

    /// Timestamp of the most recent sweep, as passed to `iterate`.
    pub(super) ts_last_sweep: AtomicU64,

    /// Sink invoked when a conditional order activates.
    pub(super) trigger_stop_order: OrderHandler,

    /// Sink invoked to effect a market-style fill.
    pub(super) fill_market_order: OrderHandler,

    /// Sink invoked to effect a limit-style fill.
    pub(super) fill_limit_order: OrderHandler,
}

impl MatchingCore {
    /// Creates a matching core for `instrument` wired to the three event
    /// sinks.
    pub fn new(
        instrument: Arc<Instrument>,
        trigger_stop_order: OrderHandler,
        fill_market_order: OrderHandler,
        fill_limit_order: OrderHandler,
    ) -> Self {
        Self {
            instrument,
            bid: AtomicCell::new(None),
            ask: AtomicCell::new(None),
            last: AtomicCell::new(None),
            orders: DashMap::new(),
            orders_bid: RwLock::new(Vec::new()),
            orders_ask: RwLock::new(Vec::new()),
            ts_last_sweep: AtomicU64::new(0),
            trigger_stop_order,
            fill_market_order,
            fill_limit_order,
        }
    }

    /// The instrument this core matches.
    #[must_use]
    pub fn instrument(&self) -> &Arc<Instrument> {
        &self.instrument
    }

    /// The instrument's price precision.
    #[must_use]
    #[inline]
    pub fn price_precision(&self) -> u8 {
        self.instrument.price_precision()
    }

    /// The current best bid, if one has been published.
    #[must_use]
    pub fn bid(&self) -> Option<Price> {
        self.bid
            .load()
            .map(|raw| Price::new(raw, self.price_precision()))
    }

    /// The current best ask, if one has been published.
    #[must_use]
    pub fn ask(&self) -> Option<Price> {
        self.ask
            .load()
            .map(|raw| Price::new(raw, self.price_precision()))
    }

    /// The last traded price, if one has been published.
    #[must_use]
    pub fn last(&self) -> Option<Price> {
        self.last
            .load()
            .map(|raw| Price::new(raw, self.price_precision()))
    }

    /// The current best bid as a raw value.
    #[must_use]
    #[inline]
    pub fn bid_raw(&self) -> Option<i64> {
        self.bid.load()
    }

    /// The current best ask as a raw value.
    #[must_use]
    #[inline]
    pub fn ask_raw(&self) -> Option<i64> {
        self.ask.load()
    }

    /// The last traded price as a raw value.
    #[must_use]
    #[inline]
    pub fn last_raw(&self) -> Option<i64> {
        self.last.load()
    }

    /// Publishes a new best bid. The raw value is stored without validation.
    pub fn set_bid_raw(&self, raw: i64) {
        self.bid.store(Some(raw));
    }

    /// Publishes a new best ask. The raw value is stored without validation.
    pub fn set_ask_raw(&self, raw: i64) {
        self.ask.store(Some(raw));
    }

    /// Publishes a new last traded price. The raw value is stored without
    /// validation.
    pub fn set_last_raw(&self, raw: i64) {
        self.last.store(Some(raw));
    }

    /// The spread between best ask and best bid, in raw units.
    #[must_use]
    pub fn spread_raw(&self) -> Option<i64> {
        match (self.bid.load(), self.ask.load()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// The mid price as a decimal, for analytics off the hot path.
    #[must_use]
    pub fn mid_price(&self) -> Option<f64> {
        match (self.bid.load(), self.ask.load()) {
            (Some(bid), Some(ask)) => {
                let scale = 10f64.powi(i32::from(self.price_precision()));
                Some((bid as f64 + ask as f64) / 2.0 / scale)
            }
            _ => None,
        }
    }

    /// The timestamp passed to the most recent [`MatchingCore::iterate`]
    /// call, in nanoseconds. Zero before the first sweep.
    #[must_use]
    pub fn last_sweep_ns(&self) -> u64 {
        self.ts_last_sweep.load(Ordering::Relaxed)
    }

    /// Clears all price state and empties the working set.
    pub fn reset(&self) {
        self.bid.store(None);
        self.ask.store(None);
        self.last.store(None);
        self.orders.clear();
        self.bids_write().clear();
        self.asks_write().clear();
        trace!("Matching core for {} reset", self.instrument.symbol());
    }

    // Lock poisoning requires a panic on another thread while holding the
    // guard, which the single-owner contract excludes.

    pub(super) fn bids_read(&self) -> RwLockReadGuard<'_, Vec<Arc<Order>>> {
        self.orders_bid.read().expect("bid side lock poisoned")
    }

    pub(super) fn bids_write(&self) -> RwLockWriteGuard<'_, Vec<Arc<Order>>> {
        self.orders_bid.write().expect("bid side lock poisoned")
    }

    pub(super) fn asks_read(&self) -> RwLockReadGuard<'_, Vec<Arc<Order>>> {
        self.orders_ask.read().expect("ask side lock poisoned")
    }

    pub(super) fn asks_write(&self) -> RwLockWriteGuard<'_, Vec<Arc<Order>>> {
        self.orders_ask.write().expect("ask side lock poisoned")
    }
}

impl fmt::Debug for MatchingCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchingCore")
            .field("instrument", &self.instrument.symbol())
            .field("bid", &self.bid.load())
            .field("ask", &self.ask.load())
            .field("last", &self.last.load())
            .field("orders", &self.orders.len())
            .finish_non_exhaustive()
    }
}
