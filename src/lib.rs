//! # Deterministic Order Matching Core
//!
//! A deterministic, per-instrument order matching core written in Rust. This crate provides the trigger and fill decision engine of an algorithmic trading platform: given an instrument's top-of-book (best bid, best ask) and last-traded prices, it decides when resting orders of various types should trigger or fill, and delegates the effects to injected event sinks.
//!
//! ## Key Features
//!
//! - **Six Conditional Order Families**: Limit, market-to-limit, stop-market, stop-limit, market-if-touched, limit-if-touched, and their trailing variants, each with its own trigger and fill semantics.
//!
//! - **Fixed-Point Hot Path**: All matching comparisons are raw 64-bit integer compares at the instrument's price precision. No floating point participates in a matching decision.
//!
//! - **Injected Effects**: Triggering and filling are delegated to three event sinks supplied at construction. The core knows nothing about venues, accounts, positions, or P&L, which makes it equally at home inside an exchange simulator and a live execution adapter.
//!
//! - **Deterministic Priority**: Each side of the working set is kept sorted by priority key — bids descending, asks ascending — so sweeps always examine the most aggressive orders first and replays are reproducible.
//!
//! - **Re-Entrancy Safe Sweeps**: `iterate` operates on a snapshot of the working set and holds no lock while sinks run, so a sink holding an `Arc<MatchingCore>` may delete, add, or close orders synchronously without corrupting the sweep.
//!
//! - **Snapshots**: The full core state (prices and working orders) can be captured, checksummed with SHA-256, round-tripped through JSON, and restored.
//!
//! ## Design Goals
//!
//! 1. **Correctness**: The working-set invariants hold across every public operation, including mutating sink callbacks.
//! 2. **Determinism**: A given sequence of price updates and order operations always produces the same sequence of trigger and fill events.
//! 3. **Isolation**: One core per instrument; two cores share no state and can be driven in parallel by separate owners.
//! 4. **Simplicity at the seams**: The order model and instrument metadata are plain values; effects are three `Fn` sinks.
//!
//! ## Matching Semantics
//!
//! | Order type | Activates when | Fills as |
//! |---|---|---|
//! | `Limit`, `MarketToLimit` | opposite side reaches the limit | maker |
//! | `StopMarket`, `TrailingStopMarket` | market rises (buy) / falls (sell) to the trigger | market fill |
//! | `StopLimit`, `TrailingStopLimit` | stop trigger, then rests as a limit | maker, or taker when marketable on trigger |
//! | `MarketIfTouched` | market falls (buy) / rises (sell) to the trigger | market fill |
//! | `LimitIfTouched` | touch trigger, then rests as a limit | maker, or taker when marketable on trigger |
//!
//! A buy stop fires when the market rises **up to** its trigger; a buy
//! if-touched fires when the market falls **down to** it. Sells mirror
//! this. Predicates never fire against a side the market has not yet
//! published.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use matchcore_rs::prelude::*;
//!
//! let instrument = Arc::new(Instrument::new("BTC/USD", 2));
//!
//! let fills = Arc::new(AtomicUsize::new(0));
//! let fills_in_sink = Arc::clone(&fills);
//!
//! let noop: OrderHandler = Arc::new(|_order| {});
//! let core = MatchingCore::new(
//!     instrument,
//!     Arc::clone(&noop),
//!     Arc::clone(&noop),
//!     Arc::new(move |_order| {
//!         fills_in_sink.fetch_add(1, Ordering::Relaxed);
//!     }),
//! );
//!
//! // A buy limit at 100.50: marketable once the ask comes down to it.
//! let order = Arc::new(Order::limit(
//!     OrderId::new_uuid(),
//!     OrderSide::Buy,
//!     100,
//!     Price::new(10_050, 2),
//! ));
//! core.add_order(Arc::clone(&order)).unwrap();
//!
//! core.set_ask_raw(10_000);
//! core.iterate(1);
//!
//! assert_eq!(fills.load(Ordering::Relaxed), 1);
//! assert_eq!(order.liquidity_side(), Some(LiquiditySide::Maker));
//! ```
//!
//! ## Scope
//!
//! The core matches against top-of-book only. Multi-instrument cross
//! matching, book depth, resting-liquidity aggregation, and transport
//! belong to the surrounding platform. The core is a library surface with
//! no wire protocol, persistence I/O, or CLI.
//!
//! ## Status
//! This project is currently in active development and is not yet suitable for production use.

pub mod matchcore;
pub mod model;

pub mod prelude;
mod utils;

pub use matchcore::{
    MatchingCore, MatchingCoreError, MatchingCoreSnapshot, MatchingCoreSnapshotPackage,
    OrderHandler, OrderSnapshot,
};
pub use model::{Instrument, LiquiditySide, Order, OrderId, OrderSide, OrderType, Price};
pub use utils::current_time_nanos;
