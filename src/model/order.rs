//! Working orders and their priority keys.

use super::price::Price;
use super::types::{LiquiditySide, OrderSide, OrderType};
use crossbeam::atomic::AtomicCell;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// A unique client order identifier, backed by a UUID.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Generates a new random (v4) identifier.
    #[must_use]
    pub fn new_uuid() -> Self {
        Self(Uuid::new_v4())
    }

    /// Builds a deterministic identifier from an integer.
    ///
    /// Intended for tests and replay tooling where reproducible ids matter.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self(Uuid::from_u128(u128::from(value)))
    }

    /// The underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A working order shared between a matching core and its owner.
///
/// The identity fields (`client_order_id`, `side`, `order_type`, `quantity`,
/// `price`, `trigger_price`) are immutable for the order's lifetime, and the
/// constructors guarantee that the price fields required by each order type
/// are present. The activation state (`is_triggered`, `triggered_price`,
/// `liquidity_side`, `is_closed`) lives in atomic cells so the core and the
/// event sinks can update a shared `Arc<Order>` through `&self`.
#[derive(Debug)]
pub struct Order {
    client_order_id: OrderId,
    side: OrderSide,
    order_type: OrderType,
    quantity: u64,
    price: Option<Price>,
    trigger_price: Option<Price>,
    is_triggered: AtomicBool,
    triggered_price: AtomicCell<Option<Price>>,
    liquidity_side: AtomicCell<Option<LiquiditySide>>,
    is_closed: AtomicBool,
}

impl Order {
    fn new(
        client_order_id: OrderId,
        side: OrderSide,
        order_type: OrderType,
        quantity: u64,
        price: Option<Price>,
        trigger_price: Option<Price>,
    ) -> Self {
        Self {
            client_order_id,
            side,
            order_type,
            quantity,
            price,
            trigger_price,
            is_triggered: AtomicBool::new(false),
            triggered_price: AtomicCell::new(None),
            liquidity_side: AtomicCell::new(None),
            is_closed: AtomicBool::new(false),
        }
    }

    /// Creates a market order.
    ///
    /// Market orders execute upstream and cannot rest in a matching core.
    pub fn market(client_order_id: OrderId, side: OrderSide, quantity: u64) -> Self {
        Self::new(client_order_id, side, OrderType::Market, quantity, None, None)
    }

    /// Creates a limit order resting at `price`.
    pub fn limit(client_order_id: OrderId, side: OrderSide, quantity: u64, price: Price) -> Self {
        Self::new(
            client_order_id,
            side,
            OrderType::Limit,
            quantity,
            Some(price),
            None,
        )
    }

    /// Creates a market-to-limit order whose remainder rests at `price`.
    pub fn market_to_limit(
        client_order_id: OrderId,
        side: OrderSide,
        quantity: u64,
        price: Price,
    ) -> Self {
        Self::new(
            client_order_id,
            side,
            OrderType::MarketToLimit,
            quantity,
            Some(price),
            None,
        )
    }

    /// Creates a stop-market order activating at `trigger_price`.
    pub fn stop_market(
        client_order_id: OrderId,
        side: OrderSide,
        quantity: u64,
        trigger_price: Price,
    ) -> Self {
        Self::new(
            client_order_id,
            side,
            OrderType::StopMarket,
            quantity,
            None,
            Some(trigger_price),
        )
    }

    /// Creates a stop-limit order activating at `trigger_price` and resting
    /// at `price` once triggered.
    pub fn stop_limit(
        client_order_id: OrderId,
        side: OrderSide,
        quantity: u64,
        price: Price,
        trigger_price: Price,
    ) -> Self {
        Self::new(
            client_order_id,
            side,
            OrderType::StopLimit,
            quantity,
            Some(price),
            Some(trigger_price),
        )
    }

    /// Creates a market-if-touched order activating at `trigger_price`.
    pub fn market_if_touched(
        client_order_id: OrderId,
        side: OrderSide,
        quantity: u64,
        trigger_price: Price,
    ) -> Self {
        Self::new(
            client_order_id,
            side,
            OrderType::MarketIfTouched,
            quantity,
            None,
            Some(trigger_price),
        )
    }

    /// Creates a limit-if-touched order activating at `trigger_price` and
    /// resting at `price` once triggered.
    pub fn limit_if_touched(
        client_order_id: OrderId,
        side: OrderSide,
        quantity: u64,
        price: Price,
        trigger_price: Price,
    ) -> Self {
        Self::new(
            client_order_id,
            side,
            OrderType::LimitIfTouched,
            quantity,
            Some(price),
            Some(trigger_price),
        )
    }

    /// Creates a trailing stop-market order with its current trigger at
    /// `trigger_price`.
    ///
    /// Trail maintenance (moving the trigger with the market) belongs to the
    /// owner; the core treats the order exactly like a stop-market.
    pub fn trailing_stop_market(
        client_order_id: OrderId,
        side: OrderSide,
        quantity: u64,
        trigger_price: Price,
    ) -> Self {
        Self::new(
            client_order_id,
            side,
            OrderType::TrailingStopMarket,
            quantity,
            None,
            Some(trigger_price),
        )
    }

    /// Creates a trailing stop-limit order with its current trigger at
    /// `trigger_price` and limit at `price`.
    pub fn trailing_stop_limit(
        client_order_id: OrderId,
        side: OrderSide,
        quantity: u64,
        price: Price,
        trigger_price: Price,
    ) -> Self {
        Self::new(
            client_order_id,
            side,
            OrderType::TrailingStopLimit,
            quantity,
            Some(price),
            Some(trigger_price),
        )
    }

    /// The unique client order identifier.
    #[must_use]
    #[inline]
    pub fn client_order_id(&self) -> OrderId {
        self.client_order_id
    }

    /// The order side.
    #[must_use]
    #[inline]
    pub fn side(&self) -> OrderSide {
        self.side
    }

    /// The order type.
    #[must_use]
    #[inline]
    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// The order quantity.
    #[must_use]
    #[inline]
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// The limit price, present for limit-bearing order types.
    #[must_use]
    #[inline]
    pub fn price(&self) -> Option<Price> {
        self.price
    }

    /// The trigger price, present for stop and if-touched order types.
    #[must_use]
    #[inline]
    pub fn trigger_price(&self) -> Option<Price> {
        self.trigger_price
    }

    /// Whether a conditional order has activated.
    #[must_use]
    #[inline]
    pub fn is_triggered(&self) -> bool {
        self.is_triggered.load(Ordering::Relaxed)
    }

    /// The price at which the order activated, once triggered.
    #[must_use]
    #[inline]
    pub fn triggered_price(&self) -> Option<Price> {
        self.triggered_price.load()
    }

    /// The liquidity side assigned by the matching core, once determined.
    #[must_use]
    #[inline]
    pub fn liquidity_side(&self) -> Option<LiquiditySide> {
        self.liquidity_side.load()
    }

    /// Whether the order is terminal. Closed orders are skipped by the sweep.
    #[must_use]
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.is_closed.load(Ordering::Relaxed)
    }

    /// Sets the activation flag.
    #[inline]
    pub fn set_triggered(&self, triggered: bool) {
        self.is_triggered.store(triggered, Ordering::Relaxed);
    }

    /// Records the price at which the order activated.
    #[inline]
    pub fn set_triggered_price(&self, price: Price) {
        self.triggered_price.store(Some(price));
    }

    /// Records which side of the liquidity ledger the order lands on.
    #[inline]
    pub fn set_liquidity_side(&self, liquidity_side: LiquiditySide) {
        self.liquidity_side.store(Some(liquidity_side));
    }

    /// Marks the order terminal.
    #[inline]
    pub fn close(&self) {
        self.is_closed.store(true, Ordering::Relaxed);
    }

    /// The limit price of a limit-bearing order.
    ///
    /// # Panics
    /// Panics if the order type carries no limit price. Unreachable through
    /// the constructors.
    pub(crate) fn limit_px(&self) -> Price {
        self.price
            .expect("limit-bearing order constructed without a price")
    }

    /// The trigger price of a conditional order.
    ///
    /// # Panics
    /// Panics if the order type carries no trigger price. Unreachable through
    /// the constructors.
    pub(crate) fn trigger_px(&self) -> Price {
        self.trigger_price
            .expect("conditional order constructed without a trigger price")
    }

    /// The priority key used to sort a matching core's side lists.
    ///
    /// Limit-style orders queue at their limit price, conditional market
    /// orders at their trigger price, and conditional limit orders switch
    /// from trigger to limit price once triggered.
    ///
    /// # Panics
    /// Panics for [`OrderType::Market`]: market orders never rest, so asking
    /// for their priority is a programming error.
    #[must_use]
    pub fn priority_key(&self) -> i64 {
        match self.order_type {
            OrderType::Limit | OrderType::MarketToLimit => self.limit_px().raw(),
            OrderType::StopMarket | OrderType::MarketIfTouched | OrderType::TrailingStopMarket => {
                self.trigger_px().raw()
            }
            OrderType::StopLimit | OrderType::LimitIfTouched | OrderType::TrailingStopLimit => {
                if self.is_triggered() {
                    self.limit_px().raw()
                } else {
                    self.trigger_px().raw()
                }
            }
            OrderType::Market => panic!("market orders have no priority key"),
        }
    }
}

impl PartialEq for Order {
    fn eq(&self, other: &Self) -> bool {
        self.client_order_id == other.client_order_id
    }
}

impl Eq for Order {}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} qty {}",
            self.order_type, self.side, self.client_order_id, self.quantity
        )?;
        if let Some(price) = self.price {
            write!(f, " @ {price}")?;
        }
        if let Some(trigger) = self.trigger_price {
            write!(f, " trigger {trigger}")?;
        }
        Ok(())
    }
}
