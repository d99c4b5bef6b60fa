//! Marketability and trigger predicates.
//!
//! All predicates return `false` while the opposite-side price they consult
//! is uninitialized: no order matches or triggers before the market has
//! published the relevant side.

use super::core::MatchingCore;
use crate::model::{LiquiditySide, OrderSide, Price};

impl MatchingCore {
    /// Whether a limit order at `price` is marketable against the current
    /// top of book.
    ///
    /// A buy matches when the ask has come down to its limit, a sell when
    /// the bid has come up to it.
    #[must_use]
    pub fn is_limit_matched(&self, side: OrderSide, price: Price) -> bool {
        match side {
            OrderSide::Buy => self.ask.load().is_some_and(|ask| ask <= price.raw()),
            OrderSide::Sell => self.bid.load().is_some_and(|bid| bid >= price.raw()),
        }
    }

    /// Whether a stop order with the given trigger has activated.
    ///
    /// A buy stop fires when the market rises into it, a sell stop when the
    /// market falls into it.
    #[must_use]
    pub fn is_stop_triggered(&self, side: OrderSide, trigger_price: Price) -> bool {
        match side {
            OrderSide::Buy => self
                .ask
                .load()
                .is_some_and(|ask| ask >= trigger_price.raw()),
            OrderSide::Sell => self
                .bid
                .load()
                .is_some_and(|bid| bid <= trigger_price.raw()),
        }
    }

    /// Whether an if-touched order with the given trigger has activated.
    ///
    /// The mirror of a stop: a buy if-touched fires when the market falls to
    /// its trigger, a sell if-touched when the market rises to it.
    #[must_use]
    pub fn is_touch_triggered(&self, side: OrderSide, trigger_price: Price) -> bool {
        match side {
            OrderSide::Buy => self
                .ask
                .load()
                .is_some_and(|ask| ask <= trigger_price.raw()),
            OrderSide::Sell => self
                .bid
                .load()
                .is_some_and(|bid| bid >= trigger_price.raw()),
        }
    }
}

/// Determines the liquidity side of a conditional limit order at the instant
/// it triggers.
///
/// An order that was already in range on arrival (`initial`) crosses the
/// book and takes. Otherwise the order makes exactly when its limit sits
/// passively through the trigger: a buy whose limit is below its trigger, or
/// a sell whose limit is above it.
pub(super) fn determine_liquidity_side(
    initial: bool,
    side: OrderSide,
    price: Price,
    trigger_price: Price,
) -> LiquiditySide {
    if initial {
        return LiquiditySide::Taker;
    }
    match side {
        OrderSide::Buy if trigger_price.raw() > price.raw() => LiquiditySide::Maker,
        OrderSide::Sell if trigger_price.raw() < price.raw() => LiquiditySide::Maker,
        _ => LiquiditySide::Taker,
    }
}
