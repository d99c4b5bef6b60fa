//! Order sides, order types, and liquidity sides.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The side of an order, immutable for the order's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OrderSide {
    /// A buy order. Rests on the bid side and matches against the ask.
    Buy = 0,

    /// A sell order. Rests on the ask side and matches against the bid.
    Sell = 1,
}

impl OrderSide {
    /// Returns the opposite side.
    #[must_use]
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            OrderSide::Buy => OrderSide::Sell,
            OrderSide::Sell => OrderSide::Buy,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "Buy"),
            OrderSide::Sell => write!(f, "Sell"),
        }
    }
}

/// The type of an order, determining its trigger and fill semantics.
///
/// Every type except [`OrderType::Market`] is *passive*: it can rest in the
/// working set of a matching core until the market reaches it. Market orders
/// execute immediately upstream and are rejected by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OrderType {
    /// Execute immediately at the best available price. Never rests.
    Market = 0,

    /// Rest at a limit price; fill when the opposite side reaches it.
    Limit = 1,

    /// A market order whose unfilled remainder rests as a limit order.
    MarketToLimit = 2,

    /// Fire a market fill when the market rises (buy) or falls (sell) to the
    /// trigger price.
    StopMarket = 3,

    /// Activate a limit order when the stop trigger is reached.
    StopLimit = 4,

    /// Fire a market fill when the market falls (buy) or rises (sell) to the
    /// trigger price — the mirror of a stop.
    MarketIfTouched = 5,

    /// Activate a limit order when the touch trigger is reached.
    LimitIfTouched = 6,

    /// A stop-market order whose trigger trails the market.
    TrailingStopMarket = 7,

    /// A stop-limit order whose trigger trails the market.
    TrailingStopLimit = 8,
}

impl OrderType {
    /// Returns `true` if orders of this type can rest in a matching core.
    #[must_use]
    #[inline]
    pub fn is_passive(self) -> bool {
        !matches!(self, OrderType::Market)
    }

    /// Returns `true` if orders of this type carry a limit price.
    #[must_use]
    pub fn has_limit_price(self) -> bool {
        matches!(
            self,
            OrderType::Limit
                | OrderType::MarketToLimit
                | OrderType::StopLimit
                | OrderType::LimitIfTouched
                | OrderType::TrailingStopLimit
        )
    }

    /// Returns `true` if orders of this type carry a trigger price.
    #[must_use]
    pub fn has_trigger_price(self) -> bool {
        matches!(
            self,
            OrderType::StopMarket
                | OrderType::StopLimit
                | OrderType::MarketIfTouched
                | OrderType::LimitIfTouched
                | OrderType::TrailingStopMarket
                | OrderType::TrailingStopLimit
        )
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderType::Market => "Market",
            OrderType::Limit => "Limit",
            OrderType::MarketToLimit => "MarketToLimit",
            OrderType::StopMarket => "StopMarket",
            OrderType::StopLimit => "StopLimit",
            OrderType::MarketIfTouched => "MarketIfTouched",
            OrderType::LimitIfTouched => "LimitIfTouched",
            OrderType::TrailingStopMarket => "TrailingStopMarket",
            OrderType::TrailingStopLimit => "TrailingStopLimit",
        };
        write!(f, "{name}")
    }
}

/// Which side of the liquidity ledger a fill lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum LiquiditySide {
    /// Provided liquidity: the order rested in the book before filling.
    Maker = 0,

    /// Removed liquidity: the order crossed the book on arrival.
    Taker = 1,
}

impl fmt::Display for LiquiditySide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiquiditySide::Maker => write!(f, "Maker"),
            LiquiditySide::Taker => write!(f, "Taker"),
        }
    }
}
