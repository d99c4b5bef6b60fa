//! Instrument metadata consumed by the matching core.

use super::price::Price;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable metadata for a tradable instrument.
///
/// The matching core only consumes `price_precision`, the decimal scale
/// shared by every price of the instrument. Raw prices are the decimal value
/// multiplied by `10^price_precision`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    symbol: String,
    price_precision: u8,
}

impl Instrument {
    /// Creates instrument metadata for the given symbol and price precision.
    pub fn new(symbol: impl Into<String>, price_precision: u8) -> Self {
        Self {
            symbol: symbol.into(),
            price_precision,
        }
    }

    /// The symbol or identifier for this instrument.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The decimal precision of the instrument's prices.
    #[must_use]
    #[inline]
    pub fn price_precision(&self) -> u8 {
        self.price_precision
    }

    /// Builds a [`Price`] at this instrument's precision from a raw value.
    #[must_use]
    pub fn price_from_raw(&self, raw: i64) -> Price {
        Price::new(raw, self.price_precision)
    }

    /// Builds a [`Price`] at this instrument's precision from a decimal value.
    #[must_use]
    pub fn price_from_f64(&self, value: f64) -> Price {
        Price::from_f64(value, self.price_precision)
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (precision {})", self.symbol, self.price_precision)
    }
}
