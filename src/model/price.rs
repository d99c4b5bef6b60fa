//! Fixed-point price representation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixed-point decimal price: a signed 64-bit raw value scaled by
/// `10^precision`.
///
/// All matching comparisons operate on the raw value alone, so two prices
/// are only meaningfully comparable when they share a precision (i.e. belong
/// to the same instrument). No floating point participates in the matching
/// hot path; [`Price::as_f64`] exists for display and analytics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price {
    raw: i64,
    precision: u8,
}

impl Price {
    /// Creates a price from a raw scaled value and its decimal precision.
    pub fn new(raw: i64, precision: u8) -> Self {
        Self { raw, precision }
    }

    /// Creates a price from a decimal value, rounding to the nearest raw unit.
    ///
    /// Construction convenience only; never used on the matching hot path.
    pub fn from_f64(value: f64, precision: u8) -> Self {
        let scale = 10i64.pow(u32::from(precision)) as f64;
        Self {
            raw: (value * scale).round() as i64,
            precision,
        }
    }

    /// The raw scaled value.
    #[must_use]
    #[inline]
    pub fn raw(&self) -> i64 {
        self.raw
    }

    /// The decimal precision (number of fractional digits).
    #[must_use]
    #[inline]
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// The decimal value as a float, for display and analytics.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        self.raw as f64 / 10f64.powi(i32::from(self.precision))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.precision == 0 {
            return write!(f, "{}", self.raw);
        }
        let scale = 10i64.pow(u32::from(self.precision));
        let int = (self.raw / scale).abs();
        let frac = (self.raw % scale).abs();
        let sign = if self.raw < 0 { "-" } else { "" };
        write!(
            f,
            "{sign}{int}.{frac:0width$}",
            width = self.precision as usize
        )
    }
}
