//! Matching core snapshots for persistence and hand-off

use super::core::MatchingCore;
use super::error::MatchingCoreError;
use crate::model::{LiquiditySide, Order, OrderId, OrderSide, OrderType, Price};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::trace;

/// Snapshot format version for forward compatibility checks.
pub const MATCHING_CORE_SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// A plain-data image of one working order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSnapshot {
    /// The client order id
    pub client_order_id: OrderId,
    /// The order side
    pub side: OrderSide,
    /// The order type
    pub order_type: OrderType,
    /// The order quantity
    pub quantity: u64,
    /// The raw limit price, for limit-bearing types
    pub price: Option<i64>,
    /// The raw trigger price, for conditional types
    pub trigger_price: Option<i64>,
    /// Whether the order had activated at capture time
    pub is_triggered: bool,
    /// The raw price at which the order activated, if any
    pub triggered_price: Option<i64>,
    /// The liquidity side assigned by the core, if determined
    pub liquidity_side: Option<LiquiditySide>,
    /// Whether the order was terminal at capture time
    pub is_closed: bool,
}

impl OrderSnapshot {
    /// Captures the current state of a working order.
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        Self {
            client_order_id: order.client_order_id(),
            side: order.side(),
            order_type: order.order_type(),
            quantity: order.quantity(),
            price: order.price().map(|p| p.raw()),
            trigger_price: order.trigger_price().map(|p| p.raw()),
            is_triggered: order.is_triggered(),
            triggered_price: order.triggered_price().map(|p| p.raw()),
            liquidity_side: order.liquidity_side(),
            is_closed: order.is_closed(),
        }
    }

    /// Rebuilds a working order from this image at the given precision.
    ///
    /// # Errors
    /// Returns [`MatchingCoreError::DeserializationError`] when a price
    /// field required by the order type is missing, and
    /// [`MatchingCoreError::InvalidOrderType`] for market orders, which
    /// never rest in a core.
    pub fn to_order(&self, precision: u8) -> Result<Arc<Order>, MatchingCoreError> {
        let id = self.client_order_id;
        let price = self.price.map(|raw| Price::new(raw, precision));
        let trigger = self.trigger_price.map(|raw| Price::new(raw, precision));

        let limit = |price: Option<Price>| {
            price.ok_or_else(|| MatchingCoreError::DeserializationError {
                message: format!("order {id} is missing its limit price"),
            })
        };
        let stop = |trigger: Option<Price>| {
            trigger.ok_or_else(|| MatchingCoreError::DeserializationError {
                message: format!("order {id} is missing its trigger price"),
            })
        };

        let order = match self.order_type {
            OrderType::Limit => Order::limit(id, self.side, self.quantity, limit(price)?),
            OrderType::MarketToLimit => {
                Order::market_to_limit(id, self.side, self.quantity, limit(price)?)
            }
            OrderType::StopMarket => {
                Order::stop_market(id, self.side, self.quantity, stop(trigger)?)
            }
            OrderType::StopLimit => {
                Order::stop_limit(id, self.side, self.quantity, limit(price)?, stop(trigger)?)
            }
            OrderType::MarketIfTouched => {
                Order::market_if_touched(id, self.side, self.quantity, stop(trigger)?)
            }
            OrderType::LimitIfTouched => Order::limit_if_touched(
                id,
                self.side,
                self.quantity,
                limit(price)?,
                stop(trigger)?,
            ),
            OrderType::TrailingStopMarket => {
                Order::trailing_stop_market(id, self.side, self.quantity, stop(trigger)?)
            }
            OrderType::TrailingStopLimit => Order::trailing_stop_limit(
                id,
                self.side,
                self.quantity,
                limit(price)?,
                stop(trigger)?,
            ),
            OrderType::Market => {
                return Err(MatchingCoreError::InvalidOrderType {
                    order_type: OrderType::Market,
                });
            }
        };

        order.set_triggered(self.is_triggered);
        if let Some(raw) = self.triggered_price {
            order.set_triggered_price(Price::new(raw, precision));
        }
        if let Some(liquidity_side) = self.liquidity_side {
            order.set_liquidity_side(liquidity_side);
        }
        if self.is_closed {
            order.close();
        }

        Ok(Arc::new(order))
    }
}

/// A snapshot of the matching core state at a specific point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingCoreSnapshot {
    /// The symbol of the instrument this core matches
    pub symbol: String,

    /// The instrument's price precision
    pub price_precision: u8,

    /// Timestamp when the snapshot was created (nanoseconds since epoch)
    pub timestamp: u64,

    /// The raw best bid, if the market had published one
    pub bid: Option<i64>,

    /// The raw best ask, if the market had published one
    pub ask: Option<i64>,

    /// The raw last traded price, if the market had published one
    pub last: Option<i64>,

    /// Images of the working orders: the bid list followed by the ask list
    pub orders: Vec<OrderSnapshot>,
}

impl MatchingCoreSnapshot {
    /// Serializes the snapshot to JSON.
    ///
    /// # Errors
    /// Returns [`MatchingCoreError::SerializationError`] on encoder failure.
    pub fn to_json(&self) -> Result<String, MatchingCoreError> {
        serde_json::to_string(self).map_err(|error| MatchingCoreError::SerializationError {
            message: error.to_string(),
        })
    }

    /// Deserializes a snapshot from JSON.
    ///
    /// # Errors
    /// Returns [`MatchingCoreError::DeserializationError`] on malformed
    /// input.
    pub fn from_json(json: &str) -> Result<Self, MatchingCoreError> {
        serde_json::from_str(json).map_err(|error| MatchingCoreError::DeserializationError {
            message: error.to_string(),
        })
    }

    /// Computes the SHA-256 checksum of the snapshot's canonical JSON
    /// encoding, as a lowercase hex string.
    ///
    /// # Errors
    /// Returns [`MatchingCoreError::SerializationError`] on encoder failure.
    pub fn checksum(&self) -> Result<String, MatchingCoreError> {
        let payload =
            serde_json::to_vec(self).map_err(|error| MatchingCoreError::SerializationError {
                message: error.to_string(),
            })?;

        let mut hasher = Sha256::new();
        hasher.update(payload);

        let checksum_bytes = hasher.finalize();
        Ok(checksum_bytes.iter().map(|byte| format!("{byte:02x}")).collect::<String>())
    }
}

/// A snapshot wrapped with its format version and integrity checksum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingCoreSnapshotPackage {
    /// The snapshot format version
    pub version: u32,

    /// SHA-256 checksum of the snapshot's JSON encoding
    pub checksum: String,

    /// The wrapped snapshot
    pub snapshot: MatchingCoreSnapshot,
}

impl MatchingCoreSnapshotPackage {
    /// Wraps a snapshot, computing its checksum.
    ///
    /// # Errors
    /// Returns [`MatchingCoreError::SerializationError`] on encoder failure.
    pub fn wrap(snapshot: MatchingCoreSnapshot) -> Result<Self, MatchingCoreError> {
        let checksum = snapshot.checksum()?;
        Ok(Self {
            version: MATCHING_CORE_SNAPSHOT_FORMAT_VERSION,
            checksum,
            snapshot,
        })
    }

    /// Validates the checksum and version.
    ///
    /// # Errors
    /// Returns [`MatchingCoreError::DeserializationError`] for an
    /// unsupported version and [`MatchingCoreError::ChecksumMismatch`] when
    /// the payload does not hash to the recorded checksum.
    pub fn validate(&self) -> Result<(), MatchingCoreError> {
        if self.version != MATCHING_CORE_SNAPSHOT_FORMAT_VERSION {
            return Err(MatchingCoreError::DeserializationError {
                message: format!(
                    "Unsupported snapshot version: {} (expected {})",
                    self.version, MATCHING_CORE_SNAPSHOT_FORMAT_VERSION
                ),
            });
        }

        let computed = self.snapshot.checksum()?;
        if computed != self.checksum {
            return Err(MatchingCoreError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual: computed,
            });
        }

        Ok(())
    }

    /// Consumes the package and returns the validated snapshot.
    ///
    /// # Errors
    /// See [`Self::validate`].
    pub fn into_snapshot(self) -> Result<MatchingCoreSnapshot, MatchingCoreError> {
        self.validate()?;
        Ok(self.snapshot)
    }
}

impl MatchingCore {
    /// Captures the core's price state and working set.
    ///
    /// `timestamp` is recorded verbatim; the core does not consult a clock.
    #[must_use]
    pub fn snapshot(&self, timestamp: u64) -> MatchingCoreSnapshot {
        let orders = self
            .get_orders()
            .iter()
            .map(|order| OrderSnapshot::from_order(order))
            .collect();

        trace!(
            "Capturing matching core snapshot for {}",
            self.instrument.symbol()
        );
        MatchingCoreSnapshot {
            symbol: self.instrument.symbol().to_string(),
            price_precision: self.price_precision(),
            timestamp,
            bid: self.bid_raw(),
            ask: self.ask_raw(),
            last: self.last_raw(),
            orders,
        }
    }

    /// Resets the core and rebuilds it from a snapshot. The event sinks are
    /// left as wired.
    ///
    /// # Errors
    /// Returns [`MatchingCoreError::DeserializationError`] when the
    /// snapshot's precision does not match this core's instrument — the
    /// core is left untouched — or when an order image is incomplete, in
    /// which case the core has been reset and holds the orders restored
    /// before the failure.
    pub fn restore(&self, snapshot: &MatchingCoreSnapshot) -> Result<(), MatchingCoreError> {
        if snapshot.price_precision != self.price_precision() {
            return Err(MatchingCoreError::DeserializationError {
                message: format!(
                    "snapshot precision {} does not match instrument precision {}",
                    snapshot.price_precision,
                    self.price_precision()
                ),
            });
        }

        self.reset();
        if let Some(raw) = snapshot.bid {
            self.set_bid_raw(raw);
        }
        if let Some(raw) = snapshot.ask {
            self.set_ask_raw(raw);
        }
        if let Some(raw) = snapshot.last {
            self.set_last_raw(raw);
        }

        for image in &snapshot.orders {
            let order = image.to_order(self.price_precision())?;
            self.add_order(order)?;
        }

        trace!(
            "Restored matching core for {} with {} orders",
            self.instrument.symbol(),
            snapshot.orders.len()
        );
        Ok(())
    }
}
