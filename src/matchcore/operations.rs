//! Working-set operations: adding, deleting and querying orders

use super::core::MatchingCore;
use super::error::MatchingCoreError;
use crate::model::{Order, OrderId, OrderSide};
use dashmap::mapref::entry::Entry;
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::trace;

impl MatchingCore {
    /// Registers a working order with the core.
    ///
    /// The order is indexed by client order id and inserted into the side
    /// list chosen by its side, which is re-sorted before this method
    /// returns: bids descending and asks ascending by priority key, so the
    /// most aggressive order on each side comes first.
    ///
    /// # Errors
    /// Returns [`MatchingCoreError::InvalidOrderType`] for market orders
    /// (they execute upstream and never rest) and
    /// [`MatchingCoreError::OrderAlreadyExists`] when the client order id is
    /// already working. State is untouched on error.
    pub fn add_order(&self, order: Arc<Order>) -> Result<(), MatchingCoreError> {
        if !order.order_type().is_passive() {
            return Err(MatchingCoreError::InvalidOrderType {
                order_type: order.order_type(),
            });
        }

        match self.orders.entry(order.client_order_id()) {
            Entry::Occupied(_) => {
                return Err(MatchingCoreError::OrderAlreadyExists {
                    client_order_id: order.client_order_id(),
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(Arc::clone(&order));
            }
        }

        trace!("Adding order {order}");
        match order.side() {
            OrderSide::Buy => {
                let mut bids = self.bids_write();
                bids.push(order);
                bids.sort_by_key(|o| Reverse(o.priority_key()));
            }
            OrderSide::Sell => {
                let mut asks = self.asks_write();
                asks.push(order);
                asks.sort_by_key(|o| o.priority_key());
            }
        }

        Ok(())
    }

    /// Removes a working order from the core.
    ///
    /// Idempotent: deleting an unknown id is a no-op. A sweep already in
    /// flight keeps its snapshot of the working set; it defends against
    /// deleted-and-closed orders via the closed flag.
    pub fn delete_order(&self, client_order_id: &OrderId) {
        let Some((_, order)) = self.orders.remove(client_order_id) else {
            trace!("delete_order: {client_order_id} not in the working set");
            return;
        };

        trace!("Deleting order {order}");
        match order.side() {
            OrderSide::Buy => {
                self.bids_write()
                    .retain(|o| o.client_order_id() != *client_order_id);
            }
            OrderSide::Sell => {
                self.asks_write()
                    .retain(|o| o.client_order_id() != *client_order_id);
            }
        }
    }

    /// Looks up a working order by client order id.
    #[must_use]
    pub fn get_order(&self, client_order_id: &OrderId) -> Option<Arc<Order>> {
        self.orders
            .get(client_order_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Returns `true` if an order with the given id is working.
    #[must_use]
    pub fn order_exists(&self, client_order_id: &OrderId) -> bool {
        self.orders.contains_key(client_order_id)
    }

    /// All working orders: the bid list followed by the ask list.
    ///
    /// Each side keeps its own priority order; the concatenation is not
    /// globally sorted.
    #[must_use]
    pub fn get_orders(&self) -> Vec<Arc<Order>> {
        let bids = self.bids_read();
        let asks = self.asks_read();
        bids.iter().chain(asks.iter()).cloned().collect()
    }

    /// The buy-side working orders, most aggressive (highest key) first.
    #[must_use]
    pub fn get_orders_bid(&self) -> Vec<Arc<Order>> {
        self.bids_read().clone()
    }

    /// The sell-side working orders, most aggressive (lowest key) first.
    #[must_use]
    pub fn get_orders_ask(&self) -> Vec<Arc<Order>> {
        self.asks_read().clone()
    }

    /// The number of working orders.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// The number of buy-side working orders.
    #[must_use]
    pub fn bid_order_count(&self) -> usize {
        self.bids_read().len()
    }

    /// The number of sell-side working orders.
    #[must_use]
    pub fn ask_order_count(&self) -> usize {
        self.asks_read().len()
    }
}
