//! Dataset store - the canonical record collection.
//!
//! The store is the single source of truth for what the server last
//! confirmed. Both the commit pipeline (after a successful write) and the
//! remote update listener (on every applicable push event) fold results in
//! through [`DatasetStore::replace`]; nothing else mutates a record.

use crate::{error::Result, Error, Order, OrderId};

/// Ordered collection of orders, unique by id.
///
/// Insertion order is display order; datasets are small (one grid view),
/// so lookups are linear scans over a `Vec`, which keeps display order
/// trivially stable across replacements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetStore {
    orders: Vec<Order>,
}

impl DatasetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self { orders: Vec::new() }
    }

    /// Replace the whole dataset.
    ///
    /// Used on initial load and on the full re-fetch after a creation
    /// event. The order of `orders` becomes the display order.
    pub fn reset(&mut self, orders: Vec<Order>) {
        self.orders = orders;
    }

    /// All orders in display order.
    pub fn all(&self) -> &[Order] {
        &self.orders
    }

    /// Get an order by id.
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// Check whether an order exists.
    pub fn contains(&self, id: OrderId) -> bool {
        self.get(id).is_some()
    }

    /// Overwrite the order with matching id, preserving its position.
    ///
    /// This is the only per-record mutator; a replace always supplies a
    /// complete record, never a partial patch. An unknown id is an
    /// [`Error::UnknownOrder`], which callers log and ignore.
    pub fn replace(&mut self, order: Order) -> Result<()> {
        match self.orders.iter_mut().find(|o| o.id == order.id) {
            Some(slot) => {
                *slot = order;
                Ok(())
            }
            None => Err(Error::UnknownOrder(order.id)),
        }
    }

    /// Number of orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Check if the store holds no orders.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
