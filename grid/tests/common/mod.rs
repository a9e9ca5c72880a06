//! Shared test fixtures: an in-memory order API with the same CAS
//! semantics as the real update endpoint.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use orderly_engine::{NewOrder, Order, OrderId};
use orderly_grid::{ApiError, GridConfig, GridView, OrderApi};

pub struct InMemoryApi {
    orders: Mutex<Vec<Order>>,
    pub list_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    fail_next_update: AtomicBool,
}

impl InMemoryApi {
    pub fn new(orders: Vec<Order>) -> Arc<Self> {
        Arc::new(Self {
            orders: Mutex::new(orders),
            list_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            fail_next_update: AtomicBool::new(false),
        })
    }

    /// Make the next update call fail with a 500.
    pub fn fail_next_update(&self) {
        self.fail_next_update.store(true, Ordering::SeqCst);
    }

    /// The record as the server currently stores it.
    pub fn stored(&self, id: OrderId) -> Option<Order> {
        self.orders.lock().unwrap().iter().find(|o| o.id == id).cloned()
    }

    /// Apply another client's write server-side: mutate, bump the version,
    /// and return the record as it would appear in an `order_updated` push.
    pub fn remote_write(&self, id: OrderId, mutate: impl FnOnce(&mut Order)) -> Order {
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .expect("remote_write on unknown order");
        mutate(order);
        order.version += 1;
        order.clone()
    }
}

#[async_trait]
impl OrderApi for InMemoryApi {
    async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn create_order(&self, draft: NewOrder) -> Result<Order, ApiError> {
        let mut orders = self.orders.lock().unwrap();
        let id = orders.iter().map(|o| o.id).max().unwrap_or(0) + 1;
        let order = Order {
            id,
            customer_name: draft.customer_name,
            item: draft.item,
            quantity: draft.quantity,
            price: draft.price,
            is_open: draft.is_open,
            version: 1,
        };
        orders.push(order.clone());
        Ok(order)
    }

    async fn update_order(&self, order: &Order) -> Result<Order, ApiError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_next_update.swap(false, Ordering::SeqCst) {
            return Err(ApiError::Api {
                status: 500,
                message: "injected failure".into(),
            });
        }

        let mut orders = self.orders.lock().unwrap();
        let stored = orders
            .iter_mut()
            .find(|o| o.id == order.id)
            .ok_or(ApiError::NotFound(order.id))?;

        if stored.version != order.version {
            return Err(ApiError::VersionConflict { id: order.id });
        }

        *stored = order.clone();
        stored.version += 1;
        Ok(stored.clone())
    }
}

pub fn sample_orders() -> Vec<Order> {
    vec![
        Order::new(1, "A", "X", 2, 10.0),
        Order::new(2, "B", "Y", 1, 25.0),
    ]
}

pub fn view_over(api: &Arc<InMemoryApi>) -> GridView {
    GridView::new(api.clone(), &GridConfig::default())
}

/// Give the listener task time to drain the channel.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(20)).await;
}

/// An `order_updated` frame for the given record.
pub fn updated_frame(order: &Order) -> String {
    serde_json::json!({ "event": "order_updated", "order": order }).to_string()
}

/// An `order_created` frame for the given record.
pub fn created_frame(order: &Order) -> String {
    serde_json::json!({ "event": "order_created", "order": order }).to_string()
}
