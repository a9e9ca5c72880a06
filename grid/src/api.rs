//! Order API contract and its HTTP adapter.
//!
//! The backend itself is out of scope; the grid consumes it through
//! [`OrderApi`]. [`HttpOrderApi`] is the production adapter; tests
//! substitute an in-memory implementation.

use async_trait::async_trait;
use orderly_engine::{NewOrder, Order};

use crate::config::GridConfig;
use crate::error::ApiError;

/// The authoritative order endpoints, as the grid sees them.
#[async_trait]
pub trait OrderApi: Send + Sync {
    /// Fetch the full ordered list (initial load and post-creation
    /// re-fetch).
    async fn list_orders(&self) -> Result<Vec<Order>, ApiError>;

    /// Create an order. The server assigns id and version; the resulting
    /// `order_created` push event is what drives grid refreshes.
    async fn create_order(&self, draft: NewOrder) -> Result<Order, ApiError>;

    /// Write a full record. The server compares `order.version` against
    /// its stored version: a match saves and returns the record with the
    /// version bumped, a mismatch is [`ApiError::VersionConflict`].
    async fn update_order(&self, order: &Order) -> Result<Order, ApiError>;
}

/// [`OrderApi`] over HTTP: `GET/POST /orders`, `PUT /orders/{id}`.
#[derive(Debug, Clone)]
pub struct HttpOrderApi {
    client: reqwest::Client,
    base: String,
}

impl HttpOrderApi {
    /// Create an adapter against the given base URL.
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            client: reqwest::Client::new(),
            base,
        }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.api_base.clone())
    }

    fn orders_url(&self) -> String {
        format!("{}/orders", self.base)
    }

    fn order_url(&self, id: orderly_engine::OrderId) -> String {
        format!("{}/orders/{}", self.base, id)
    }
}

/// Map a non-success response to an [`ApiError`], consuming the body for
/// the error message.
async fn error_from_response(
    id: Option<orderly_engine::OrderId>,
    response: reqwest::Response,
) -> ApiError {
    let status = response.status();
    match (status.as_u16(), id) {
        (409, Some(id)) => ApiError::VersionConflict { id },
        (404, Some(id)) => ApiError::NotFound(id),
        _ => ApiError::Api {
            status: status.as_u16(),
            message: response.text().await.unwrap_or_default(),
        },
    }
}

#[async_trait]
impl OrderApi for HttpOrderApi {
    async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let response = self.client.get(self.orders_url()).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(None, response).await);
        }
        Ok(response.json().await?)
    }

    async fn create_order(&self, draft: NewOrder) -> Result<Order, ApiError> {
        let response = self
            .client
            .post(self.orders_url())
            .json(&draft)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(None, response).await);
        }
        Ok(response.json().await?)
    }

    async fn update_order(&self, order: &Order) -> Result<Order, ApiError> {
        let response = self
            .client
            .put(self.order_url(order.id))
            .json(order)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(Some(order.id), response).await);
        }
        Ok(response.json().await?)
    }
}
