//! Push-event decoding.
//!
//! The push channel delivers JSON frames of shape
//! `{"event": "...", "order": {...}}`. Only `order_updated` and
//! `order_created` carry meaning for the grid; every other event name
//! decodes to [`PushEvent::Unknown`] so a listener can skip it without
//! treating it as a failure.

use crate::{error::Result, Error, Order};
use serde::Deserialize;

/// A server-originated push message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PushEvent {
    /// A record was created; the grid re-fetches the full list.
    OrderCreated { order: Order },
    /// A record changed; the grid folds it into the dataset store.
    OrderUpdated { order: Order },
    /// Any event name the grid does not consume.
    #[serde(other)]
    Unknown,
}

impl PushEvent {
    /// Decode one JSON frame.
    ///
    /// Unparsable JSON, a missing `order`, or an order without required
    /// fields is a [`Error::MalformedEvent`]; an unrecognized `event` name
    /// is not an error.
    pub fn decode(frame: &str) -> Result<PushEvent> {
        serde_json::from_str(frame).map_err(|e| Error::MalformedEvent(e.to_string()))
    }
}
