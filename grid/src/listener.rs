//! Remote update listener - the push channel consumer.
//!
//! Runs as its own task for the lifetime of the subscription. Individual
//! frame failures (malformed JSON, unknown order ids, a failed re-fetch)
//! are logged and swallowed; only a closed channel or a view teardown ends
//! the loop.

use std::sync::Arc;
use std::sync::Mutex;

use orderly_engine::{Order, PushEvent};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::api::OrderApi;
use crate::highlight::HighlightScheduler;
use crate::view::{lock_state, GridState};

/// Consume push frames until the channel closes.
pub(crate) async fn run(
    state: Arc<Mutex<GridState>>,
    highlights: Arc<HighlightScheduler>,
    api: Arc<dyn OrderApi>,
    mut frames: UnboundedReceiver<String>,
) {
    tracing::info!("remote update listener started");

    while let Some(frame) = frames.recv().await {
        match PushEvent::decode(&frame) {
            Ok(PushEvent::OrderUpdated { order }) => {
                apply_update(&state, &highlights, order);
            }
            Ok(PushEvent::OrderCreated { order }) => {
                tracing::debug!(order_id = order.id, "remote creation, re-fetching dataset");
                refresh(&state, api.as_ref()).await;
            }
            Ok(PushEvent::Unknown) => {
                tracing::debug!("ignoring unrecognized push event");
            }
            Err(e) => {
                tracing::warn!(error = %e, "dropping malformed push frame");
            }
        }
    }

    tracing::info!("push channel closed, listener stopping");
}

/// Fold a pushed record into the store and highlight what changed.
///
/// Fields are diffed against the previous canonical record, so an echo of
/// our own committed write (same values, same version) marks nothing. The
/// overlay is deliberately untouched: an open edit keeps shadowing the
/// pushed value for display.
fn apply_update(
    state: &Arc<Mutex<GridState>>,
    highlights: &HighlightScheduler,
    order: Order,
) {
    let order_id = order.id;

    let changed = {
        let mut state = lock_state(state);
        let Some(previous) = state.store.get(order_id) else {
            tracing::warn!(order_id, "push update for unknown order, dropping");
            return;
        };
        let changed = order.changed_fields(previous);
        if let Err(e) = state.store.replace(order) {
            tracing::warn!(order_id, error = %e, "failed to apply push update");
            return;
        }
        changed
    };

    tracing::debug!(order_id, fields = changed.len(), "applied remote update");
    for field in changed {
        highlights.mark(order_id, field);
    }
}

/// Full-refresh policy for creations: re-fetch the list rather than
/// incrementally insert. Creation is rare and the dataset is small.
async fn refresh(state: &Arc<Mutex<GridState>>, api: &dyn OrderApi) {
    match api.list_orders().await {
        Ok(orders) => {
            let count = orders.len();
            lock_state(state).store.reset(orders);
            tracing::info!(count, "dataset refreshed after remote creation");
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to refresh dataset after remote creation");
        }
    }
}
