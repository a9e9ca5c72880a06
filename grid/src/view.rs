//! Grid view - the commit pipeline and the facade owning all per-view
//! state.
//!
//! One `GridView` owns one grid's dataset store, edit overlay, highlight
//! scheduler, and (optionally) a remote update listener task. The
//! store/overlay mutex is only ever held for synchronous sections, never
//! across an await: a commit plans its write under the lock, performs the
//! write unlocked, and folds the result back in under the lock again. That
//! is what lets keystrokes in other cells and push-channel updates keep
//! flowing while a commit is in flight.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use orderly_engine::{
    commit, CellView, CommitPlan, DatasetStore, EditOverlay, Field, NewOrder, Order, OrderId,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

use crate::api::OrderApi;
use crate::config::GridConfig;
use crate::error::Result;
use crate::highlight::HighlightScheduler;
use crate::listener;

/// The mutex-guarded pair the engine operates on.
pub(crate) struct GridState {
    pub(crate) store: DatasetStore,
    pub(crate) overlay: EditOverlay,
}

/// Lock the grid state, recovering from a poisoned mutex (no handler
/// leaves the state mid-mutation, so the data is still coherent).
pub(crate) fn lock_state(state: &Arc<Mutex<GridState>>) -> MutexGuard<'_, GridState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// What a commit call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The edited value differed; it was written through and confirmed.
    Committed,
    /// The typed value equaled the canonical one (or no edit was open):
    /// no network call, the overlay entry was dropped.
    Unchanged,
}

/// One grid view instance: canonical data, pending edits, highlights, and
/// the push-channel subscription.
pub struct GridView {
    state: Arc<Mutex<GridState>>,
    highlights: Arc<HighlightScheduler>,
    api: Arc<dyn OrderApi>,
    listener: Option<JoinHandle<()>>,
}

impl GridView {
    /// Create a view over the given API handle.
    pub fn new(api: Arc<dyn OrderApi>, config: &GridConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(GridState {
                store: DatasetStore::new(),
                overlay: EditOverlay::new(),
            })),
            highlights: Arc::new(HighlightScheduler::new(config.highlight_ttl)),
            api,
            listener: None,
        }
    }

    /// Create a view backed by the HTTP adapter from configuration.
    pub fn connect(config: &GridConfig) -> Self {
        let api = Arc::new(crate::api::HttpOrderApi::from_config(config));
        Self::new(api, config)
    }

    /// Initial load: fetch the full list and reset the dataset.
    ///
    /// Returns the number of orders loaded.
    pub async fn load(&self) -> Result<usize> {
        let orders = self.api.list_orders().await?;
        let count = orders.len();
        lock_state(&self.state).store.reset(orders);
        tracing::info!(count, "dataset loaded");
        Ok(count)
    }

    /// A keystroke in a cell: overwrite the overlay entry, nothing else.
    pub fn edit(&self, id: OrderId, field: Field, text: impl Into<String>) {
        lock_state(&self.state).overlay.set(id, field, text);
    }

    /// Blur/Enter on a cell: commit its pending edit.
    ///
    /// - Value unchanged (or no edit open): no network call; the overlay
    ///   entry is dropped so the cell reverts to the canonical display.
    /// - Value changed: the full record (one field replaced, canonical
    ///   base version as CAS stamp) goes to the update endpoint. On
    ///   success the confirmed record replaces the canonical one, the
    ///   overlay entry is cleared, and the field is highlighted.
    /// - On failure the overlay entry is retained so the user's input is
    ///   not lost, the canonical record is untouched, the highlight is not
    ///   set, and the error is returned. No automatic retry.
    pub async fn commit(&self, id: OrderId, field: Field) -> Result<CommitOutcome> {
        let plan = {
            let state = lock_state(&self.state);
            commit::plan(&state.store, &state.overlay, id, field)?
        };

        let order = match plan {
            CommitPlan::Unchanged => {
                lock_state(&self.state).overlay.clear(id, field);
                return Ok(CommitOutcome::Unchanged);
            }
            CommitPlan::Write(order) => order,
        };

        // Suspension point: the lock is not held here, so other cells stay
        // editable and push frames keep applying while the write is out.
        let confirmed = self.api.update_order(&order).await.map_err(|e| {
            tracing::warn!(order_id = id, field = %field, error = %e, "commit failed");
            e
        })?;

        {
            let mut state = lock_state(&self.state);
            state.store.replace(confirmed)?;
            state.overlay.clear(id, field);
        }
        self.highlights.mark(id, field);

        tracing::debug!(order_id = id, field = %field, "commit confirmed");
        Ok(CommitOutcome::Committed)
    }

    /// Create an order through the create endpoint.
    ///
    /// The dataset is not touched here: the server's `order_created` push
    /// event drives the re-fetch, for this client like any other.
    pub async fn create(&self, draft: NewOrder) -> Result<Order> {
        let order = self.api.create_order(draft).await?;
        tracing::info!(order_id = order.id, "order created");
        Ok(order)
    }

    /// Subscribe to push-channel frames, replacing any prior subscription.
    pub fn attach_push_channel(&mut self, frames: UnboundedReceiver<String>) {
        if let Some(previous) = self.listener.take() {
            previous.abort();
        }
        self.listener = Some(tokio::spawn(listener::run(
            Arc::clone(&self.state),
            Arc::clone(&self.highlights),
            Arc::clone(&self.api),
            frames,
        )));
    }

    /// Precedence-resolved value of one cell, for the renderer.
    pub fn displayed(&self, id: OrderId, field: Field) -> Option<CellView> {
        let state = lock_state(&self.state);
        state.overlay.peek(&state.store, id, field)
    }

    /// Whether the user has an open edit on this cell.
    pub fn is_editing(&self, id: OrderId, field: Field) -> bool {
        lock_state(&self.state).overlay.is_editing(id, field)
    }

    /// Whether a cell is currently flagged as recently changed.
    pub fn is_highlighted(&self, id: OrderId, field: Field) -> bool {
        self.highlights.is_active(id, field)
    }

    /// Snapshot of the canonical dataset in display order.
    pub fn orders(&self) -> Vec<Order> {
        lock_state(&self.state).store.all().to_vec()
    }

    /// Canonical record by id.
    pub fn order(&self, id: OrderId) -> Option<Order> {
        lock_state(&self.state).store.get(id).cloned()
    }

    /// Stop the listener task and cancel all highlight timers. In-flight
    /// writes are not cancelled; their results are simply dropped with the
    /// view.
    pub fn teardown(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.abort();
            tracing::info!("remote update listener stopped");
        }
        self.highlights.shutdown();
    }
}

impl Drop for GridView {
    fn drop(&mut self) {
        self.teardown();
    }
}
