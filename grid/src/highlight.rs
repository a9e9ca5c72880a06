//! Highlight scheduler - self-expiring "recently changed" flags.
//!
//! Each `(order id, field)` key carries at most one pending expiry. A
//! re-mark before expiry cancels the earlier timer and buys a full fresh
//! TTL; without the cancel, the earlier timer would fire early and clear a
//! freshly-marked flag. Expiry is timer-driven, never polled, and keys
//! expire independently.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use orderly_engine::{Field, OrderId};
use tokio::task::JoinHandle;

type CellKey = (OrderId, Field);

#[derive(Debug)]
struct CellHighlight {
    /// Bumped on every re-mark; an expiry only clears the flag if its
    /// generation still matches, so a stale timer that slipped past its
    /// abort cannot clear a re-marked cell.
    generation: u64,
    timer: JoinHandle<()>,
}

/// Per-cell highlight flags with automatic time-bounded expiry.
///
/// Shared across the commit pipeline and the remote update listener via
/// `Arc`. [`HighlightScheduler::mark`] spawns its expiry timer on the
/// current tokio runtime.
#[derive(Debug)]
pub struct HighlightScheduler {
    ttl: Duration,
    cells: Arc<DashMap<CellKey, CellHighlight>>,
}

impl HighlightScheduler {
    /// Create a scheduler with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            cells: Arc::new(DashMap::new()),
        }
    }

    /// The configured TTL.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Flag a cell as recently changed and (re)start its expiry timer.
    pub fn mark(&self, id: OrderId, field: Field) {
        let key = (id, field);

        let generation = match self.cells.remove(&key) {
            Some((_, previous)) => {
                previous.timer.abort();
                previous.generation.wrapping_add(1)
            }
            None => 0,
        };

        let cells = Arc::clone(&self.cells);
        // Anchor the deadline at mark time; `sleep(ttl)` inside the task
        // would anchor it at the task's first poll instead.
        let deadline = tokio::time::Instant::now() + self.ttl;
        let timer = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            cells.remove_if(&key, |_, cell| cell.generation == generation);
        });

        self.cells.insert(key, CellHighlight { generation, timer });
        tracing::debug!(order_id = id, field = %field, "highlight marked");
    }

    /// Whether a cell is currently flagged.
    pub fn is_active(&self, id: OrderId, field: Field) -> bool {
        self.cells.contains_key(&(id, field))
    }

    /// Number of currently flagged cells.
    pub fn active_count(&self) -> usize {
        self.cells.len()
    }

    /// Cancel every pending expiry and clear all flags (view teardown).
    pub fn shutdown(&self) {
        self.cells.retain(|_, cell| {
            cell.timer.abort();
            false
        });
    }
}

impl Drop for HighlightScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
