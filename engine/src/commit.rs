//! Commit planning - the pure decision step of the commit pipeline.
//!
//! A blur or Enter on an edited cell asks: is there anything to write, and
//! if so, what exactly goes on the wire? The answer is computed here from
//! the store and the overlay alone; actually performing the write (and
//! folding its result back in) is the runtime's job.

use crate::{error::Result, DatasetStore, EditOverlay, Field, Order, OrderId};

/// Outcome of planning a commit for one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitPlan {
    /// Nothing to send: no open edit, or the typed value equals the
    /// canonical one. Zero writes reach the update endpoint on this path.
    Unchanged,
    /// Send this full record to the update endpoint. It is the canonical
    /// record with the one edited field replaced; `version` is the
    /// canonical base version, which the endpoint compares-and-swaps
    /// against so a concurrent write surfaces as a conflict instead of
    /// being silently lost.
    Write(Order),
}

/// Plan the commit of one cell's pending edit.
///
/// Errors: [`crate::Error::UnknownOrder`] if the id is not in the store,
/// [`crate::Error::InvalidValue`] if the typed text does not parse as the
/// field's type.
pub fn plan(
    store: &DatasetStore,
    overlay: &EditOverlay,
    id: OrderId,
    field: Field,
) -> Result<CommitPlan> {
    let canonical = store
        .get(id)
        .ok_or(crate::Error::UnknownOrder(id))?;

    let Some(text) = overlay.get(id, field) else {
        return Ok(CommitPlan::Unchanged);
    };

    let value = field.parse_input(text)?;
    if value == canonical.field(field) {
        return Ok(CommitPlan::Unchanged);
    }

    Ok(CommitPlan::Write(canonical.with_field(field, value)?))
}
