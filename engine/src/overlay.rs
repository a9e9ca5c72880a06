//! Edit overlay - locally typed, uncommitted values.
//!
//! Keystrokes mutate the overlay only; the canonical dataset is untouched
//! until a commit succeeds. For display, an overlay entry always shadows
//! the canonical value of the same cell, which is what keeps a remote
//! update from clobbering an in-progress edit.

use crate::{DatasetStore, Field, FieldValue, OrderId};
use std::collections::HashMap;
use std::fmt;

/// The precedence-resolved value of one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellView {
    /// An overlay entry exists: the user's raw, uncommitted text.
    Pending(String),
    /// No overlay entry: the value the server last confirmed.
    Canonical(FieldValue),
}

impl fmt::Display for CellView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellView::Pending(text) => f.write_str(text),
            CellView::Canonical(value) => value.fmt(f),
        }
    }
}

/// Per-record, per-field map of pending edits.
///
/// Entries for different fields of the same record, or the same field
/// across records, are fully independent; there is no record-level
/// locking. An entry exists only while the user is actively editing that
/// cell and is removed when the edit is committed or abandoned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditOverlay {
    entries: HashMap<(OrderId, Field), String>,
}

impl EditOverlay {
    /// Create an empty overlay.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Record a keystroke: unconditional overwrite, no validation.
    pub fn set(&mut self, id: OrderId, field: Field, text: impl Into<String>) {
        self.entries.insert((id, field), text.into());
    }

    /// The pending text for a cell, if the user is editing it.
    pub fn get(&self, id: OrderId, field: Field) -> Option<&str> {
        self.entries.get(&(id, field)).map(String::as_str)
    }

    /// Drop a cell's pending edit (after a successful or abandoned commit).
    pub fn clear(&mut self, id: OrderId, field: Field) {
        self.entries.remove(&(id, field));
    }

    /// Whether the user has an open edit on this cell.
    pub fn is_editing(&self, id: OrderId, field: Field) -> bool {
        self.entries.contains_key(&(id, field))
    }

    /// Resolve the field precedence invariant for one cell:
    /// overlay if present, else canonical. `None` only when the id is
    /// unknown to the store and no overlay entry exists.
    pub fn peek(&self, store: &DatasetStore, id: OrderId, field: Field) -> Option<CellView> {
        if let Some(text) = self.get(id, field) {
            return Some(CellView::Pending(text.to_string()));
        }
        store.get(id).map(|order| CellView::Canonical(order.field(field)))
    }

    /// Number of open edits.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no edits are open.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Order;

    fn store_with_one() -> DatasetStore {
        let mut store = DatasetStore::new();
        store.reset(vec![Order::new(1, "Alice", "Widget", 2, 10.0)]);
        store
    }

    #[test]
    fn set_overwrites_per_keystroke() {
        let mut overlay = EditOverlay::new();
        overlay.set(1, Field::Quantity, "5");
        overlay.set(1, Field::Quantity, "55");

        assert_eq!(overlay.get(1, Field::Quantity), Some("55"));
        assert_eq!(overlay.len(), 1);
    }

    #[test]
    fn cells_are_independent() {
        let mut overlay = EditOverlay::new();
        overlay.set(1, Field::Quantity, "5");
        overlay.set(1, Field::Item, "Gizmo");
        overlay.set(2, Field::Quantity, "8");

        assert_eq!(overlay.len(), 3);
        overlay.clear(1, Field::Quantity);
        assert_eq!(overlay.get(1, Field::Item), Some("Gizmo"));
        assert_eq!(overlay.get(2, Field::Quantity), Some("8"));
        assert!(!overlay.is_editing(1, Field::Quantity));
    }

    #[test]
    fn peek_prefers_overlay() {
        let store = store_with_one();
        let mut overlay = EditOverlay::new();

        assert_eq!(
            overlay.peek(&store, 1, Field::Quantity),
            Some(CellView::Canonical(FieldValue::Count(2)))
        );

        overlay.set(1, Field::Quantity, "5");
        assert_eq!(
            overlay.peek(&store, 1, Field::Quantity),
            Some(CellView::Pending("5".into()))
        );
    }

    #[test]
    fn peek_overlay_survives_canonical_change() {
        let mut store = store_with_one();
        let mut overlay = EditOverlay::new();
        overlay.set(1, Field::Item, "Gizmo (draft)");

        // Remote update replaces the record underneath the open edit.
        let mut pushed = store.get(1).unwrap().clone();
        pushed.item = "Widget Mk2".into();
        pushed.price = 20.0;
        pushed.version = 2;
        store.replace(pushed).unwrap();

        // Overlay still wins on the edited cell; the rest shows canonical.
        assert_eq!(
            overlay.peek(&store, 1, Field::Item),
            Some(CellView::Pending("Gizmo (draft)".into()))
        );
        assert_eq!(
            overlay.peek(&store, 1, Field::Price),
            Some(CellView::Canonical(FieldValue::Amount(20.0)))
        );
    }

    #[test]
    fn peek_unknown_order() {
        let store = store_with_one();
        let mut overlay = EditOverlay::new();

        assert_eq!(overlay.peek(&store, 99, Field::Item), None);

        // An overlay entry still displays even if the store lost the id.
        overlay.set(99, Field::Item, "ghost");
        assert_eq!(
            overlay.peek(&store, 99, Field::Item),
            Some(CellView::Pending("ghost".into()))
        );
    }

    #[test]
    fn cell_view_display() {
        assert_eq!(CellView::Pending("5".into()).to_string(), "5");
        assert_eq!(
            CellView::Canonical(FieldValue::Amount(19.99)).to_string(),
            "19.99"
        );
        assert_eq!(
            CellView::Canonical(FieldValue::Text("Alice".into())).to_string(),
            "Alice"
        );
    }
}
