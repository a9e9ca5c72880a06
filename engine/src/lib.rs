//! # Orderly Engine
//!
//! The deterministic core of Orderly's optimistic cell-edit synchronization.
//!
//! This crate decides, for every cell of an order grid, which value is
//! authoritative at any instant: the value the server last confirmed, or the
//! value the user is typing right now. It has no IO and no timers - the same
//! inputs always produce the same outputs, so the whole reconciliation logic
//! is testable without mocks.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine has no knowledge of HTTP, sockets, or clocks
//! - **Deterministic**: same inputs always produce same outputs
//! - **Overlay wins**: a remote update never clobbers an in-progress edit
//!
//! ## Core Concepts
//!
//! ### Dataset Store
//!
//! The [`DatasetStore`] is the single source of truth for what the server
//! last confirmed. It holds [`Order`] records in display order and supports
//! exactly two mutations: a whole-dataset [`DatasetStore::reset`] and a
//! whole-record [`DatasetStore::replace`].
//!
//! ### Edit Overlay
//!
//! The [`EditOverlay`] layers locally-typed-but-uncommitted text over the
//! store, keyed by `(order id, field)`. For rendering, the precedence
//! invariant is:
//!
//! ```text
//! displayed(id, field) = overlay(id, field) if present
//!                        else canonical(id, field)
//! ```
//!
//! [`EditOverlay::peek`] resolves that invariant into a [`CellView`].
//!
//! ### Commit Planning
//!
//! [`commit::plan`] turns a finished edit into a [`CommitPlan`]: either
//! `Unchanged` (the typed value equals the canonical one, nothing to send)
//! or `Write` carrying the full record with the one field replaced and the
//! canonical version as a compare-and-swap stamp.
//!
//! ### Push Events
//!
//! [`PushEvent::decode`] parses the JSON frames delivered over the push
//! channel (`order_created`, `order_updated`); unrecognized event names
//! decode to [`PushEvent::Unknown`] so they can be ignored without tearing
//! down the subscription.
//!
//! ## Quick Start
//!
//! ```rust
//! use orderly_engine::{commit, CommitPlan, DatasetStore, EditOverlay, Field, Order};
//!
//! let mut store = DatasetStore::new();
//! store.reset(vec![Order::new(1, "A", "X", 2, 10.0)]);
//!
//! // Keystrokes land in the overlay only.
//! let mut overlay = EditOverlay::new();
//! overlay.set(1, Field::Quantity, "5");
//!
//! // On blur/Enter, plan the commit.
//! let plan = commit::plan(&store, &overlay, 1, Field::Quantity).unwrap();
//! let updated = match plan {
//!     CommitPlan::Write(order) => order,
//!     CommitPlan::Unchanged => unreachable!(),
//! };
//! assert_eq!(updated.quantity, 5);
//!
//! // After the server confirms the write:
//! store.replace(updated).unwrap();
//! overlay.clear(1, Field::Quantity);
//! ```

pub mod commit;
pub mod error;
pub mod event;
pub mod order;
pub mod overlay;
pub mod store;

// Re-export main types at crate root
pub use commit::CommitPlan;
pub use error::Error;
pub use event::PushEvent;
pub use order::{Field, FieldValue, NewOrder, Order};
pub use overlay::{CellView, EditOverlay};
pub use store::DatasetStore;

/// Type aliases for clarity
pub type OrderId = u64;
pub type Version = u64;
