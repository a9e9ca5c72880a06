//! Orderly Grid - the async runtime around the cell-edit sync core.
//!
//! This crate wires the pure [`orderly_engine`] logic to the outside world:
//! the order API over HTTP, the push channel's JSON frames, and the
//! wall-clock timers behind the "recently changed" highlight. One
//! [`GridView`] instance owns one grid's state for its whole lifecycle -
//! constructed with the view, torn down with it.
//!
//! Event sources and how they flow:
//!
//! - **User input**: [`GridView::edit`] per keystroke (overlay only),
//!   [`GridView::commit`] on blur/Enter (write-through, then fold the
//!   confirmed record into the store and highlight the field).
//! - **Push channel**: [`GridView::attach_push_channel`] spawns the remote
//!   update listener, which applies `order_updated` frames to the store,
//!   highlights the fields that actually changed, and re-fetches the list
//!   on `order_created`. A malformed frame is logged and dropped; the
//!   subscription keeps running.
//! - **Timers**: the [`HighlightScheduler`] expires each highlight after a
//!   fixed TTL, superseding (never stacking) timers on re-marked cells.

pub mod api;
pub mod config;
pub mod error;
pub mod highlight;
pub mod listener;
pub mod view;

pub use api::{HttpOrderApi, OrderApi};
pub use config::{ConfigError, GridConfig, DEFAULT_HIGHLIGHT_TTL};
pub use error::{ApiError, GridError, Result};
pub use highlight::HighlightScheduler;
pub use view::{CommitOutcome, GridView};
