//! Unified error handling for the grid runtime.

use orderly_engine::OrderId;

/// Errors from the order API boundary.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    /// The update endpoint rejected a write whose base version was stale:
    /// another commit landed on the record first. The caller keeps the
    /// overlay so the user's input is not lost.
    #[error("version conflict on order {id}: record changed since it was read")]
    VersionConflict { id: OrderId },

    #[error("order not found: {0}")]
    NotFound(OrderId),

    #[error("unexpected response ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Application error type for grid operations.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("engine error: {0}")]
    Engine(#[from] orderly_engine::Error),

    #[error("api error: {0}")]
    Api(#[from] ApiError),
}

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
