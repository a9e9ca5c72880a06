//! Error types for the Orderly engine.

use crate::order::Field;
use crate::OrderId;
use thiserror::Error;

/// All possible errors from the Orderly engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("unknown order: {0}")]
    UnknownOrder(OrderId),

    #[error("invalid value for {field}: {value:?} ({reason})")]
    InvalidValue {
        field: Field,
        value: String,
        reason: String,
    },

    #[error("malformed push event: {0}")]
    MalformedEvent(String),
}

impl Error {
    /// Build an [`Error::InvalidValue`] from the offending input.
    pub fn invalid_value(field: Field, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidValue {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::UnknownOrder(7);
        assert_eq!(err.to_string(), "unknown order: 7");

        let err = Error::invalid_value(Field::Quantity, "abc", "not an integer");
        assert_eq!(
            err.to_string(),
            "invalid value for quantity: \"abc\" (not an integer)"
        );

        let err = Error::MalformedEvent("missing field `order`".into());
        assert_eq!(
            err.to_string(),
            "malformed push event: missing field `order`"
        );
    }
}
