//! Order record and field model.
//!
//! An [`Order`] is the unit the server confirms and the push channel
//! delivers; a [`Field`] names one editable column of it. Commit traffic is
//! always a whole record, so field-granular edits are expressed by
//! projecting one field out ([`Order::field`]) and folding a replacement
//! back in ([`Order::with_field`]).

use crate::{error::Result, Error, OrderId, Version};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The editable columns of the order grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CustomerName,
    Item,
    Quantity,
    Price,
}

impl Field {
    /// All editable fields, in column order.
    pub const ALL: [Field; 4] = [
        Field::CustomerName,
        Field::Item,
        Field::Quantity,
        Field::Price,
    ];

    /// Wire/display name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            Field::CustomerName => "customer_name",
            Field::Item => "item",
            Field::Quantity => "quantity",
            Field::Price => "price",
        }
    }

    /// Parse user-typed text into this field's value type.
    ///
    /// Text fields accept anything verbatim. `Quantity` must parse as a
    /// non-negative integer, `Price` as a non-negative finite number;
    /// numeric input is trimmed first.
    pub fn parse_input(&self, text: &str) -> Result<FieldValue> {
        match self {
            Field::CustomerName | Field::Item => Ok(FieldValue::Text(text.to_string())),
            Field::Quantity => text
                .trim()
                .parse::<u32>()
                .map(FieldValue::Count)
                .map_err(|_| Error::invalid_value(*self, text, "not a non-negative integer")),
            Field::Price => {
                let price: f64 = text
                    .trim()
                    .parse()
                    .map_err(|_| Error::invalid_value(*self, text, "not a number"))?;
                if !price.is_finite() || price < 0.0 {
                    return Err(Error::invalid_value(*self, text, "not a non-negative amount"));
                }
                Ok(FieldValue::Amount(price))
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed field value projected out of an [`Order`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Count(u32),
    Amount(f64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Count(n) => write!(f, "{}", n),
            FieldValue::Amount(a) => write!(f, "{}", a),
        }
    }
}

fn default_is_open() -> bool {
    true
}

/// A single order record, owned by the dataset store.
///
/// Identity is `id`; every other field is mutable. `version` is the
/// server-assigned compare-and-swap stamp: clients echo the version they
/// read, and the update endpoint rejects writes based on a stale one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub item: String,
    pub quantity: u32,
    pub price: f64,
    /// Whether the order is still open. Carried as canonical data; not
    /// editable from the grid.
    #[serde(default = "default_is_open")]
    pub is_open: bool,
    /// Version stamp, assigned by the server and bumped on every accepted
    /// write.
    pub version: Version,
}

impl Order {
    /// Create an order as the server would first confirm it (version 1,
    /// open).
    pub fn new(
        id: OrderId,
        customer_name: impl Into<String>,
        item: impl Into<String>,
        quantity: u32,
        price: f64,
    ) -> Self {
        Self {
            id,
            customer_name: customer_name.into(),
            item: item.into(),
            quantity,
            price,
            is_open: true,
            version: 1,
        }
    }

    /// Project a field's current value.
    pub fn field(&self, field: Field) -> FieldValue {
        match field {
            Field::CustomerName => FieldValue::Text(self.customer_name.clone()),
            Field::Item => FieldValue::Text(self.item.clone()),
            Field::Quantity => FieldValue::Count(self.quantity),
            Field::Price => FieldValue::Amount(self.price),
        }
    }

    /// Copy of this order with one field replaced.
    ///
    /// The value must match the field's type; a mismatch is an
    /// [`Error::InvalidValue`].
    pub fn with_field(&self, field: Field, value: FieldValue) -> Result<Order> {
        let mut order = self.clone();
        match (field, value) {
            (Field::CustomerName, FieldValue::Text(s)) => order.customer_name = s,
            (Field::Item, FieldValue::Text(s)) => order.item = s,
            (Field::Quantity, FieldValue::Count(n)) => order.quantity = n,
            (Field::Price, FieldValue::Amount(a)) => order.price = a,
            (field, value) => {
                return Err(Error::invalid_value(
                    field,
                    value.to_string(),
                    "wrong type for field",
                ))
            }
        }
        Ok(order)
    }

    /// Fields whose values differ between `old` and `self`, in column order.
    pub fn changed_fields(&self, old: &Order) -> Vec<Field> {
        Field::ALL
            .iter()
            .copied()
            .filter(|&f| self.field(f) != old.field(f))
            .collect()
    }
}

/// Body of the create endpoint: an order the server has not yet identified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_name: String,
    pub item: String,
    pub quantity: u32,
    pub price: f64,
    #[serde(default = "default_is_open")]
    pub is_open: bool,
}

impl NewOrder {
    pub fn new(
        customer_name: impl Into<String>,
        item: impl Into<String>,
        quantity: u32,
        price: f64,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            item: item.into(),
            quantity,
            price,
            is_open: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_projection() {
        let order = Order::new(1, "Alice", "Widget", 2, 10.0);

        assert_eq!(
            order.field(Field::CustomerName),
            FieldValue::Text("Alice".into())
        );
        assert_eq!(order.field(Field::Item), FieldValue::Text("Widget".into()));
        assert_eq!(order.field(Field::Quantity), FieldValue::Count(2));
        assert_eq!(order.field(Field::Price), FieldValue::Amount(10.0));
    }

    #[test]
    fn with_field_replaces_exactly_one_field() {
        let order = Order::new(1, "Alice", "Widget", 2, 10.0);
        let updated = order
            .with_field(Field::Quantity, FieldValue::Count(5))
            .unwrap();

        assert_eq!(updated.quantity, 5);
        assert_eq!(updated.customer_name, "Alice");
        assert_eq!(updated.item, "Widget");
        assert_eq!(updated.price, 10.0);
        assert_eq!(updated.version, order.version);
    }

    #[test]
    fn with_field_rejects_type_mismatch() {
        let order = Order::new(1, "Alice", "Widget", 2, 10.0);
        let err = order
            .with_field(Field::Quantity, FieldValue::Text("five".into()))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidValue { .. }));
    }

    #[test]
    fn parse_text_fields_verbatim() {
        assert_eq!(
            Field::CustomerName.parse_input("  Bob  ").unwrap(),
            FieldValue::Text("  Bob  ".into())
        );
        assert_eq!(
            Field::Item.parse_input("").unwrap(),
            FieldValue::Text("".into())
        );
    }

    #[test]
    fn parse_quantity() {
        assert_eq!(
            Field::Quantity.parse_input(" 42 ").unwrap(),
            FieldValue::Count(42)
        );
        assert!(Field::Quantity.parse_input("-1").is_err());
        assert!(Field::Quantity.parse_input("3.5").is_err());
        assert!(Field::Quantity.parse_input("abc").is_err());
        assert!(Field::Quantity.parse_input("").is_err());
    }

    #[test]
    fn parse_price() {
        assert_eq!(
            Field::Price.parse_input("19.99").unwrap(),
            FieldValue::Amount(19.99)
        );
        assert_eq!(
            Field::Price.parse_input(" 0 ").unwrap(),
            FieldValue::Amount(0.0)
        );
        assert!(Field::Price.parse_input("-0.01").is_err());
        assert!(Field::Price.parse_input("NaN").is_err());
        assert!(Field::Price.parse_input("inf").is_err());
        assert!(Field::Price.parse_input("ten").is_err());
    }

    #[test]
    fn changed_fields_diff() {
        let old = Order::new(1, "Alice", "Widget", 2, 10.0);
        let mut new = old.clone();
        new.quantity = 5;
        new.price = 20.0;

        assert_eq!(new.changed_fields(&old), vec![Field::Quantity, Field::Price]);
        assert!(old.changed_fields(&old).is_empty());
    }

    #[test]
    fn serialization_roundtrip() {
        let order = Order::new(7, "Alice", "Widget", 2, 10.5);
        let json = serde_json::to_string(&order).unwrap();
        let parsed: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, parsed);
    }

    #[test]
    fn wire_format_is_snake_case() {
        let order = Order::new(1, "A", "X", 2, 10.0);
        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains("\"customer_name\""));
        assert!(json.contains("\"is_open\""));
        assert!(json.contains("\"version\""));
    }

    #[test]
    fn is_open_defaults_to_true() {
        let json = r#"{"id":1,"customer_name":"A","item":"X","quantity":2,"price":10,"version":1}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert!(order.is_open);
    }

    #[test]
    fn field_wire_names() {
        assert_eq!(Field::CustomerName.to_string(), "customer_name");
        assert_eq!(
            serde_json::to_string(&Field::Quantity).unwrap(),
            "\"quantity\""
        );
        let parsed: Field = serde_json::from_str("\"customer_name\"").unwrap();
        assert_eq!(parsed, Field::CustomerName);
    }
}
