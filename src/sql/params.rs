//! Typed column values bound as statement parameters.

use rust_decimal::Decimal;
use serde_json::Value;

/// One bindable value. The variant fixes the PostgreSQL type the parameter is sent as,
/// so a NULL still carries its column type.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Id(Option<i64>),
    Text(Option<String>),
    Money(Option<Decimal>),
}

/// Column name / value pairs for an INSERT or UPDATE, in column order.
pub type Changes = Vec<(&'static str, FieldValue)>;

impl FieldValue {
    pub fn is_null(&self) -> bool {
        match self {
            FieldValue::Id(v) => v.is_none(),
            FieldValue::Text(v) => v.is_none(),
            FieldValue::Money(v) => v.is_none(),
        }
    }

    /// Absent, null, an empty string, or zero. None of these counts as a supplied PATCH value.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(Some(s)) => s.is_empty(),
            FieldValue::Id(Some(n)) => *n == 0,
            FieldValue::Money(Some(d)) => d.is_zero(),
            other => other.is_null(),
        }
    }

    /// JSON form used in records. Money is rendered as a decimal string so no precision is lost.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Id(Some(n)) => Value::Number((*n).into()),
            FieldValue::Text(Some(s)) => Value::String(s.clone()),
            FieldValue::Money(Some(d)) => Value::String(d.to_string()),
            _ => Value::Null,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Id(Some(v))
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(Some(v))
    }
}

impl From<Decimal> for FieldValue {
    fn from(v: Decimal) -> Self {
        FieldValue::Money(Some(v))
    }
}
