//! Cell values and row records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single cell of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Numeric measurement.
    Number(f64),
    /// Categorical label.
    Category(String),
    /// Missing entry.
    Missing,
}

impl Value {
    /// True for [`Value::Missing`] and for `NaN` numbers.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Number(x) => x.is_nan(),
            Value::Category(_) => false,
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Number(x)
    }
}

impl From<Option<f64>> for Value {
    fn from(x: Option<f64>) -> Self {
        x.map_or(Value::Missing, Value::Number)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Category(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Category(s)
    }
}

/// One row: column name to value.
pub type Record = BTreeMap<String, Value>;
