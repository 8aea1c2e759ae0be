//! Row positions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single position of a fact row: an opaque element id or a scalar value.
///
/// Terms are compared by exact JSON equality, so `"1"` and `1` are different
/// terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Term(Value);

impl Term {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }

    /// Strings, numbers and booleans. Only scalars can name an element.
    pub fn is_scalar(&self) -> bool {
        matches!(self.0, Value::String(_) | Value::Number(_) | Value::Bool(_))
    }

    /// Compact JSON literal (`"abc"`, `12`, `["x"]`).
    pub fn to_json(&self) -> String {
        self.0.to_string()
    }

    /// Key used for set semantics over terms (`Value` is not `Hash`).
    pub(crate) fn key(&self) -> String {
        self.to_json()
    }
}

impl fmt::Display for Term {
    /// Strings are shown bare, everything else as its JSON literal.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

impl From<Value> for Term {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Self(Value::String(s.to_string()))
    }
}

impl From<String> for Term {
    fn from(s: String) -> Self {
        Self(Value::String(s))
    }
}

impl From<i64> for Term {
    fn from(n: i64) -> Self {
        Self(Value::from(n))
    }
}

impl From<i32> for Term {
    fn from(n: i32) -> Self {
        Self(Value::from(n))
    }
}
