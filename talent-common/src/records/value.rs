//! Candidate record values
//!
//! Every cell loaded from the spreadsheet is text. Values arriving from JSON
//! keep integers and numbers so CTC fields can be persisted as numeric cells.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One candidate: field name to value
pub type CandidateRecord = BTreeMap<String, FieldValue>;

/// A single field value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Number(f64),
}

impl FieldValue {
    /// Empty text, the value of every absent field
    pub fn empty() -> Self {
        FieldValue::Text(String::new())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.is_empty())
    }

    /// Render as cell text
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Number(n) => format_number(*n),
        }
    }

    /// Integer coercion for CTC fields
    ///
    /// Integers pass through, numbers truncate toward zero, text converts
    /// when it parses as an integer after trimming. Anything else is
    /// returned unchanged.
    pub fn coerce_integer(self) -> Self {
        match self {
            FieldValue::Integer(_) => self,
            FieldValue::Number(n) if n.is_finite() && n.abs() < i64::MAX as f64 => {
                FieldValue::Integer(n.trunc() as i64)
            }
            FieldValue::Text(s) => match s.trim().parse::<i64>() {
                Ok(i) => FieldValue::Integer(i),
                Err(_) => FieldValue::Text(s),
            },
            other => other,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::String(s) => FieldValue::Text(s),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => FieldValue::Number(n.as_f64().unwrap_or(0.0)),
            },
            Value::Bool(b) => FieldValue::Text(b.to_string()),
            Value::Null => FieldValue::empty(),
            nested => FieldValue::Text(nested.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(FieldValue::from)
    }
}

/// Integral floats render without a fractional part ("120000", not "120000.0")
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
