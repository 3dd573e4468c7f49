// SPDX-License-Identifier: MIT

//! Typed scalar values stored in a decision context

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ContextError;

/// A value observed in, or assigned to, a context column
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Number(f64),
    String(String),
}

impl Value {
    /// Numeric view of the value, if it has one.
    ///
    /// Strings holding a number (surrounding whitespace allowed) convert,
    /// booleans count as `1` and `0`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
        }
    }

    /// Boolean payload, only for `Value::Boolean`
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Parse a command-line style literal: `true`/`false`, a number, or text
    pub fn infer(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            return Value::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Value::Boolean(false);
        }
        match trimmed.parse::<f64>() {
            Ok(n) if !trimmed.is_empty() => Value::Number(n),
            _ => Value::String(input.to_string()),
        }
    }

    /// Convert a JSON scalar, naming the key in the error for anything else
    pub fn from_json(key: &str, value: &serde_json::Value) -> Result<Self, ContextError> {
        match value {
            serde_json::Value::Bool(b) => Ok(Value::Boolean(*b)),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number).ok_or_else(|| {
                ContextError::UnsupportedValue {
                    key: key.to_string(),
                }
            }),
            serde_json::Value::String(s) => Ok(Value::String(s.clone())),
            _ => Err(ContextError::UnsupportedValue {
                key: key.to_string(),
            }),
        }
    }

    /// Convert to a JSON scalar
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
