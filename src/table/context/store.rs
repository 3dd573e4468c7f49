// SPDX-License-Identifier: MIT

//! Key/value storage consulted and updated during evaluation

use std::collections::HashMap;

use super::value::Value;
use crate::error::ContextError;

/// Lookup and assignment operations the engine needs from a context.
///
/// The engine only reads through `contains`/`get` and only writes through
/// `set`, and only for the outputs of the rule that matched.
pub trait DataHolder {
    /// Get the value stored under `key`
    fn get(&self, key: &str) -> Option<&Value>;

    /// Insert or overwrite `key`
    fn set(&mut self, key: &str, value: Value);

    /// True iff `key` has a value
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl DataHolder for HashMap<String, Value> {
    fn get(&self, key: &str) -> Option<&Value> {
        HashMap::get(self, key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.insert(key.to_string(), value);
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

/// Hash-map backed decision context
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecisionContext {
    fields: HashMap<String, Value>,
}

impl DecisionContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from a JSON object of scalars
    pub fn from_json(json: &serde_json::Value) -> Result<Self, ContextError> {
        let object = json.as_object().ok_or(ContextError::NotAnObject)?;
        let mut fields = HashMap::with_capacity(object.len());
        for (key, value) in object {
            fields.insert(key.clone(), Value::from_json(key, value)?);
        }
        Ok(Self { fields })
    }

    /// Apply a `key=value` assignment, inferring the value type
    pub fn assign(&mut self, assignment: &str) -> Result<(), ContextError> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| ContextError::InvalidAssignment(assignment.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ContextError::InvalidAssignment(assignment.to_string()));
        }
        self.set(key, Value::infer(value));
        Ok(())
    }

    /// Convert context to JSON object
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl DataHolder for DecisionContext {
    fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.fields.insert(key.to_string(), value);
    }

    fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for DecisionContext {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
