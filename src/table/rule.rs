// SPDX-License-Identifier: MIT

//! Rule and rule table definitions

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::condition;
use super::context::DataHolder;

/// One row of a decision table.
///
/// `inputs` maps a column to its condition cell; columns left empty in the
/// source are absent and never constrain the match. `outputs` maps a column to
/// the literal assigned when the rule fires, in source column order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Rule {
    #[serde(default)]
    inputs: IndexMap<String, String>,
    #[serde(default)]
    outputs: IndexMap<String, String>,
}

impl Rule {
    pub fn new(inputs: IndexMap<String, String>, outputs: IndexMap<String, String>) -> Self {
        Self { inputs, outputs }
    }

    /// Condition cells keyed by input column
    pub fn inputs(&self) -> &IndexMap<String, String> {
        &self.inputs
    }

    /// Output literals keyed by output column
    pub fn outputs(&self) -> &IndexMap<String, String> {
        &self.outputs
    }

    /// A rule without conditions matches any context
    pub fn is_catch_all(&self) -> bool {
        self.inputs.is_empty()
    }

    /// True iff every input condition holds against `ctx`
    pub fn matches<D: DataHolder + ?Sized>(&self, ctx: &D) -> bool {
        self.inputs
            .iter()
            .all(|(column, expr)| condition::check(column, expr, ctx))
    }
}

/// Ordered, read-only sequence of rules.
///
/// Order is the source order and decides which rule wins when several match.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RuleTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Create a table, keeping rules in the given order
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            name: None,
            description: None,
            rules,
        }
    }

    /// Create a table from (inputs, outputs) pairs
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (IndexMap<String, String>, IndexMap<String, String>)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(inputs, outputs)| Rule::new(inputs, outputs))
                .collect(),
        )
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Iterate rules in table order
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::context::{DecisionContext, Value};

    fn map(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_catch_all_matches_anything() {
        let rule = Rule::new(IndexMap::new(), map(&[("status", "default")]));
        assert!(rule.is_catch_all());
        assert!(rule.matches(&DecisionContext::new()));
    }

    #[test]
    fn test_all_inputs_must_hold() {
        let rule = Rule::new(
            map(&[("age", ">=18"), ("member", "=true")]),
            map(&[("discount", "10")]),
        );

        let both: DecisionContext = vec![("age", Value::from(30)), ("member", Value::from(true))]
            .into_iter()
            .collect();
        let one: DecisionContext = vec![("age", Value::from(30)), ("member", Value::from(false))]
            .into_iter()
            .collect();
        let missing: DecisionContext = vec![("age", Value::from(30))].into_iter().collect();

        assert!(rule.matches(&both));
        assert!(!rule.matches(&one));
        assert!(!rule.matches(&missing));
    }

    #[test]
    fn test_malformed_condition_never_matches() {
        let rule = Rule::new(map(&[("age", "eighteen")]), map(&[("x", "y")]));
        let ctx: DecisionContext = vec![("age", Value::from("eighteen"))].into_iter().collect();
        assert!(!rule.matches(&ctx));
    }

    #[test]
    fn test_table_preserves_order() {
        let table = RuleTable::from_pairs(vec![
            (map(&[("a", "=1")]), map(&[("out", "first")])),
            (map(&[("a", "=2")]), map(&[("out", "second")])),
            (IndexMap::new(), map(&[("out", "third")])),
        ]);

        let outs: Vec<&str> = table
            .iter()
            .map(|r| r.outputs()["out"].as_str())
            .collect();
        assert_eq!(outs, vec!["first", "second", "third"]);
        assert_eq!(table.len(), 3);
        assert!(table.get(3).is_none());
    }

    #[test]
    fn test_output_column_order_kept() {
        let rule = Rule::new(IndexMap::new(), map(&[("z", "1"), ("a", "2"), ("m", "3")]));
        let keys: Vec<&String> = rule.outputs().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_metadata() {
        let table = RuleTable::default()
            .with_name("pricing")
            .with_description("Discount tiers");
        assert_eq!(table.name(), Some("pricing"));
        assert_eq!(table.description(), Some("Discount tiers"));
        assert!(table.is_empty());
    }

    #[test]
    fn test_serialize_shape() {
        let table = RuleTable::new(vec![Rule::new(
            map(&[("age", ">=18")]),
            map(&[("status", "adult")]),
        )])
        .with_name("age");

        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["name"], "age");
        assert_eq!(json["rules"][0]["inputs"]["age"], ">=18");
        assert_eq!(json["rules"][0]["outputs"]["status"], "adult");
        assert!(json.get("description").is_none());
    }
}
