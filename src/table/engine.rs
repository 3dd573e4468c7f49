// SPDX-License-Identifier: MIT

//! First-match-wins evaluation of a rule table against a context

use serde::Serialize;

use super::context::{DataHolder, Value};
use super::rule::{Rule, RuleTable};

/// Result of a traced evaluation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Evaluation {
    /// Index of the rule that fired, if any
    pub rule_index: Option<usize>,
    /// Assignments applied to the context, in output column order
    pub assignments: Vec<(String, Value)>,
}

impl Evaluation {
    pub fn matched(&self) -> bool {
        self.rule_index.is_some()
    }
}

/// First rule whose conditions all hold, with its index, without touching the context
pub fn first_match<'t, D: DataHolder + ?Sized>(
    table: &'t RuleTable,
    ctx: &D,
) -> Option<(usize, &'t Rule)> {
    for (index, rule) in table.iter().enumerate() {
        if rule.matches(ctx) {
            log::debug!("Rule {} matched", index);
            return Some((index, rule));
        }
        log::debug!("Rule {} skipped", index);
    }
    None
}

/// Apply the first matching rule's outputs to `ctx`.
///
/// Returns `true` if a rule fired. Later rules are never examined once one
/// matches, and the context is left untouched when none does.
pub fn evaluate<D: DataHolder + ?Sized>(table: &RuleTable, ctx: &mut D) -> bool {
    evaluate_traced(table, ctx).matched()
}

/// Same as [`evaluate`], also reporting which rule fired and what it assigned
pub fn evaluate_traced<D: DataHolder + ?Sized>(table: &RuleTable, ctx: &mut D) -> Evaluation {
    let Some((index, rule)) = first_match(table, &*ctx) else {
        log::debug!(
            "No rule matched in table '{}'",
            table.name().unwrap_or("<unnamed>")
        );
        return Evaluation::default();
    };

    let mut assignments = Vec::with_capacity(rule.outputs().len());
    for (column, literal) in rule.outputs() {
        let value = Value::String(literal.clone());
        ctx.set(column, value.clone());
        assignments.push((column.clone(), value));
    }

    Evaluation {
        rule_index: Some(index),
        assignments,
    }
}
