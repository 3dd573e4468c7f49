// SPDX-License-Identifier: MIT

//! Condition evaluator

use super::ast::{CompareOp, Condition, Literal};
use super::parser::parse;
use crate::table::context::{DataHolder, Value};

/// Evaluate a parsed condition against an observed value
pub fn evaluate(cond: &Condition, observed: &Value) -> bool {
    match cond.op {
        CompareOp::Eq => values_equal(observed, &cond.operand, &cond.raw),
        CompareOp::NotEq => !values_equal(observed, &cond.operand, &cond.raw),
        CompareOp::Gt => compare_numbers(observed, &cond.operand, |a, b| a > b),
        CompareOp::Gte => compare_numbers(observed, &cond.operand, |a, b| a >= b),
        CompareOp::Lt => compare_numbers(observed, &cond.operand, |a, b| a < b),
        CompareOp::Lte => compare_numbers(observed, &cond.operand, |a, b| a <= b),
    }
}

/// Parse and evaluate a condition cell; unparsable cells are not satisfied
pub fn evaluate_expr(expr: &str, observed: &Value) -> bool {
    match parse(expr) {
        Ok(cond) => evaluate(&cond, observed),
        Err(e) => {
            log::debug!("Treating condition as unmet: {}", e);
            false
        }
    }
}

/// Evaluate the condition for `column` against a context.
///
/// A column the context does not hold never satisfies a condition, whatever
/// the operator.
pub fn check<D: DataHolder + ?Sized>(column: &str, expr: &str, ctx: &D) -> bool {
    if !ctx.contains(column) {
        log::trace!("Column '{}' missing from context", column);
        return false;
    }
    match ctx.get(column) {
        Some(observed) => {
            let verdict = evaluate_expr(expr, observed);
            log::trace!("{} {} against {:?} -> {}", column, expr, observed, verdict);
            verdict
        }
        None => false,
    }
}

// `!=` is the exact negation of this, branch by branch.
fn values_equal(observed: &Value, operand: &Literal, raw: &str) -> bool {
    match operand {
        // Identity on the boolean tag: the number 1 or the text "true" do not match.
        Literal::Boolean(expected) => observed.as_bool() == Some(*expected),
        Literal::Number(expected) => match observed.as_number() {
            Some(actual) => actual == *expected,
            None => observed.to_string() == raw,
        },
        Literal::Text(_) => observed.to_string() == raw,
    }
}

fn compare_numbers<F>(observed: &Value, operand: &Literal, cmp: F) -> bool
where
    F: Fn(f64, f64) -> bool,
{
    match (observed.as_number(), operand) {
        (Some(actual), Literal::Number(threshold)) => cmp(actual, *threshold),
        _ => false,
    }
}
