// SPDX-License-Identifier: MIT

//! Condition evaluation for rule table cells
//!
//! Each input cell holds one operator-prefixed condition such as:
//! - `=true`
//! - `>=18`
//! - `!=REJECTED`
//!
//! Evaluation is total: a condition that cannot be parsed, or whose operand
//! does not fit the observed value, is simply not satisfied.

mod ast;
mod evaluator;
mod parser;

pub use ast::{CompareOp, Condition, Literal};
pub use evaluator::{check, evaluate, evaluate_expr};
pub use parser::parse;
