// SPDX-License-Identifier: MIT

//! Data-driven rule evaluation
//!
//! A rule table pairs per-column input conditions with output assignments.
//! Evaluation finds the first rule whose conditions all hold against a
//! context and writes that rule's outputs back into it.
//!
//! ```
//! use decision_rs::table::{evaluate, DataHolder, DecisionContext, TableLoader, Value};
//!
//! let table = TableLoader::parse_csv("age;*;status\n>=18;*;\"adult\"\n").unwrap();
//! let mut ctx: DecisionContext = vec![("age", Value::from(20))].into_iter().collect();
//!
//! assert!(evaluate(&table, &mut ctx));
//! assert_eq!(ctx.get("status"), Some(&Value::from("adult")));
//! ```

pub mod config;
pub mod error;
pub mod server;
pub mod table;
