// SPDX-License-Identifier: MIT

pub mod condition;
pub mod context;
pub mod engine;
pub mod loader;
pub mod registry;
pub mod rule;

pub use context::{DataHolder, DecisionContext, Value};
pub use engine::{evaluate, evaluate_traced, first_match, Evaluation};
pub use loader::TableLoader;
pub use registry::TableRegistry;
pub use rule::{Rule, RuleTable};
