// SPDX-License-Identifier: MIT

//! Context that rules read inputs from and write outputs to
//!
//! This module provides:
//! - `Value` - the typed scalar held under each column name
//! - `DataHolder` - the lookup/assignment interface the engine needs
//! - `DecisionContext` - a hash-map backed `DataHolder`

mod store;
mod value;

pub use store::{DataHolder, DecisionContext};
pub use value::Value;
