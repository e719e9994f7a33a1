//! Run-scoped environment store

mod variable;

pub use variable::{Environment, Variable, VariableMap};
