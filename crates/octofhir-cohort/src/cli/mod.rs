//! CLI functionality for the cohort tool
//!
//! - `compile`: compile a query document into CQL
//! - `check`: load and validate a mapping configuration

pub mod check;
pub mod compile;
pub mod output;
pub mod store;
