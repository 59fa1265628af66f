//! Cohort compiler diagnostics and error handling
//!
//! This crate provides the error handling infrastructure shared by the mapping
//! store and the query compiler: structured error codes, diagnostics, and a
//! per-call collector that records and logs non-fatal problems.

mod bag;
mod error;
mod error_code;

pub use bag::*;
pub use error::*;
pub use error_code::*;

/// Result type for cohort operations
pub type Result<T> = std::result::Result<T, CohortError>;
