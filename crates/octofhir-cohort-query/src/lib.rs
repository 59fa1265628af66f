//! Search criteria model for the cohort query compiler
//!
//! A [`QueryDto`] groups [`Field`]s by subject category (donor, sample,
//! sample context, event). Each field names a domain identifier and carries
//! an ordered list of [`ValueCondition`]s. The compiler only ever reads this
//! model; it is built by the surrounding portal after validation.

mod condition;
mod field;
mod query;
mod value;

pub use condition::*;
pub use field::*;
pub use query::*;
pub use value::*;
