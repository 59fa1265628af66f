//! Query-to-CQL compiler
//!
//! Turns a [`QueryDto`](octofhir_cohort_query::QueryDto) into CQL library
//! text, driven entirely by a read-only
//! [`MappingStore`](octofhir_cohort_mapping::MappingStore):
//!
//! - [`resolver`] renders one value condition (atomic expression)
//! - [`values`] OR-joins the conditions of a field
//! - [`path`] scopes that value set with the field's path template
//! - [`predicate`] AND-joins all fields of a query
//! - [`codesystems`] collects sorted `codesystem` definitions
//! - [`singletons`] and [`stratifiers`] emit the auxiliary definitions
//! - [`compiler`] assembles the final library
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use octofhir_cohort_compiler::Compiler;
//! use octofhir_cohort_mapping::bbmri_store;
//!
//! let compiler = Compiler::new(Arc::new(bbmri_store()));
//! let library = compiler.compile(&query, "Patient");
//! ```
//!
//! Missing mappings never fail a compilation. They are logged at `warn` and
//! recorded as diagnostics on the returned [`Compilation`].

pub mod codesystems;
pub mod compiler;
pub mod path;
pub mod predicate;
pub mod resolver;
pub mod singletons;
pub mod stratifiers;
pub mod values;

pub use codesystems::collect_definitions;
pub use compiler::{CompileOptions, Compilation, Compiler, INITIAL_POPULATION};
pub use path::compose_path;
pub use predicate::compose_predicate;
pub use resolver::{operator_symbol, resolve_atomic};
pub use singletons::collect_singletons;
pub use stratifiers::{stratifier_codesystems, stratifiers};
pub use values::compose_values;
