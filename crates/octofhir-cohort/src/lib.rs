//! Cohort query compiler
//!
//! Compiles the structured search criteria of a sample locator portal into
//! CQL library text, driven by a mapping configuration:
//! - [`query`]: the search criteria model
//! - [`mapping`]: the mapping store and its XML/JSON configuration
//! - [`compiler`]: predicate composition and library assembly
//! - [`diagnostics`]: error codes and per-compilation diagnostics
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use octofhir_cohort::{Compiler, QueryDto, bbmri_store};
//!
//! let compiler = Compiler::new(Arc::new(bbmri_store()));
//! let query = QueryDto::from_json(json)?;
//! let library = compiler.compile(&query, "Patient");
//! ```

// Re-export all public APIs from internal crates
pub use octofhir_cohort_compiler as compiler;
pub use octofhir_cohort_diagnostics as diagnostics;
pub use octofhir_cohort_mapping as mapping;
pub use octofhir_cohort_query as query;

// Convenience re-exports
pub use octofhir_cohort_compiler::{CompileOptions, Compilation, Compiler};
pub use octofhir_cohort_diagnostics::{CohortError, Diagnostic, Result, Severity};
pub use octofhir_cohort_mapping::{CodeSystem, MappingStore, bbmri_store};
pub use octofhir_cohort_query::{Field, FieldCategory, QueryDto, ValueCondition, ValueType};

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
