//! Top-level query compilation
//!
//! A compiled library is laid out as blank-line separated sections:
//!
//! ```text
//! <preamble with codesystem definitions>
//!
//! <singleton statements, if any>
//!
//! define InInitialPopulation:
//!   <predicate>
//!
//! <stratifier statements, if any>
//! ```

use crate::codesystems::collect_definitions;
use crate::predicate::compose_predicate;
use crate::singletons::collect_singletons;
use crate::stratifiers::{stratifier_codesystems, stratifiers};
use octofhir_cohort_diagnostics::{COH0103, Diagnostic, DiagnosticBag, Severity};
use octofhir_cohort_mapping::{CodeSystem, DEFAULT_PREAMBLE, MappingStore, format_template};
use octofhir_cohort_query::{FieldGroup, QueryDto};
use std::sync::Arc;

/// Name of the expression holding the population predicate
pub const INITIAL_POPULATION: &str = "InInitialPopulation";

/// Per-call compilation options
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Coding systems to define even when no field references them
    pub extra_codesystems: Vec<CodeSystem>,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_codesystem(mut self, codesystem: CodeSystem) -> Self {
        self.extra_codesystems.push(codesystem);
        self
    }
}

/// Result of compiling one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    /// Complete library text
    pub library: String,
    /// The population predicate alone
    pub predicate: String,
    /// Everything that was left out of the library, and why
    pub diagnostics: Vec<Diagnostic>,
}

impl Compilation {
    /// Whether any criterion was dropped or any template was unusable
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity <= Severity::Warning)
    }
}

/// Compiles queries against a shared, read-only mapping store.
///
/// Cloning is cheap and every compilation is independent, so one compiler
/// can serve any number of threads.
#[derive(Debug, Clone)]
pub struct Compiler {
    store: Arc<MappingStore>,
}

impl Compiler {
    pub fn new(store: Arc<MappingStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &MappingStore {
        &self.store
    }

    /// Compile `query` into library text for `entity_type`
    pub fn compile(&self, query: &QueryDto, entity_type: &str) -> String {
        self.compile_with(query, entity_type, &CompileOptions::default())
            .library
    }

    /// Compile `query` and return the library together with its diagnostics
    pub fn compile_with(&self, query: &QueryDto, entity_type: &str, options: &CompileOptions) -> Compilation {
        let store = self.store.as_ref();
        let mut diagnostics = DiagnosticBag::new();
        let groups: Vec<&FieldGroup> = query.groups().map(|(_, group)| group).collect();

        let extras: Vec<CodeSystem> = options
            .extra_codesystems
            .iter()
            .chain(stratifier_codesystems(entity_type))
            .cloned()
            .collect();

        let definitions = collect_definitions(store, groups.iter().copied(), &extras);
        let singletons = collect_singletons(store, groups.iter().copied(), entity_type);
        let predicate = compose_predicate(store, entity_type, groups.iter().copied(), &mut diagnostics);
        let preamble = self.render_preamble(entity_type, &definitions, &mut diagnostics);

        let library = assemble(&preamble, &singletons, &predicate, stratifiers(entity_type));

        log::debug!(
            "Compiled {} field(s) for {} into {} bytes with {} diagnostic(s)",
            query.fields().count(),
            entity_type,
            library.len(),
            diagnostics.len()
        );

        Compilation {
            library,
            predicate,
            diagnostics: diagnostics.into_vec(),
        }
    }

    fn render_preamble(&self, entity_type: &str, definitions: &str, diagnostics: &mut DiagnosticBag) -> String {
        match self.store.preamble(entity_type, definitions) {
            Ok(preamble) => preamble,
            Err(err) => {
                diagnostics.push(
                    Diagnostic::warning(COH0103, format!("Preamble cannot be rendered: {}", err))
                        .with_help("Falling back to the default library header"),
                );
                format_template(DEFAULT_PREAMBLE, &[entity_type, definitions])
                    .unwrap_or_else(|_| format!("context {}", entity_type))
            }
        }
    }
}

fn assemble(preamble: &str, singletons: &str, predicate: &str, stratifiers: &str) -> String {
    let mut sections = vec![preamble.trim_end().to_string()];
    if !singletons.is_empty() {
        sections.push(singletons.to_string());
    }
    sections.push(format!("define {}:\n  {}", INITIAL_POPULATION, predicate));
    if !stratifiers.is_empty() {
        sections.push(stratifiers.trim_end().to_string());
    }

    let mut library = sections.join("\n\n");
    library.push('\n');
    library
}
