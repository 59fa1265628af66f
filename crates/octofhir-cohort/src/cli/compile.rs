//! Compile command implementation

use super::{output, store};
use anyhow::{Context, Result};
use colored::Colorize;
use octofhir_cohort_compiler::{CompileOptions, Compiler};
use octofhir_cohort_mapping::CodeSystem;
use octofhir_cohort_query::QueryDto;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for compile command
pub struct CompileConfig {
    pub config: Option<PathBuf>,
    pub query: PathBuf,
    pub entity: String,
    pub output_file: Option<PathBuf>,
    pub extra_codesystems: Vec<CodeSystem>,
    pub strict: bool,
    pub verbose: bool,
}

/// Compile a query document and write the library text
pub fn compile(config: CompileConfig) -> Result<()> {
    let store = store::load_store(config.config.as_deref())?;
    output::print_diagnostics(store.diagnostics());

    let json = fs::read_to_string(&config.query)
        .with_context(|| format!("Failed to read query file: {}", config.query.display()))?;
    let query = QueryDto::from_json(&json)
        .with_context(|| format!("Failed to parse query file: {}", config.query.display()))?;

    if config.verbose {
        eprintln!(
            "Compiling {} field(s) for {} using {}",
            query.fields().count(),
            config.entity.cyan(),
            store::describe(config.config.as_deref())
        );
    }

    let options = CompileOptions {
        extra_codesystems: config.extra_codesystems,
    };
    let compilation = Compiler::new(Arc::new(store)).compile_with(&query, &config.entity, &options);

    output::write_output(&compilation.library, config.output_file.as_deref())?;

    let mut diagnostics = query.validate();
    diagnostics.extend(compilation.diagnostics);
    output::print_diagnostics(&diagnostics);

    let warnings = output::count_warnings(&diagnostics);
    if config.strict && warnings > 0 {
        anyhow::bail!("{} warning(s) reported in strict mode", warnings);
    }

    Ok(())
}
