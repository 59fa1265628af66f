//! Check command implementation

use super::{output, store};
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Configuration for check command
pub struct CheckConfig {
    pub config: Option<PathBuf>,
    pub strict: bool,
    pub verbose: bool,
}

/// Load a mapping configuration and report its problems
pub fn check(config: CheckConfig) -> Result<()> {
    let origin = store::describe(config.config.as_deref());
    let store = store::load_store(config.config.as_deref())?;

    let mut diagnostics = store.diagnostics().to_vec();
    diagnostics.extend(store.validate_templates());

    let status = if output::count_warnings(&diagnostics) == 0 {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("{} {}: {} data element(s)", status, origin.cyan(), store.len());

    if config.verbose {
        for key in store.keys() {
            println!("  {}", key);
        }
    }

    output::print_diagnostics(&diagnostics);

    let warnings = output::count_warnings(&diagnostics);
    if warnings > 0 && config.strict {
        anyhow::bail!("{} warning(s) reported in strict mode", warnings);
    }

    Ok(())
}
