//! Output formatting utilities

use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use octofhir_cohort_diagnostics::{Diagnostic, Severity};
use std::fs::File;
use std::io::{IsTerminal, Write};
use std::path::Path;

/// Set up color output based on user preference
pub fn setup_colors(mode: &str) {
    match mode.to_lowercase().as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => colored::control::set_override(std::io::stderr().is_terminal()),
    }
}

/// Format an error for display
pub fn format_error(error: &anyhow::Error) -> String {
    format!("{} {:#}", "Error:".red().bold(), error)
}

/// Format a success message for display
pub fn format_success(message: &str) -> String {
    format!("{} {}", "Success:".green().bold(), message)
}

fn severity_label(severity: Severity) -> ColoredString {
    match severity {
        Severity::Error => "error".red().bold(),
        Severity::Warning => "warning".yellow().bold(),
        Severity::Info => "info".blue().bold(),
        Severity::Hint => "hint".normal(),
    }
}

/// Format one diagnostic as `severity[CODE]: message (subject)`
pub fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    let mut line = format!(
        "{}[{}]: {}",
        severity_label(diagnostic.severity),
        diagnostic.code,
        diagnostic.message
    );
    if let Some(subject) = &diagnostic.subject {
        line.push_str(&format!(" ({})", subject.cyan()));
    }
    if let Some(help) = diagnostic.help_text() {
        line.push_str(&format!("\n  {} {}", "help:".bold(), help));
    }
    line
}

/// Print diagnostics to stderr
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{}", format_diagnostic(diagnostic));
    }
}

/// Number of diagnostics at warning level or worse
pub fn count_warnings(diagnostics: &[Diagnostic]) -> usize {
    diagnostics
        .iter()
        .filter(|d| d.severity <= Severity::Warning)
        .count()
}

/// Write output to a file or stdout
pub fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    if let Some(path) = output_file {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write to output file: {}", path.display()))?;
        eprintln!(
            "{}",
            format_success(&format!("Output written to {}", path.display()))
        );
    } else {
        print!("{}", content);
    }
    Ok(())
}
