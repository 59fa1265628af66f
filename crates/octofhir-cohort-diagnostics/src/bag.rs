//! Per-call diagnostic collection

use crate::{Diagnostic, Severity};

/// Collects diagnostics produced while loading a configuration or compiling a
/// query.
///
/// Every pushed diagnostic is also forwarded to the `log` facade, so operators
/// see data-completeness gaps in the regular log stream while callers can
/// inspect them programmatically.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticBag {
    items: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and log it at the matching level
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => log::error!("{}", diagnostic),
            Severity::Warning => log::warn!("{}", diagnostic),
            Severity::Info => log::info!("{}", diagnostic),
            Severity::Hint => log::debug!("{}", diagnostic),
        }
        self.items.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.push(diagnostic);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Whether anything at warning level or worse was recorded
    pub fn has_warnings(&self) -> bool {
        self.items.iter().any(|d| d.severity <= Severity::Warning)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl IntoIterator for DiagnosticBag {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{COH0100, COH0105};

    #[test]
    fn test_bag_records_in_order() {
        let mut bag = DiagnosticBag::new();
        assert!(bag.is_empty());
        assert!(!bag.has_warnings());

        bag.push(Diagnostic::info(COH0105, "first"));
        assert!(!bag.has_warnings());

        bag.push(Diagnostic::warning(COH0100, "second"));
        assert_eq!(bag.len(), 2);
        assert!(bag.has_warnings());

        let messages: Vec<_> = bag.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }
}
