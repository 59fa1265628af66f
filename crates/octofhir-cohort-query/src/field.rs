//! Search fields

use crate::{ValueCondition, ValueType};
use octofhir_cohort_diagnostics::{COH0202, Diagnostic};
use serde::{Deserialize, Serialize};

/// A single search field: one domain identifier and its value conditions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Domain identifier (data element key)
    pub urn: String,
    /// Declared type of the values
    #[serde(default)]
    pub value_type: ValueType,
    /// Conditions in the order the user entered them
    #[serde(default)]
    pub values: Vec<ValueCondition>,
}

impl Field {
    pub fn new(urn: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            urn: urn.into(),
            value_type,
            values: Vec::new(),
        }
    }

    /// Append a condition
    pub fn with_value(mut self, value: ValueCondition) -> Self {
        self.values.push(value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check every condition against the declared value type
    pub fn validate(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for condition in &self.values {
            let bounds = std::iter::once(&condition.value).chain(condition.max_value.as_ref());
            for value in bounds {
                if !self.value_type.accepts(value) {
                    diagnostics.push(
                        Diagnostic::warning(
                            COH0202,
                            format!(
                                "'{}' is not a valid {} value for {} condition",
                                value,
                                self.value_type,
                                condition.condition
                            ),
                        )
                        .with_subject(self.urn.clone()),
                    );
                }
            }
        }
        diagnostics
    }
}
