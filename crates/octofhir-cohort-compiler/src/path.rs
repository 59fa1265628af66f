//! Path composition: scopes a field's value set to its entity attribute

use crate::values::compose_values;
use octofhir_cohort_diagnostics::{COH0101, COH0102, Diagnostic, DiagnosticBag};
use octofhir_cohort_mapping::{MappingStore, format_template};
use octofhir_cohort_query::Field;

/// Wrap the composed value set of `field` in its path template.
///
/// `None` when the value set is empty or no usable path template exists for
/// `(field.urn, entity_type)`.
pub fn compose_path(
    store: &MappingStore,
    entity_type: &str,
    field: &Field,
    diagnostics: &mut DiagnosticBag,
) -> Option<String> {
    let values = compose_values(store, entity_type, field, diagnostics)?;

    let Some(template) = store.path_template(&field.urn, entity_type) else {
        diagnostics.push(
            Diagnostic::warning(COH0101, "No path template for key and entity type")
                .with_subject(format!("{}/{}", field.urn, entity_type)),
        );
        return None;
    };

    match format_template(template, &[values.as_str()]) {
        Ok(path) => Some(path),
        Err(err) => {
            diagnostics.push(
                Diagnostic::warning(COH0102, format!("Path template '{}': {}", template, err))
                    .with_subject(format!("{}/{}", field.urn, entity_type)),
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octofhir_cohort_mapping::ConfigFormat;
    use octofhir_cohort_query::{ValueCondition, ValueType};

    const MAPPING: &str = r#"{
        "entry": [{
            "key": "X1",
            "codesystem": [{"name": "Gender", "url": "http://example/gender"}],
            "entityType": [{
                "name": "Patient",
                "pathTemplate": "exists (E.gender G where G in '{'{0}'}')",
                "atomicTemplate": [{"operator": "=", "template": "Code ''{3}'' from {1}"}]
            }, {
                "name": "Specimen",
                "atomicTemplate": [{"operator": "=", "template": "Code ''{3}'' from {1}"}]
            }]
        }]
    }"#;

    fn store() -> MappingStore {
        MappingStore::try_load_str(MAPPING, ConfigFormat::Json).unwrap()
    }

    fn gender(value: &str) -> Field {
        Field::new("X1", ValueType::PermittedValue).with_value(ValueCondition::equals(value))
    }

    #[test]
    fn test_value_set_is_scoped() {
        let mut diagnostics = DiagnosticBag::new();
        assert_eq!(
            compose_path(&store(), "Patient", &gender("male"), &mut diagnostics).as_deref(),
            Some("exists (E.gender G where G in {Code 'male' from Gender})")
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_missing_path_template() {
        let mut diagnostics = DiagnosticBag::new();
        assert_eq!(compose_path(&store(), "Specimen", &gender("male"), &mut diagnostics), None);

        let diagnostic = diagnostics.iter().next().unwrap();
        assert_eq!(diagnostic.code, COH0101);
        assert_eq!(diagnostic.subject.as_deref(), Some("X1/Specimen"));
    }

    #[test]
    fn test_empty_value_set_skips_path_lookup() {
        let mut diagnostics = DiagnosticBag::new();
        let field = Field::new("X1", ValueType::PermittedValue);
        assert_eq!(compose_path(&store(), "Specimen", &field, &mut diagnostics), None);
        assert!(diagnostics.is_empty());
    }
}
