//! Value-set composition: OR-joins the atomic expressions of one field

use crate::resolver::resolve_atomic;
use octofhir_cohort_diagnostics::DiagnosticBag;
use octofhir_cohort_mapping::MappingStore;
use octofhir_cohort_query::Field;

/// Compose the value conditions of `field` for `entity_type`.
///
/// Conditions that resolve to nothing are skipped. A single expression is
/// returned as is, several are joined with `or` in input order and
/// parenthesized. `None` when no condition contributes.
pub fn compose_values(
    store: &MappingStore,
    entity_type: &str,
    field: &Field,
    diagnostics: &mut DiagnosticBag,
) -> Option<String> {
    let mut atoms: Vec<String> = field
        .values
        .iter()
        .filter_map(|condition| resolve_atomic(store, &field.urn, entity_type, condition, diagnostics))
        .collect();

    match atoms.len() {
        0 => None,
        1 => atoms.pop(),
        _ => Some(format!("({})", atoms.join(" or "))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octofhir_cohort_mapping::ConfigFormat;
    use octofhir_cohort_query::{ValueCondition, ValueType};

    const MAPPING: &str = r#"{
        "entry": [{
            "key": "type",
            "entityType": [{
                "name": "Specimen",
                "pathTemplate": "{0}",
                "atomicTemplate": [{"operator": "=", "template": "T = ''{3}''"}]
            }]
        }]
    }"#;

    fn store() -> MappingStore {
        MappingStore::try_load_str(MAPPING, ConfigFormat::Json).unwrap()
    }

    #[test]
    fn test_single_value_is_not_parenthesized() {
        let field = Field::new("type", ValueType::PermittedValue).with_value(ValueCondition::equals("A"));
        let mut diagnostics = DiagnosticBag::new();
        assert_eq!(
            compose_values(&store(), "Specimen", &field, &mut diagnostics).as_deref(),
            Some("T = 'A'")
        );
    }

    #[test]
    fn test_values_are_or_joined_in_order() {
        let field = Field::new("type", ValueType::PermittedValue)
            .with_value(ValueCondition::equals("B"))
            .with_value(ValueCondition::equals("A"));
        let mut diagnostics = DiagnosticBag::new();
        assert_eq!(
            compose_values(&store(), "Specimen", &field, &mut diagnostics).as_deref(),
            Some("(T = 'B' or T = 'A')")
        );
    }

    #[test]
    fn test_unresolved_values_are_skipped() {
        let field = Field::new("type", ValueType::PermittedValue)
            .with_value(ValueCondition::greater("A"))
            .with_value(ValueCondition::equals("B"));
        let mut diagnostics = DiagnosticBag::new();
        assert_eq!(
            compose_values(&store(), "Specimen", &field, &mut diagnostics).as_deref(),
            Some("T = 'B'")
        );
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_field_without_values() {
        let field = Field::new("type", ValueType::PermittedValue);
        let mut diagnostics = DiagnosticBag::new();
        assert_eq!(compose_values(&store(), "Specimen", &field, &mut diagnostics), None);
        assert!(diagnostics.is_empty());
    }
}
