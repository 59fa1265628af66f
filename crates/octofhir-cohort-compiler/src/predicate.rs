//! Predicate composition: AND-joins every field of a query

use crate::path::compose_path;
use octofhir_cohort_diagnostics::DiagnosticBag;
use octofhir_cohort_mapping::MappingStore;
use octofhir_cohort_query::FieldGroup;

/// Predicate matching every entity, used when no field contributes
pub const MATCH_ALL: &str = "true";

/// Compose the predicate over all fields of `groups`, in enumeration order
pub fn compose_predicate<'a>(
    store: &MappingStore,
    entity_type: &str,
    groups: impl IntoIterator<Item = &'a FieldGroup>,
    diagnostics: &mut DiagnosticBag,
) -> String {
    let paths: Vec<String> = groups
        .into_iter()
        .flat_map(FieldGroup::iter)
        .filter_map(|field| compose_path(store, entity_type, field, diagnostics))
        .collect();

    if paths.is_empty() {
        MATCH_ALL.to_string()
    } else {
        paths.join(" and ")
    }
}
