//! Collection of `codesystem` definitions referenced by a query

use octofhir_cohort_mapping::{CodeSystem, MappingStore};
use octofhir_cohort_query::FieldGroup;
use std::collections::BTreeSet;

/// Collect the sorted, deduplicated `codesystem` statements for `extras` and
/// every field of `groups`. Systems missing a name or URL are skipped.
pub fn collect_definitions<'a>(
    store: &MappingStore,
    groups: impl IntoIterator<Item = &'a FieldGroup>,
    extras: &[CodeSystem],
) -> String {
    let mut definitions = BTreeSet::new();

    let referenced = groups
        .into_iter()
        .flat_map(FieldGroup::iter)
        .flat_map(|field| store.codesystems(&field.urn));

    for system in extras.iter().chain(referenced) {
        if system.is_complete() {
            definitions.insert(system.definition());
        }
    }

    definitions.into_iter().collect::<Vec<_>>().join("\n")
}
