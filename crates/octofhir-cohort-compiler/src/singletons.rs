//! Singleton statements required by the fields of a query

use indexmap::IndexSet;
use octofhir_cohort_mapping::MappingStore;
use octofhir_cohort_query::FieldGroup;

/// `define {name}: singleton from ([{name}])`
pub fn singleton_definition(name: &str) -> String {
    format!("define {name}: singleton from ([{name}])")
}

/// Collect the singleton statements configured for every field of `groups`
/// within `entity_type`, deduplicated in first-seen order and newline-joined.
pub fn collect_singletons<'a>(
    store: &MappingStore,
    groups: impl IntoIterator<Item = &'a FieldGroup>,
    entity_type: &str,
) -> String {
    let statements: IndexSet<String> = groups
        .into_iter()
        .flat_map(FieldGroup::iter)
        .flat_map(|field| store.singletons(&field.urn, entity_type))
        .map(|name| singleton_definition(name))
        .collect();

    statements.into_iter().collect::<Vec<_>>().join("\n")
}
