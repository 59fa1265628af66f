//! Atomic expression resolution
//!
//! One [`ValueCondition`] becomes one CQL fragment by formatting the atomic
//! template stored for `(key, entity type, operator)`. Templates receive the
//! positional arguments:
//!
//! | Position | Argument |
//! |---|---|
//! | `{0}` | operator symbol |
//! | `{1}` | coding system name |
//! | `{2}` | extension URL |
//! | `{3}` | translated value (lower bound for between) |
//! | `{4}` | translated max value (between only) |

use octofhir_cohort_diagnostics::{COH0100, COH0102, COH0104, COH0105, Diagnostic, DiagnosticBag};
use octofhir_cohort_mapping::{MappingStore, format_template};
use octofhir_cohort_query::{SimpleValueCondition, ValueCondition};
use smallvec::{SmallVec, smallvec};

/// Operator symbol a condition kind is looked up under
pub const fn operator_symbol(condition: SimpleValueCondition) -> &'static str {
    match condition {
        SimpleValueCondition::Equals => "=",
        SimpleValueCondition::NotEquals => "<>",
        SimpleValueCondition::Like => "~",
        SimpleValueCondition::Less => "<",
        SimpleValueCondition::LessOrEquals => "<=",
        SimpleValueCondition::Greater => ">",
        SimpleValueCondition::GreaterOrEquals => ">=",
        SimpleValueCondition::Between => "...",
        SimpleValueCondition::Unknown => "default",
    }
}

/// Render one value condition of `key` for `entity_type`.
///
/// Returns `None` when the condition contributes nothing: no template is
/// configured, the template cannot be formatted, or a between condition lacks
/// its max value. Each case is recorded in `diagnostics`.
pub fn resolve_atomic(
    store: &MappingStore,
    key: &str,
    entity_type: &str,
    condition: &ValueCondition,
    diagnostics: &mut DiagnosticBag,
) -> Option<String> {
    let operator = operator_symbol(condition.condition);
    let subject = format!("{}/{}/{}", key, entity_type, operator);

    if condition.condition == SimpleValueCondition::Unknown {
        diagnostics.push(
            Diagnostic::info(COH0105, "Unrecognized condition kind, using operator 'default'")
                .with_subject(subject.clone()),
        );
    }

    let mut args: SmallVec<[&str; 5]> = smallvec![
        operator,
        store.coding_system_name(key),
        store.extension_url(key),
        store.permitted_value(key, &condition.value),
    ];

    if condition.condition.is_range() {
        match condition.max_value.as_deref().map(str::trim) {
            Some(max) if !max.is_empty() => args.push(store.permitted_value(key, max)),
            _ => {
                diagnostics.push(
                    Diagnostic::warning(
                        COH0104,
                        format!("Between condition with min '{}' has no max value", condition.value),
                    )
                    .with_subject(subject),
                );
                return None;
            }
        }
    }

    let Some(template) = store.atomic_template(key, entity_type, operator) else {
        diagnostics.push(
            Diagnostic::warning(COH0100, "No atomic template for key, entity type and operator")
                .with_subject(subject),
        );
        return None;
    };

    match format_template(template, &args) {
        Ok(expression) if expression.trim().is_empty() => None,
        Ok(expression) => Some(expression),
        Err(err) => {
            diagnostics.push(
                Diagnostic::warning(COH0102, format!("Atomic template '{}': {}", template, err))
                    .with_subject(subject),
            );
            None
        }
    }
}
