//! Behavioural properties of query compilation

use octofhir_cohort_compiler::{CompileOptions, Compiler, compose_predicate, resolve_atomic};
use octofhir_cohort_diagnostics::{COH0100, DiagnosticBag};
use octofhir_cohort_mapping::{ConfigFormat, MappingStore};
use octofhir_cohort_query::{Field, FieldCategory, QueryDto, ValueCondition, ValueType};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::sync::Arc;

const MAPPING_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<mappingConfig>
  <preamble>library Fixture
{1}
context {0}</preamble>
  <entry>
    <key>X1</key>
    <codesystem><name>Gender</name><url>http://example/gender</url></codesystem>
    <entityType>
      <name>Patient</name>
      <pathTemplate>exists (E.gender G where G in '{'{0}'}')</pathTemplate>
      <atomicTemplate><operator>=</operator><template>Code ''{3}'' from {1}</template></atomicTemplate>
    </entityType>
  </entry>
  <entry>
    <key>X2</key>
    <codesystem><name>Gender</name><url>http://example/gender</url></codesystem>
    <entityType>
      <name>Patient</name>
      <pathTemplate>P2({0})</pathTemplate>
      <atomicTemplate><operator>DEFAULT</operator><template>V {0} ''{3}''</template></atomicTemplate>
    </entityType>
  </entry>
  <entry>
    <key>X3</key>
    <codesystem><name>Alpha</name><url>http://example/alpha</url></codesystem>
    <entityType>
      <name>Patient</name>
      <pathTemplate>P3({0})</pathTemplate>
      <atomicTemplate><operator>=</operator><template>A = ''{3}''</template></atomicTemplate>
      <atomicTemplate><operator>...</operator><template>A between {3} and {4}</template></atomicTemplate>
    </entityType>
  </entry>
</mappingConfig>"#;

fn store() -> Arc<MappingStore> {
    Arc::new(MappingStore::try_load_str(MAPPING_XML, ConfigFormat::Xml).unwrap())
}

fn field(key: &str, conditions: &[ValueCondition]) -> Field {
    conditions
        .iter()
        .cloned()
        .fold(Field::new(key, ValueType::String), Field::with_value)
}

#[test]
fn test_end_to_end_gender_scenario() {
    let query = QueryDto::new().with_field(FieldCategory::Donor, field("X1", &[ValueCondition::equals("male")]));
    let compilation = Compiler::new(store()).compile_with(&query, "Patient", &CompileOptions::new());

    assert_eq!(
        compilation.predicate,
        "exists (E.gender G where G in {Code 'male' from Gender})"
    );
    assert!(compilation
        .library
        .starts_with("library Fixture\ncodesystem Gender: 'http://example/gender'\ncontext Patient\n"));
}

#[test]
fn test_unquoted_braces_are_placeholders() {
    let mapping = r#"{
        "entry": [{
            "key": "X1",
            "codesystem": [{"name": "Gender", "url": "http://example/gender"}],
            "entityType": [{
                "name": "Patient",
                "pathTemplate": "exists (E.gender G where G in {0})",
                "atomicTemplate": [{"operator": "=", "template": "Code ''{3}'' from {1}"}]
            }]
        }]
    }"#;
    let store = MappingStore::try_load_str(mapping, ConfigFormat::Json).unwrap();
    let query = QueryDto::new().with_field(FieldCategory::Donor, field("X1", &[ValueCondition::equals("male")]));

    let compilation = Compiler::new(Arc::new(store)).compile_with(&query, "Patient", &CompileOptions::new());
    assert_eq!(
        compilation.predicate,
        "exists (E.gender G where G in Code 'male' from Gender)"
    );
    assert!(compilation.diagnostics.is_empty());
}

#[test]
fn test_compilation_is_deterministic() {
    let query = QueryDto::new()
        .with_field(FieldCategory::Donor, field("X3", &[ValueCondition::equals("a")]))
        .with_field(FieldCategory::Sample, field("X1", &[ValueCondition::equals("male")]))
        .with_field(FieldCategory::Event, field("X2", &[ValueCondition::less(3)]));
    let compiler = Compiler::new(store());

    let first = compiler.compile(&query, "Patient");
    for _ in 0..10 {
        assert_eq!(compiler.compile(&query, "Patient"), first);
    }
}

#[rstest]
#[case("Patient")]
#[case("Specimen")]
#[case("Observation")]
fn test_empty_query_matches_everything(#[case] entity_type: &str) {
    let compilation = Compiler::new(store()).compile_with(&QueryDto::new(), entity_type, &CompileOptions::new());
    assert_eq!(compilation.predicate, "true");
    assert!(compilation.library.contains("define InInitialPopulation:\n  true\n"));
}

#[test]
fn test_or_composition() {
    let query = QueryDto::new().with_field(
        FieldCategory::Donor,
        field("X3", &[ValueCondition::equals("A"), ValueCondition::equals("B")]),
    );
    let compilation = Compiler::new(store()).compile_with(&query, "Patient", &CompileOptions::new());
    assert_eq!(compilation.predicate, "P3((A = 'A' or A = 'B'))");
}

#[test]
fn test_and_composition_keeps_enumeration_order() {
    let p1 = field("X3", &[ValueCondition::equals("A")]);
    let p2 = field("X2", &[ValueCondition::equals("B")]);
    let compiler = Compiler::new(store());

    let sample_first = QueryDto::new()
        .with_field(FieldCategory::Sample, p1.clone())
        .with_field(FieldCategory::Event, p2.clone());
    let donor_second = QueryDto::new()
        .with_field(FieldCategory::Event, p1)
        .with_field(FieldCategory::Donor, p2);

    let options = CompileOptions::new();
    assert_eq!(
        compiler.compile_with(&sample_first, "Patient", &options).predicate,
        "P3(A = 'A') and P2(V = 'B')"
    );
    assert_eq!(
        compiler.compile_with(&donor_second, "Patient", &options).predicate,
        "P2(V = 'B') and P3(A = 'A')"
    );
}

#[test]
fn test_codesystem_definitions_are_deduplicated_and_sorted() {
    let query = QueryDto::new()
        .with_field(FieldCategory::Donor, field("X1", &[ValueCondition::equals("male")]))
        .with_field(FieldCategory::Donor, field("X2", &[ValueCondition::equals("x")]))
        .with_field(FieldCategory::Donor, field("X3", &[ValueCondition::equals("y")]));
    let library = Compiler::new(store()).compile(&query, "Observation");

    assert!(library.starts_with(
        "library Fixture\n\
         codesystem Alpha: 'http://example/alpha'\n\
         codesystem Gender: 'http://example/gender'\n\
         context Observation\n"
    ));
    assert_eq!(library.matches("codesystem Gender").count(), 1);
}

#[test]
fn test_default_operator_fallback() {
    let store = store();
    let mut diagnostics = DiagnosticBag::new();
    let expr = resolve_atomic(&store, "X2", "Patient", &ValueCondition::equals("v"), &mut diagnostics);
    assert_eq!(expr.as_deref(), Some("V = 'v'"));
    assert!(diagnostics.is_empty());
}

#[test]
fn test_missing_mapping_is_reported_not_raised() {
    let query = QueryDto::new()
        .with_field(FieldCategory::Donor, field("urn:unknown", &[ValueCondition::equals("x")]))
        .with_field(FieldCategory::Sample, field("X3", &[ValueCondition::equals("A")]));
    let compilation = Compiler::new(store()).compile_with(&query, "Patient", &CompileOptions::new());

    assert_eq!(compilation.predicate, "P3(A = 'A')");
    assert!(compilation.has_warnings());
    assert_eq!(compilation.diagnostics.len(), 1);
    assert_eq!(compilation.diagnostics[0].code, COH0100);
    assert_eq!(compilation.diagnostics[0].subject.as_deref(), Some("urn:unknown/Patient/="));
}

#[test]
fn test_between_parameter_order() {
    let query = QueryDto::new().with_field(FieldCategory::Donor, field("X3", &[ValueCondition::between(10, 20)]));
    let compilation = Compiler::new(store()).compile_with(&query, "Patient", &CompileOptions::new());
    assert_eq!(compilation.predicate, "P3(A between 10 and 20)");
}

#[test]
fn test_empty_store_compiles_everything_to_true() {
    let query = QueryDto::new().with_field(FieldCategory::Donor, field("X1", &[ValueCondition::equals("male")]));
    let store = MappingStore::load_str("<mappingConfig><entry>", ConfigFormat::Xml);
    assert!(store.is_empty());

    let mut diagnostics = DiagnosticBag::new();
    let groups: Vec<_> = query.groups().map(|(_, group)| group).collect();
    assert_eq!(compose_predicate(&store, "Patient", groups, &mut diagnostics), "true");
    assert!(diagnostics.has_warnings());
}

#[test]
fn test_concurrent_compilation_shares_one_store() {
    let compiler = Compiler::new(store());
    let queries: Vec<QueryDto> = (0..8)
        .map(|i| {
            QueryDto::new()
                .with_field(FieldCategory::Donor, field("X3", &[ValueCondition::equals(i)]))
                .with_field(FieldCategory::Sample, field("urn:unknown", &[ValueCondition::equals(i)]))
        })
        .collect();
    let expected: Vec<String> = queries.iter().map(|q| compiler.compile(q, "Patient")).collect();

    std::thread::scope(|scope| {
        for (query, expected) in queries.iter().zip(&expected) {
            let compiler = compiler.clone();
            scope.spawn(move || {
                for _ in 0..50 {
                    let compilation = compiler.compile_with(query, "Patient", &CompileOptions::new());
                    assert_eq!(&compilation.library, expected);
                    assert_eq!(compilation.diagnostics.len(), 1);
                }
            });
        }
    });
}
