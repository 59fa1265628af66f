//! Canned stratifier definitions appended to every library of an entity type
//!
//! Stratifiers let the execution engine report counts per gender, age class
//! or sample material alongside the population. Each block lists the coding
//! systems it references so the library header can define them.

use octofhir_cohort_mapping::CodeSystem;
use std::collections::HashMap;
use std::sync::LazyLock;

pub const PATIENT: &str = "Patient";
pub const SPECIMEN: &str = "Specimen";

const SAMPLE_MATERIAL_TYPE: &str = "SampleMaterialType";
const SAMPLE_MATERIAL_TYPE_URL: &str = "https://fhir.bbmri.de/CodeSystem/SampleMaterialType";

const PATIENT_STRATIFIERS: &str = "\
define Gender:
  if (Patient.gender is null) then 'unknown' else Patient.gender

define AgeClass:
  if (Patient.birthDate is null) then 'unknown' else ToString((AgeInYears() div 10) * 10)";

/// Sample material categories and the material codes each one covers
const SAMPLE_MATERIAL_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "blood",
        &["whole-blood", "blood-plasma", "blood-serum", "peripheral-blood-cells-vital", "buffy-coat"],
    ),
    (
        "tissue-ffpe",
        &["tissue-ffpe", "tumor-tissue-ffpe", "normal-tissue-ffpe", "other-tissue-ffpe"],
    ),
    (
        "tissue-frozen",
        &["tissue-frozen", "tumor-tissue-frozen", "normal-tissue-frozen", "other-tissue-frozen"],
    ),
    (
        "liquid",
        &["urine", "csf-liquor", "saliva", "bone-marrow", "ascites", "swab", "stool-faeces"],
    ),
    ("derivative", &["dna", "rna", "derivative-other"]),
];

/// Stratifier statements of one entity type
#[derive(Debug, Clone)]
pub struct Stratifier {
    pub block: String,
    pub codesystems: Vec<CodeSystem>,
}

static STRATIFIERS: LazyLock<HashMap<&'static str, Stratifier>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    map.insert(
        PATIENT,
        Stratifier {
            block: PATIENT_STRATIFIERS.to_string(),
            codesystems: Vec::new(),
        },
    );

    map.insert(
        SPECIMEN,
        Stratifier {
            block: specimen_stratifiers(),
            codesystems: vec![CodeSystem::new(SAMPLE_MATERIAL_TYPE, SAMPLE_MATERIAL_TYPE_URL)],
        },
    );

    map
});

/// Classify a specimen by intersecting its type codings with each category
fn specimen_stratifiers() -> String {
    let mut block = String::from("define function SampleType(specimen FHIR.Specimen):\n  case\n");

    for (category, codes) in SAMPLE_MATERIAL_CATEGORIES {
        let code_list = codes
            .iter()
            .map(|code| format!("Code '{}' from {}", code, SAMPLE_MATERIAL_TYPE))
            .collect::<Vec<_>>()
            .join(", ");
        block.push_str(&format!(
            "    when exists ((specimen.type.coding C return FHIRHelpers.ToCode(C)) intersect {{{}}}) then '{}'\n",
            code_list, category
        ));
    }

    block.push_str("    else 'other'\n  end\n\ndefine SpecimenType:\n  SampleType(Specimen)");
    block
}

/// Stratifier block for `entity_type`; empty for unknown entity types
pub fn stratifiers(entity_type: &str) -> &'static str {
    STRATIFIERS
        .get(entity_type)
        .map(|s| s.block.as_str())
        .unwrap_or("")
}

/// Coding systems referenced by the stratifier block of `entity_type`
pub fn stratifier_codesystems(entity_type: &str) -> &'static [CodeSystem] {
    STRATIFIERS
        .get(entity_type)
        .map(|s| s.codesystems.as_slice())
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_stratifiers() {
        let block = stratifiers(PATIENT);
        assert!(block.starts_with("define Gender:\n"));
        assert!(block.contains("define AgeClass:\n"));
        assert!(stratifier_codesystems(PATIENT).is_empty());
    }

    #[test]
    fn test_specimen_stratifiers_classify_materials() {
        let block = stratifiers(SPECIMEN);
        assert!(block.starts_with("define function SampleType(specimen FHIR.Specimen):\n  case\n"));
        assert!(block.contains(
            "intersect {Code 'dna' from SampleMaterialType, Code 'rna' from SampleMaterialType, \
             Code 'derivative-other' from SampleMaterialType}) then 'derivative'\n"
        ));
        assert!(block.ends_with("define SpecimenType:\n  SampleType(Specimen)"));
        assert_eq!(block.matches("    when exists").count(), SAMPLE_MATERIAL_CATEGORIES.len());
    }

    #[test]
    fn test_specimen_requires_material_codesystem() {
        assert_eq!(
            stratifier_codesystems(SPECIMEN),
            &[CodeSystem::new("SampleMaterialType", "https://fhir.bbmri.de/CodeSystem/SampleMaterialType")]
        );
    }

    #[test]
    fn test_unknown_entity_type() {
        assert_eq!(stratifiers("Observation"), "");
        assert!(stratifier_codesystems("Observation").is_empty());
    }
}
