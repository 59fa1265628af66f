//! Read-only mapping store
//!
//! [`MappingStore`] is built once from a [`MappingDocument`] and never mutated
//! afterwards, so a single instance can be shared (typically behind an `Arc`)
//! by any number of concurrent compilations. It holds two flat maps (coding
//! systems and extension URLs per key) and four nested tables (path templates,
//! atomic templates, permitted values and singletons).

use crate::config::{self, ConfigError, ConfigFormat, EntityTypeConfig, EntryConfig, MappingDocument};
use crate::tables::{Table2, Table3};
use crate::template::{TemplateError, format_template, validate_template};
use crate::CodeSystem;
use octofhir_cohort_diagnostics::{
    COH0005, COH0006, COH0007, COH0008, COH0009, COH0010, COH0102, COH0103, CohortError, Diagnostic,
    DiagnosticBag,
};
use std::collections::HashMap;
use std::path::Path;

/// Operator key used when no template exists for the exact operator
pub const DEFAULT_OPERATOR: &str = "DEFAULT";

/// Preamble used when the document does not provide one
pub const DEFAULT_PREAMBLE: &str = "library Retrieve
using FHIR version ''4.0.0''
include FHIRHelpers version ''4.0.0''

{1}

context {0}";

/// Lookup tables derived from a mapping document
#[derive(Debug, Clone)]
pub struct MappingStore {
    preamble: String,
    codesystems: HashMap<String, Vec<CodeSystem>>,
    extension_urls: HashMap<String, String>,
    path_templates: Table2<String>,
    atomic_templates: Table3<String>,
    permitted_values: Table2<String>,
    singletons: Table2<Vec<String>>,
    diagnostics: Vec<Diagnostic>,
}

impl Default for MappingStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl MappingStore {
    /// A store that knows no mappings; every lookup misses
    pub fn empty() -> Self {
        Self {
            preamble: DEFAULT_PREAMBLE.to_string(),
            codesystems: HashMap::new(),
            extension_urls: HashMap::new(),
            path_templates: Table2::default(),
            atomic_templates: Table3::default(),
            permitted_values: Table2::default(),
            singletons: Table2::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Build the lookup tables from a parsed document
    pub fn from_document(document: MappingDocument) -> Self {
        let mut store = Self::empty();
        let mut bag = DiagnosticBag::new();

        match document.preamble.as_deref().map(str::trim) {
            Some(preamble) if !preamble.is_empty() => store.preamble = preamble.to_string(),
            _ => bag.push(Diagnostic::info(
                COH0010,
                "Mapping document has no preamble, using the default library header",
            )),
        }

        for entry in document.entries {
            store.add_entry(entry, &mut bag);
        }

        log::debug!(
            "Mapping store built: {} keys, {} path templates, {} atomic templates",
            store.codesystems.len(),
            store.path_templates.len(),
            store.atomic_templates.len()
        );

        store.diagnostics = bag.into_vec();
        store
    }

    fn add_entry(&mut self, entry: EntryConfig, bag: &mut DiagnosticBag) {
        let key = entry.key.trim();
        if key.is_empty() {
            bag.push(Diagnostic::warning(COH0005, "Skipping mapping entry without key"));
            return;
        }

        let systems: Vec<CodeSystem> = entry
            .codesystems
            .into_iter()
            .map(|cs| CodeSystem::new(cs.name.trim(), cs.url.trim()))
            .collect();
        self.codesystems.entry(key.to_string()).or_default().extend(systems);

        if let Some(url) = entry.extension_url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            self.extension_urls
                .entry(key.to_string())
                .or_insert_with(|| url.to_string());
        }

        for pv in entry.permitted_values {
            if !self.permitted_values.insert_first(key, pv.raw.trim(), pv.target.trim().to_string()) {
                bag.push(
                    Diagnostic::warning(
                        COH0009,
                        format!("Duplicate permitted value '{}' ignored", pv.raw.trim()),
                    )
                    .with_subject(key),
                );
            }
        }

        for entity in entry.entity_types {
            self.add_entity_type(key, entity, bag);
        }
    }

    fn add_entity_type(&mut self, key: &str, entity: EntityTypeConfig, bag: &mut DiagnosticBag) {
        let entity_type = entity.name.trim();
        if entity_type.is_empty() {
            bag.push(
                Diagnostic::warning(COH0006, "Skipping entity mapping without name").with_subject(key),
            );
            return;
        }
        let subject = format!("{}/{}", key, entity_type);

        if let Some(path) = entity.path_template.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            if !self.path_templates.insert_first(key, entity_type, path.to_string()) {
                bag.push(
                    Diagnostic::warning(COH0007, "Duplicate path template ignored, keeping the first")
                        .with_subject(subject.clone()),
                );
            }
        }

        for atomic in entity.atomic_templates {
            let operator = atomic.operator.trim();
            if !self.atomic_templates.insert_first(
                key,
                entity_type,
                operator,
                atomic.template.trim().to_string(),
            ) {
                bag.push(
                    Diagnostic::warning(
                        COH0008,
                        format!("Duplicate atomic template for operator '{}' ignored", operator),
                    )
                    .with_subject(subject.clone()),
                );
            }
        }

        let singletons = self.singletons.get_or_default_mut(key, entity_type);
        for name in entity.singletons {
            let name = name.trim();
            if !name.is_empty() && !singletons.iter().any(|s| s == name) {
                singletons.push(name.to_string());
            }
        }
    }

    /// Parse a document and build the store, failing on unreadable input
    pub fn try_load_str(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        Ok(Self::from_document(config::parse_document(content, format)?))
    }

    /// Read a document file and build the store, failing on unreadable input
    pub fn try_load_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self::from_document(config::read_document(path)?))
    }

    /// Like [`try_load_str`](Self::try_load_str) but degrades to an empty
    /// store, recording the failure as a diagnostic.
    pub fn load_str(content: &str, format: ConfigFormat) -> Self {
        Self::try_load_str(content, format)
            .unwrap_or_else(|err| Self::failed(CohortError::from(err), None))
    }

    /// Like [`try_load_file`](Self::try_load_file) but degrades to an empty
    /// store, recording the failure as a diagnostic.
    pub fn load_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::try_load_file(path).unwrap_or_else(|err| {
            Self::failed(CohortError::from(err), Some(path.display().to_string()))
        })
    }

    fn failed(err: CohortError, origin: Option<String>) -> Self {
        let err = match origin {
            Some(origin) => err.with_context(origin),
            None => err,
        };
        let mut bag = DiagnosticBag::new();
        bag.push(
            err.to_diagnostic()
                .with_help("Mapping store is empty; all criteria will be omitted"),
        );

        let mut store = Self::empty();
        store.diagnostics = bag.into_vec();
        store
    }

    /// Diagnostics recorded while building the store
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of known data element keys
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All known data element keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.codesystems.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Coding systems configured for a key
    pub fn codesystems(&self, key: &str) -> &[CodeSystem] {
        self.codesystems.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Name of the primary coding system, empty if none
    pub fn coding_system_name(&self, key: &str) -> &str {
        self.codesystems(key).first().map(|cs| cs.name.as_str()).unwrap_or("")
    }

    /// URL of the primary coding system, empty if none
    pub fn coding_system_url(&self, key: &str) -> &str {
        self.codesystems(key).first().map(|cs| cs.url.as_str()).unwrap_or("")
    }

    /// FHIR extension URL, empty if none
    pub fn extension_url(&self, key: &str) -> &str {
        self.extension_urls.get(key).map(String::as_str).unwrap_or("")
    }

    /// Path template for a key within an entity type
    pub fn path_template(&self, key: &str, entity_type: &str) -> Option<&str> {
        self.path_templates.get(key, entity_type).map(String::as_str)
    }

    /// Atomic template for an operator, falling back to the `DEFAULT` entry
    pub fn atomic_template(&self, key: &str, entity_type: &str, operator: &str) -> Option<&str> {
        self.atomic_templates
            .get(key, entity_type, operator)
            .or_else(|| self.atomic_templates.get(key, entity_type, DEFAULT_OPERATOR))
            .map(String::as_str)
    }

    /// CQL literal for a raw value; the raw value itself when untranslated
    pub fn permitted_value<'a>(&'a self, key: &str, raw: &'a str) -> &'a str {
        self.permitted_values
            .get(key, raw)
            .map(String::as_str)
            .unwrap_or(raw)
    }

    /// Singleton names configured for a key within an entity type
    pub fn singletons(&self, key: &str, entity_type: &str) -> &[String] {
        self.singletons
            .get(key, entity_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Raw preamble template
    pub fn preamble_template(&self) -> &str {
        &self.preamble
    }

    /// Check that the preamble and every stored template can be formatted.
    ///
    /// Loading never rejects templates; broken ones only surface when a query
    /// reaches them. This reports them up front, ordered by subject.
    pub fn validate_templates(&self) -> Vec<Diagnostic> {
        let paths = self
            .path_templates
            .iter()
            .map(|(key, entity_type, template)| (format!("{}/{}", key, entity_type), template));
        let atomics = self
            .atomic_templates
            .iter()
            .map(|(key, entity_type, operator, template)| {
                (format!("{}/{}/{}", key, entity_type, operator), template)
            });

        let mut diagnostics: Vec<Diagnostic> = paths
            .chain(atomics)
            .filter_map(|(subject, template)| {
                validate_template(template).err().map(|err| {
                    Diagnostic::warning(COH0102, format!("Template '{}': {}", template, err))
                        .with_subject(subject)
                })
            })
            .collect();
        diagnostics.sort_by(|a, b| a.subject.cmp(&b.subject));

        if let Err(err) = validate_template(&self.preamble) {
            diagnostics.insert(0, Diagnostic::warning(COH0103, format!("Preamble: {}", err)));
        }
        diagnostics
    }

    /// Render the library header for an entity type and codesystem block
    pub fn preamble(&self, entity_type: &str, codesystem_definitions: &str) -> Result<String, TemplateError> {
        format_template(&self.preamble, &[entity_type, codesystem_definitions])
    }
}
