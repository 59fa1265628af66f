//! Mapping document model and its XML/JSON readers
//!
//! The XML rendering uses elements only:
//!
//! ```xml
//! <mappingConfig>
//!   <preamble>library Retrieve ... context {0}</preamble>
//!   <entry>
//!     <key>urn:mdr16:dataelement:23:1</key>
//!     <codesystem><name>Gender</name><url>http://hl7.org/fhir/administrative-gender</url></codesystem>
//!     <permittedValue><raw>M</raw><target>male</target></permittedValue>
//!     <entityType>
//!       <name>Patient</name>
//!       <pathTemplate>...</pathTemplate>
//!       <atomicTemplate><operator>DEFAULT</operator><template>...</template></atomicTemplate>
//!     </entityType>
//!   </entry>
//! </mappingConfig>
//! ```
//!
//! The JSON rendering mirrors it with the same (singular) member names.
//! Repeated XML elements may be interleaved with other elements.

use crate::CodeSystem;
use octofhir_cohort_diagnostics::{COH0001, COH0002, COH0003, COH0004, CohortError, ErrorCode};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Error type for mapping document parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),
}

impl ConfigError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Io(_) => COH0001,
            Self::Xml(_) => COH0002,
            Self::Json(_) => COH0003,
            Self::UnsupportedFormat(_) => COH0004,
        }
    }
}

impl From<ConfigError> for CohortError {
    fn from(err: ConfigError) -> Self {
        CohortError::config(err.code(), err.to_string())
    }
}

/// Serialization format of a mapping document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Xml,
    Json,
}

impl ConfigFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xml") => Ok(Self::Xml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) => Err(ConfigError::UnsupportedFormat(format!(
                ".{} (expected .xml or .json)",
                ext
            ))),
            None => Err(ConfigError::UnsupportedFormat(
                "no file extension (expected .xml or .json)".to_string(),
            )),
        }
    }
}

/// Root of a mapping document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingDocument {
    /// Library header; `{0}` is the entity type, `{1}` the codesystem block
    #[serde(default)]
    pub preamble: Option<String>,
    #[serde(default, rename = "entry")]
    pub entries: Vec<EntryConfig>,
}

/// Mapping for one data element key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryConfig {
    #[serde(default)]
    pub key: String,
    #[serde(default, rename = "codesystem")]
    pub codesystems: Vec<CodeSystem>,
    #[serde(default)]
    pub extension_url: Option<String>,
    #[serde(default, rename = "permittedValue")]
    pub permitted_values: Vec<PermittedValueConfig>,
    #[serde(default, rename = "entityType")]
    pub entity_types: Vec<EntityTypeConfig>,
}

/// Translation of a raw portal value into its CQL literal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermittedValueConfig {
    #[serde(default)]
    pub raw: String,
    #[serde(default)]
    pub target: String,
}

/// Templates of one key for one entity type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityTypeConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path_template: Option<String>,
    #[serde(default, rename = "atomicTemplate")]
    pub atomic_templates: Vec<AtomicTemplateConfig>,
    #[serde(default, rename = "singleton")]
    pub singletons: Vec<String>,
}

/// Atomic expression template for one operator symbol (or `DEFAULT`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomicTemplateConfig {
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub template: String,
}

/// Parse a mapping document from XML
pub fn parse_xml(xml_content: &str) -> Result<MappingDocument, ConfigError> {
    Ok(quick_xml::de::from_str(xml_content)?)
}

/// Parse a mapping document from JSON
pub fn parse_json(json_content: &str) -> Result<MappingDocument, ConfigError> {
    Ok(serde_json::from_str(json_content)?)
}

/// Parse a mapping document in the given format
pub fn parse_document(content: &str, format: ConfigFormat) -> Result<MappingDocument, ConfigError> {
    match format {
        ConfigFormat::Xml => parse_xml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

/// Read and parse a mapping document, detecting the format by extension
pub fn read_document(path: impl AsRef<Path>) -> Result<MappingDocument, ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    parse_document(&content, format)
}
