//! Coding system references

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An external controlled vocabulary referenced by the generated library
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct CodeSystem {
    /// Local name used inside the library (e.g. "SampleMaterialType")
    #[serde(default)]
    pub name: String,
    /// Canonical URL of the vocabulary
    #[serde(default)]
    pub url: String,
}

impl CodeSystem {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Both name and URL are present
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.url.trim().is_empty()
    }

    /// CQL `codesystem` statement for this system
    pub fn definition(&self) -> String {
        format!("codesystem {}: '{}'", self.name, self.url)
    }
}

impl fmt::Display for CodeSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.url)
    }
}

/// Error returned when a `NAME=URL` pair cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected NAME=URL, got '{0}'")]
pub struct CodeSystemParseError(pub String);

impl FromStr for CodeSystem {
    type Err = CodeSystemParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, url) = s
            .split_once('=')
            .ok_or_else(|| CodeSystemParseError(s.to_string()))?;
        let system = Self::new(name.trim(), url.trim());
        if system.is_complete() {
            Ok(system)
        } else {
            Err(CodeSystemParseError(s.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_format() {
        let system = CodeSystem::new("Gender", "http://example/gender");
        assert_eq!(system.definition(), "codesystem Gender: 'http://example/gender'");
    }

    #[test]
    fn test_blank_parts_are_incomplete() {
        assert!(!CodeSystem::new("Gender", " ").is_complete());
        assert!(!CodeSystem::new("", "http://example").is_complete());
        assert!(CodeSystem::new("A", "b").is_complete());
    }

    #[test]
    fn test_parse_name_url_pair() {
        let system: CodeSystem = "icd10 = http://hl7.org/fhir/sid/icd-10".parse().unwrap();
        assert_eq!(system.name, "icd10");
        assert_eq!(system.url, "http://hl7.org/fhir/sid/icd-10");

        assert!("no-separator".parse::<CodeSystem>().is_err());
        assert!("name=".parse::<CodeSystem>().is_err());
    }
}
