//! The query DTO and its field groups

use crate::Field;
use octofhir_cohort_diagnostics::{COH0200, CohortError, Diagnostic};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Subject category a field group describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldCategory {
    Donor,
    Sample,
    SampleContext,
    Event,
}

impl FieldCategory {
    /// All categories in enumeration order
    pub const ALL: [FieldCategory; 4] = [
        FieldCategory::Donor,
        FieldCategory::Sample,
        FieldCategory::SampleContext,
        FieldCategory::Event,
    ];
}

impl fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Donor => "donor",
            Self::Sample => "sample",
            Self::SampleContext => "sampleContext",
            Self::Event => "event",
        };
        f.write_str(name)
    }
}

/// Ordered list of fields belonging to one category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldGroup {
    pub fields: Vec<Field>,
}

impl FieldGroup {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }
}

impl<'a> IntoIterator for &'a FieldGroup {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl FromIterator<Field> for FieldGroup {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Structured search criteria as submitted through the portal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryDto {
    pub donor: FieldGroup,
    pub sample: FieldGroup,
    pub sample_context: FieldGroup,
    pub event: FieldGroup,
}

impl QueryDto {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query from its JSON wire form
    pub fn from_json(json: &str) -> Result<Self, CohortError> {
        serde_json::from_str(json)
            .map_err(|e| CohortError::query(COH0200, format!("Invalid query document: {}", e)))
    }

    /// Serialize to the JSON wire form
    pub fn to_json(&self) -> Result<String, CohortError> {
        serde_json::to_string(self)
            .map_err(|e| CohortError::query(COH0200, format!("Cannot serialize query: {}", e)))
    }

    /// Group for a category
    pub fn group(&self, category: FieldCategory) -> &FieldGroup {
        match category {
            FieldCategory::Donor => &self.donor,
            FieldCategory::Sample => &self.sample,
            FieldCategory::SampleContext => &self.sample_context,
            FieldCategory::Event => &self.event,
        }
    }

    /// Mutable group for a category
    pub fn group_mut(&mut self, category: FieldCategory) -> &mut FieldGroup {
        match category {
            FieldCategory::Donor => &mut self.donor,
            FieldCategory::Sample => &mut self.sample,
            FieldCategory::SampleContext => &mut self.sample_context,
            FieldCategory::Event => &mut self.event,
        }
    }

    /// Add a field to a category, builder style
    pub fn with_field(mut self, category: FieldCategory, field: Field) -> Self {
        self.group_mut(category).push(field);
        self
    }

    /// Groups in enumeration order: donor, sample, sample context, event
    pub fn groups(&self) -> impl Iterator<Item = (FieldCategory, &FieldGroup)> {
        FieldCategory::ALL
            .into_iter()
            .map(move |category| (category, self.group(category)))
    }

    /// All fields, flattened in group enumeration order
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.groups().flat_map(|(_, group)| group.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.groups().all(|(_, group)| group.is_empty())
    }

    /// Validate every field value against its declared type
    pub fn validate(&self) -> Vec<Diagnostic> {
        self.fields().flat_map(Field::validate).collect()
    }
}
