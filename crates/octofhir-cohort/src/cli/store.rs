//! Mapping store resolution for CLI commands

use anyhow::{Context, Result};
use octofhir_cohort_mapping::{MappingStore, bbmri_store};
use std::path::Path;

/// Load the mapping store from `path`, or the bundled BBMRI mapping when no
/// path is given. Unlike the library loaders, a broken file is an error here.
pub fn load_store(path: Option<&Path>) -> Result<MappingStore> {
    match path {
        Some(path) => MappingStore::try_load_file(path)
            .with_context(|| format!("Failed to load mapping configuration: {}", path.display())),
        None => {
            log::debug!("No --config given, using the bundled BBMRI mapping");
            Ok(bbmri_store())
        }
    }
}

/// Human-readable origin of the store for messages
pub fn describe(path: Option<&Path>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "bundled BBMRI mapping".to_string(),
    }
}
