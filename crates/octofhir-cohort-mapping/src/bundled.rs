//! Bundled BBMRI mapping document
//!
//! Embedded mapping for the BBMRI sample locator data elements (gender,
//! diagnosis, donor age, sample material, sampling date, storage temperature).

use crate::config::ConfigFormat;
use crate::store::MappingStore;

/// BBMRI mapping XML (embedded at compile time)
pub const BBMRI_MAPPING_XML: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/resources/bbmri-mapping.xml"));

/// Build a store from the bundled BBMRI mapping
pub fn bbmri_store() -> MappingStore {
    MappingStore::load_str(BBMRI_MAPPING_XML, ConfigFormat::Xml)
}
