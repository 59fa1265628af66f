//! Mapping store for the cohort query compiler
//!
//! This crate provides:
//! - The mapping document model, readable from XML and JSON
//! - [`MappingStore`], the read-only lookup tables built from that document
//! - Positional template formatting with message-format quoting rules
//! - Coding system definitions
//! - A bundled BBMRI mapping document

pub mod bundled;
pub mod codesystem;
pub mod config;
pub mod store;
mod tables;
pub mod template;

pub use bundled::*;
pub use codesystem::*;
pub use config::*;
pub use store::*;
pub use template::*;
