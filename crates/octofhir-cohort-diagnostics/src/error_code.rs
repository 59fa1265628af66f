//! Cohort error codes following a structured numbering system
//!
//! Error code ranges:
//! - COH0001-COH0099: Configuration errors (mapping document)
//! - COH0100-COH0199: Mapping errors (missing or unusable templates)
//! - COH0200-COH0299: Query errors (input criteria)
//! - COH0400-COH0499: System errors (I/O)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a configuration error (0001-0099)
    pub const fn is_config_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    /// Check if this is a mapping error (0100-0199)
    pub const fn is_mapping_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is a query error (0200-0299)
    pub const fn is_query_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is a system error (0400-0499)
    pub const fn is_system_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "COH{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Configuration errors (0001-0099)
    map.insert(1, ErrorInfo::new("Configuration unreadable"));
    map.insert(2, ErrorInfo::new("Malformed XML configuration"));
    map.insert(3, ErrorInfo::new("Malformed JSON configuration"));
    map.insert(4, ErrorInfo::new("Unsupported configuration format")
        .with_help("Use a .xml or .json mapping document"));
    map.insert(5, ErrorInfo::new("Entry without key"));
    map.insert(6, ErrorInfo::new("Entity mapping without name"));
    map.insert(7, ErrorInfo::new("Duplicate path template"));
    map.insert(8, ErrorInfo::new("Duplicate atomic template"));
    map.insert(9, ErrorInfo::new("Duplicate permitted value"));
    map.insert(10, ErrorInfo::new("Missing preamble"));

    // Mapping errors (0100-0199)
    map.insert(100, ErrorInfo::new("Missing atomic template")
        .with_help("Add an atomicTemplate for the operator or a DEFAULT entry"));
    map.insert(101, ErrorInfo::new("Missing path template")
        .with_help("Add a pathTemplate for the entity type"));
    map.insert(102, ErrorInfo::new("Malformed template"));
    map.insert(103, ErrorInfo::new("Malformed preamble"));
    map.insert(104, ErrorInfo::new("Between condition without max value"));
    map.insert(105, ErrorInfo::new("Unrecognized condition kind"));

    // Query errors (0200-0299)
    map.insert(200, ErrorInfo::new("Malformed query document"));
    map.insert(201, ErrorInfo::new("Invalid coding system argument"));
    map.insert(202, ErrorInfo::new("Value does not match field type"));

    // System errors (0400-0499)
    map.insert(400, ErrorInfo::new("Internal error"));
    map.insert(401, ErrorInfo::new("I/O error"));
    map.insert(404, ErrorInfo::new("File not found"));

    map
});

// Configuration errors
pub const COH0001: ErrorCode = ErrorCode::new(1);
pub const COH0002: ErrorCode = ErrorCode::new(2);
pub const COH0003: ErrorCode = ErrorCode::new(3);
pub const COH0004: ErrorCode = ErrorCode::new(4);
pub const COH0005: ErrorCode = ErrorCode::new(5);
pub const COH0006: ErrorCode = ErrorCode::new(6);
pub const COH0007: ErrorCode = ErrorCode::new(7);
pub const COH0008: ErrorCode = ErrorCode::new(8);
pub const COH0009: ErrorCode = ErrorCode::new(9);
pub const COH0010: ErrorCode = ErrorCode::new(10);

// Mapping errors
pub const COH0100: ErrorCode = ErrorCode::new(100);
pub const COH0101: ErrorCode = ErrorCode::new(101);
pub const COH0102: ErrorCode = ErrorCode::new(102);
pub const COH0103: ErrorCode = ErrorCode::new(103);
pub const COH0104: ErrorCode = ErrorCode::new(104);
pub const COH0105: ErrorCode = ErrorCode::new(105);

// Query errors
pub const COH0200: ErrorCode = ErrorCode::new(200);
pub const COH0201: ErrorCode = ErrorCode::new(201);
pub const COH0202: ErrorCode = ErrorCode::new(202);

// System errors
pub const COH0400: ErrorCode = ErrorCode::new(400);
pub const COH0401: ErrorCode = ErrorCode::new(401);
pub const COH0404: ErrorCode = ErrorCode::new(404);
