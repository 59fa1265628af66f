//! Value conditions attached to a field

use crate::CanonicalValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison kind of a single value condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SimpleValueCondition {
    /// Equality
    Equals,
    /// Inequality
    NotEquals,
    /// Less than
    Less,
    /// Less than or equal
    LessOrEquals,
    /// Greater than
    Greater,
    /// Greater than or equal
    GreaterOrEquals,
    /// Inclusive range, requires a max value
    Between,
    /// Pattern match
    Like,
    /// Any kind this version does not know about
    #[serde(other)]
    Unknown,
}

impl SimpleValueCondition {
    /// Whether the condition needs a max value
    pub const fn is_range(&self) -> bool {
        matches!(self, Self::Between)
    }
}

impl fmt::Display for SimpleValueCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Equals => "EQUALS",
            Self::NotEquals => "NOT_EQUALS",
            Self::Less => "LESS",
            Self::LessOrEquals => "LESS_OR_EQUALS",
            Self::Greater => "GREATER",
            Self::GreaterOrEquals => "GREATER_OR_EQUALS",
            Self::Between => "BETWEEN",
            Self::Like => "LIKE",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// One condition on a field's value, held as canonical text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueCondition {
    /// Comparison kind
    pub condition: SimpleValueCondition,
    /// Primary value (the lower bound for `Between`)
    pub value: String,
    /// Upper bound, only meaningful for `Between`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<String>,
}

impl ValueCondition {
    /// Create a single-valued condition
    pub fn new(condition: SimpleValueCondition, value: impl CanonicalValue) -> Self {
        Self {
            condition,
            value: value.canonical(),
            max_value: None,
        }
    }

    /// Create an inclusive range condition
    pub fn between(min: impl CanonicalValue, max: impl CanonicalValue) -> Self {
        Self {
            condition: SimpleValueCondition::Between,
            value: min.canonical(),
            max_value: Some(max.canonical()),
        }
    }

    pub fn equals(value: impl CanonicalValue) -> Self {
        Self::new(SimpleValueCondition::Equals, value)
    }

    pub fn not_equals(value: impl CanonicalValue) -> Self {
        Self::new(SimpleValueCondition::NotEquals, value)
    }

    pub fn less(value: impl CanonicalValue) -> Self {
        Self::new(SimpleValueCondition::Less, value)
    }

    pub fn less_or_equals(value: impl CanonicalValue) -> Self {
        Self::new(SimpleValueCondition::LessOrEquals, value)
    }

    pub fn greater(value: impl CanonicalValue) -> Self {
        Self::new(SimpleValueCondition::Greater, value)
    }

    pub fn greater_or_equals(value: impl CanonicalValue) -> Self {
        Self::new(SimpleValueCondition::GreaterOrEquals, value)
    }

    pub fn like(value: impl CanonicalValue) -> Self {
        Self::new(SimpleValueCondition::Like, value)
    }
}
