//! Canonical text rendering of typed values

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared type of a field's values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueType {
    #[default]
    String,
    Integer,
    Decimal,
    /// Calendar date, `YYYY-MM-DD`
    Date,
    /// Local date and time, `YYYY-MM-DDTHH:MM:SS`
    #[serde(alias = "dateTime")]
    Datetime,
    /// Enumerated value from a permitted value list
    PermittedValue,
}

impl ValueType {
    /// Check whether `value` is valid canonical text for this type
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Self::String => true,
            Self::Integer => value.parse::<i64>().is_ok(),
            Self::Decimal => Decimal::from_str(value).is_ok(),
            Self::Date => value.parse::<NaiveDate>().is_ok(),
            Self::Datetime => value.parse::<NaiveDateTime>().is_ok(),
            Self::PermittedValue => !value.trim().is_empty(),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::PermittedValue => "permittedValue",
        };
        f.write_str(name)
    }
}

/// Values that can be rendered as the canonical text a condition carries
pub trait CanonicalValue {
    fn canonical(&self) -> String;
}

impl CanonicalValue for str {
    fn canonical(&self) -> String {
        self.to_string()
    }
}

impl CanonicalValue for String {
    fn canonical(&self) -> String {
        self.clone()
    }
}

impl<T: CanonicalValue + ?Sized> CanonicalValue for &T {
    fn canonical(&self) -> String {
        (**self).canonical()
    }
}

macro_rules! canonical_via_display {
    ($($ty:ty),*) => {
        $(
            impl CanonicalValue for $ty {
                fn canonical(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

canonical_via_display!(i32, i64, u32, u64, Decimal);

impl CanonicalValue for NaiveDate {
    fn canonical(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }
}

impl CanonicalValue for NaiveDateTime {
    fn canonical(&self) -> String {
        self.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}
