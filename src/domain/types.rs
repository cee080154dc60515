//! Strongly-typed value objects used by list screens.
//!
//! These wrappers enforce basic invariants (non-empty identifiers, known
//! status codes, supported export formats) so that once a value reaches the
//! controller it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Requested export format is not supported.
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),
}

/// Trimmed, non-empty row identifier (`companyId`, `shiftId`, ...).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    /// Trims the identifier and rejects blank input.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            Err(TypeConstraintError::EmptyString)
        } else {
            Ok(Self(trimmed))
        }
    }

    /// Borrow the identifier as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RowId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Active/inactive filter offered by the status dropdown.
///
/// Travels over the wire as its numeric code (`0` or `1`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActiveStatus {
    Inactive,
    Active,
}

impl ActiveStatus {
    /// Numeric code understood by the backend.
    pub const fn code(self) -> u8 {
        match self {
            ActiveStatus::Inactive => 0,
            ActiveStatus::Active => 1,
        }
    }
}

impl TryFrom<i64> for ActiveStatus {
    type Error = TypeConstraintError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ActiveStatus::Inactive),
            1 => Ok(ActiveStatus::Active),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown active status {other}"
            ))),
        }
    }
}

impl FromStr for ActiveStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s
            .trim()
            .parse::<i64>()
            .map_err(|_| TypeConstraintError::InvalidValue(format!("unknown active status {s}")))?;
        Self::try_from(code)
    }
}

impl Serialize for ActiveStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for ActiveStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = i64::deserialize(deserializer)?;
        Self::try_from(code).map_err(serde::de::Error::custom)
    }
}

/// Formats accepted by the export sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// File extension used for exported files.
    pub const fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(TypeConstraintError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}
