//! # Core Type Definitions
//!
//! This module contains the record model for the registrar:
//! - Record identity (`StudentId`)
//! - The selectable majors (`Major`)
//! - The student record itself (`Student`)
//! - Error types (`RegistrarError`)
//!
//! ## Identity
//!
//! A `Student` carries `id: None` until a store persists it. Stores assign
//! identities from a monotonic counter; callers never invent them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Store-assigned identity of a persisted student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StudentId(pub u64);

impl StudentId {
    /// Get the raw identity value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// MAJOR
// =============================================================================

/// A field of study a student can be enrolled in.
///
/// The set is closed and ordered. Only the symbolic name is ever stored;
/// the label is for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Major {
    InformationTechnology,
    BusinessAdministration,
    GraphicDesign,
    Marketing,
}

impl Major {
    /// Every major, in display order.
    pub const ALL: [Major; 4] = [
        Major::InformationTechnology,
        Major::BusinessAdministration,
        Major::GraphicDesign,
        Major::Marketing,
    ];

    /// The symbolic name, as persisted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Major::InformationTechnology => "INFORMATION_TECHNOLOGY",
            Major::BusinessAdministration => "BUSINESS_ADMINISTRATION",
            Major::GraphicDesign => "GRAPHIC_DESIGN",
            Major::Marketing => "MARKETING",
        }
    }

    /// Human-readable label for selection widgets.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Major::InformationTechnology => "Information Technology",
            Major::BusinessAdministration => "Business Administration",
            Major::GraphicDesign => "Graphic Design",
            Major::Marketing => "Marketing",
        }
    }
}

impl fmt::Display for Major {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not the symbolic name of any major.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown major: {0}")]
pub struct UnknownMajor(pub String);

impl FromStr for Major {
    type Err = UnknownMajor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Major::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMajor(s.to_string()))
    }
}

// =============================================================================
// STUDENT
// =============================================================================

/// A student record.
///
/// Fields are public: the record is plain data that forms bind into and
/// stores persist. `crate::validation::validate` decides whether it may be
/// saved.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Student {
    /// Identity; `None` until first persisted.
    pub id: Option<StudentId>,
    /// Full name.
    pub name: String,
    /// Eight uppercase letters or digits.
    pub student_code: String,
    /// Must lie strictly before today.
    pub date_of_birth: Option<NaiveDate>,
    pub major: Option<Major>,
    /// Optional free text; empty means none.
    pub notes: String,
    pub gender: String,
    /// One-way consent flag.
    pub agreed_to_terms: bool,
}

impl Student {
    /// Create an empty, unsaved student (the blank "new" form).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the registrar core.
///
/// Validation failures are not errors; they are reported as
/// `crate::validation::Violations`.
#[derive(Debug, Error)]
pub enum RegistrarError {
    /// No student is stored under the given identity.
    #[error("Student not found: {0}")]
    StudentNotFound(StudentId),

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A stored record could not be decoded.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
