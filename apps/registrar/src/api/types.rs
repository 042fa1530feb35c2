//! # API Request/Response Types
//!
//! The urlencoded student form and the JSON health response.

use chrono::NaiveDate;
use registrar_core::{Field, Major, Student, Violations};
use serde::{Deserialize, Serialize};

/// Binding messages for values that cannot be converted at all.
pub mod messages {
    pub const DATE_OF_BIRTH_INVALID: &str = "date of birth must be a valid date";
    pub const MAJOR_INVALID: &str = "major must be one of the listed values";
}

/// Date format used by `<input type="date">`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// STUDENT FORM
// =============================================================================

/// A submitted student form, exactly as the browser sent it.
///
/// Every field is optional on the wire. Unknown fields (including any `id`)
/// are ignored: identity comes from the request path only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub student_code: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub gender: String,
    /// Checkbox: absent when unticked.
    #[serde(default)]
    pub agreed_to_terms: Option<String>,
}

/// Result of binding a form onto a `Student`.
#[derive(Debug, Clone, Default)]
pub struct Bound {
    /// The record with every convertible value filled in; no identity.
    pub student: Student,
    /// Conversion failures only; validation has not run yet.
    pub violations: Violations,
    /// The raw date text when it could not be parsed, for re-display.
    pub rejected_date_of_birth: Option<String>,
}

impl StudentForm {
    /// Convert the raw fields into a `Student`.
    ///
    /// Text fields are taken verbatim. Empty `date_of_birth`/`major` bind to
    /// `None` and are left for validation to report; values that are present
    /// but unparseable are recorded as binding violations.
    #[must_use]
    pub fn bind(self) -> Bound {
        let mut violations = Violations::new();
        let mut rejected_date_of_birth = None;

        let date_of_birth = match self.date_of_birth.trim() {
            "" => None,
            raw => match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    violations.push(Field::DateOfBirth, messages::DATE_OF_BIRTH_INVALID);
                    rejected_date_of_birth = Some(self.date_of_birth.clone());
                    None
                }
            },
        };

        let major = match self.major.trim() {
            "" => None,
            raw => match raw.parse::<Major>() {
                Ok(major) => Some(major),
                Err(_) => {
                    violations.push(Field::Major, messages::MAJOR_INVALID);
                    None
                }
            },
        };

        let agreed_to_terms = self
            .agreed_to_terms
            .as_deref()
            .is_some_and(is_checked);

        Bound {
            student: Student {
                id: None,
                name: self.name,
                student_code: self.student_code,
                date_of_birth,
                major,
                notes: self.notes,
                gender: self.gender,
                agreed_to_terms,
            },
            violations,
            rejected_date_of_birth,
        }
    }
}

fn is_checked(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "on" | "true" | "yes" | "1"
    )
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> StudentForm {
        StudentForm {
            name: "Hoang Thi E".to_string(),
            student_code: "HTE20240".to_string(),
            date_of_birth: "2004-02-29".to_string(),
            major: "GRAPHIC_DESIGN".to_string(),
            notes: "likes typography".to_string(),
            gender: "Female".to_string(),
            agreed_to_terms: Some("on".to_string()),
        }
    }

    #[test]
    fn binds_every_field() {
        let bound = filled().bind();
        assert!(bound.violations.is_empty());
        assert_eq!(bound.student.name, "Hoang Thi E");
        assert_eq!(bound.student.date_of_birth, NaiveDate::from_ymd_opt(2004, 2, 29));
        assert_eq!(bound.student.major, Some(Major::GraphicDesign));
        assert!(bound.student.agreed_to_terms);
        assert!(bound.student.id.is_none());
    }

    #[test]
    fn unticked_checkbox_is_false() {
        let form = StudentForm {
            agreed_to_terms: None,
            ..filled()
        };
        assert!(!form.bind().student.agreed_to_terms);

        let form = StudentForm {
            agreed_to_terms: Some("off".to_string()),
            ..filled()
        };
        assert!(!form.bind().student.agreed_to_terms);
    }

    #[test]
    fn checkbox_accepts_common_truthy_values() {
        for value in ["on", "true", "TRUE", "yes", "1"] {
            let form = StudentForm {
                agreed_to_terms: Some(value.to_string()),
                ..filled()
            };
            assert!(form.bind().student.agreed_to_terms, "{value}");
        }
    }

    #[test]
    fn empty_date_and_major_are_absent_not_invalid() {
        let form = StudentForm {
            date_of_birth: String::new(),
            major: String::new(),
            ..filled()
        };
        let bound = form.bind();
        assert!(bound.violations.is_empty());
        assert!(bound.student.date_of_birth.is_none());
        assert!(bound.student.major.is_none());
    }

    #[test]
    fn malformed_date_is_a_binding_violation() {
        let form = StudentForm {
            date_of_birth: "31/12/2001".to_string(),
            ..filled()
        };
        let bound = form.bind();
        let found: Vec<_> = bound.violations.for_field(Field::DateOfBirth).collect();
        assert_eq!(found, vec![messages::DATE_OF_BIRTH_INVALID]);
        assert_eq!(bound.rejected_date_of_birth.as_deref(), Some("31/12/2001"));
    }

    #[test]
    fn unknown_major_is_a_binding_violation() {
        let form = StudentForm {
            major: "information_technology".to_string(),
            ..filled()
        };
        let bound = form.bind();
        assert!(bound.violations.has_field(Field::Major));
        assert!(bound.student.major.is_none());
    }

    #[test]
    fn text_fields_are_not_trimmed() {
        let form = StudentForm {
            name: "  Padded  ".to_string(),
            ..filled()
        };
        assert_eq!(form.bind().student.name, "  Padded  ");
    }
}
