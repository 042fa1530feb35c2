//! # Student Validation
//!
//! Validation is a pure function from a `Student` to the complete set of
//! constraint violations. Every rule is evaluated; nothing short-circuits,
//! so a form can report all problems at once.
//!
//! | Field             | Rule                                   |
//! |-------------------|----------------------------------------|
//! | `name`            | not blank, 3–50 chars                  |
//! | `student_code`    | not blank, `^[A-Z0-9]{8}$`             |
//! | `date_of_birth`   | present, strictly before today         |
//! | `major`           | present                                |
//! | `notes`           | at most 500 chars                      |
//! | `gender`          | not blank                              |
//! | `agreed_to_terms` | true                                   |

use crate::Student;
use crate::constraints::{NAME_MAX_CHARS, NAME_MIN_CHARS, NOTES_MAX_CHARS, STUDENT_CODE_PATTERN};
use chrono::{Local, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static STUDENT_CODE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(STUDENT_CODE_PATTERN).expect("student code pattern compiles")
});

/// Violation messages, one per rule.
///
/// Limits quoted in the text must match `crate::constraints`.
pub mod messages {
    pub const NAME_BLANK: &str = "name must not be empty";
    pub const NAME_LENGTH: &str = "name must be 3–50 characters";
    pub const CODE_BLANK: &str = "code must not be empty";
    pub const CODE_FORMAT: &str = "code must be 8 uppercase letters/digits";
    pub const DATE_OF_BIRTH_MISSING: &str = "date of birth is required";
    pub const DATE_OF_BIRTH_NOT_PAST: &str = "date of birth must be in the past";
    pub const MAJOR_MISSING: &str = "major is required";
    pub const NOTES_TOO_LONG: &str = "notes too long";
    pub const GENDER_BLANK: &str = "gender is required";
    pub const TERMS_NOT_ACCEPTED: &str = "must agree to terms";
}

// =============================================================================
// FIELDS & VIOLATIONS
// =============================================================================

/// A validated field of `Student`. The identity is never validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    StudentCode,
    DateOfBirth,
    Major,
    Notes,
    Gender,
    AgreedToTerms,
}

impl Field {
    /// The form field name this rule reports against.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::StudentCode => "student_code",
            Field::DateOfBirth => "date_of_birth",
            Field::Major => "major",
            Field::Notes => "notes",
            Field::Gender => "gender",
            Field::AgreedToTerms => "agreed_to_terms",
        }
    }
}

/// One failed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    pub field: Field,
    pub message: &'static str,
}

/// All violations from one validation pass, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation.
    pub fn push(&mut self, field: Field, message: &'static str) {
        self.0.push(Violation { field, message });
    }

    /// True when no rule failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether any violation is reported against `field`.
    #[must_use]
    pub fn has_field(&self, field: Field) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    /// Messages reported against `field`, in rule order.
    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &'static str> + '_ {
        self.0
            .iter()
            .filter(move |v| v.field == field)
            .map(|v| v.message)
    }

    /// Append violations for fields that have none yet.
    ///
    /// A field that already failed (e.g. could not be parsed from the form)
    /// keeps only its existing messages.
    pub fn merge_uncovered(&mut self, other: Violations) {
        let covered: Vec<Field> = self.0.iter().map(|v| v.field).collect();
        self.0
            .extend(other.0.into_iter().filter(|v| !covered.contains(&v.field)));
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Validate against the local calendar date.
#[must_use]
pub fn validate(student: &Student) -> Violations {
    validate_at(student, Local::now().date_naive())
}

/// Validate with an explicit notion of "today".
#[must_use]
pub fn validate_at(student: &Student, today: NaiveDate) -> Violations {
    let mut violations = Violations::new();

    if is_blank(&student.name) {
        violations.push(Field::Name, messages::NAME_BLANK);
    }
    let name_len = student.name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name_len) {
        violations.push(Field::Name, messages::NAME_LENGTH);
    }

    if is_blank(&student.student_code) {
        violations.push(Field::StudentCode, messages::CODE_BLANK);
    }
    if !STUDENT_CODE.is_match(&student.student_code) {
        violations.push(Field::StudentCode, messages::CODE_FORMAT);
    }

    match student.date_of_birth {
        None => violations.push(Field::DateOfBirth, messages::DATE_OF_BIRTH_MISSING),
        Some(date) if date >= today => {
            violations.push(Field::DateOfBirth, messages::DATE_OF_BIRTH_NOT_PAST);
        }
        Some(_) => {}
    }

    if student.major.is_none() {
        violations.push(Field::Major, messages::MAJOR_MISSING);
    }

    if student.notes.chars().count() > NOTES_MAX_CHARS {
        violations.push(Field::Notes, messages::NOTES_TOO_LONG);
    }

    if is_blank(&student.gender) {
        violations.push(Field::Gender, messages::GENDER_BLANK);
    }

    if !student.agreed_to_terms {
        violations.push(Field::AgreedToTerms, messages::TERMS_NOT_ACCEPTED);
    }

    violations
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

// =============================================================================
// TESTS
// =============================================================================
