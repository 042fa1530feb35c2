//! # Record Constraints
//!
//! Fixed limits applied by `crate::validation`.
//!
//! These are compiled into the binary and are immutable at runtime.
//! Lengths are counted in `char`s, not bytes.

/// Minimum length of a student's name.
pub const NAME_MIN_CHARS: usize = 3;

/// Maximum length of a student's name.
pub const NAME_MAX_CHARS: usize = 50;

/// A student code is exactly eight uppercase ASCII letters or digits.
pub const STUDENT_CODE_PATTERN: &str = "^[A-Z0-9]{8}$";

/// Maximum length of the free-text notes.
pub const NOTES_MAX_CHARS: usize = 500;
