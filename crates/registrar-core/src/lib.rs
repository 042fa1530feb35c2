//! # registrar-core
//!
//! The student record model and its persistence gateway.
//!
//! This crate is deliberately synchronous and free of HTTP concerns. It
//! provides:
//! - `types`: `Student`, `StudentId`, `Major`, `RegistrarError`
//! - `validation`: the constraint rules, returning every violation at once
//! - `store`: the `StudentStore` trait and the in-memory implementation
//! - `storage`: the redb-backed implementation
//! - `registry`: the backend-selecting facade handed to request handlers
//!
//! ## Example
//!
//! ```
//! use registrar_core::{Major, Registry, Student, validation};
//!
//! let mut registry = Registry::new();
//! let student = Student {
//!     name: "Le Van C".to_string(),
//!     student_code: "LVC00001".to_string(),
//!     date_of_birth: chrono::NaiveDate::from_ymd_opt(1999, 5, 20),
//!     major: Some(Major::InformationTechnology),
//!     gender: "Male".to_string(),
//!     agreed_to_terms: true,
//!     ..Student::new()
//! };
//!
//! assert!(validation::validate(&student).is_empty());
//! let saved = registry.save(student).unwrap();
//! assert!(saved.id.is_some());
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod constraints;
pub mod registry;
pub mod storage;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use registry::{Registry, StorageBackend};
pub use storage::RedbStore;
pub use store::{MemoryStore, StudentStore};
pub use types::{Major, RegistrarError, Student, StudentId, UnknownMajor};
pub use validation::{Field, Violation, Violations, validate, validate_at};
