//! # Student Store
//!
//! The persistence gateway for student records.
//!
//! This module defines the `StudentStore` trait and `MemoryStore`, the
//! volatile implementation. `crate::storage::RedbStore` is the durable one.

use crate::{RegistrarError, Student, StudentId};
use std::collections::BTreeMap;

// =============================================================================
// STUDENTSTORE TRAIT
// =============================================================================

/// Create/read/delete access to persisted students.
///
/// Identities start at 1, only grow, and are never reused after a delete.
pub trait StudentStore {
    /// Insert or update a student and return the stored record.
    ///
    /// With `id == None` the student is inserted under a fresh identity.
    /// With `id == Some(x)` the record stored under `x` is replaced; if no
    /// such record exists this fails with `RegistrarError::StudentNotFound`.
    fn save(&mut self, student: Student) -> Result<Student, RegistrarError>;

    /// All stored students, ordered by identity.
    fn find_all(&self) -> Result<Vec<Student>, RegistrarError>;

    /// The student stored under `id`, if any.
    fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, RegistrarError>;

    /// Remove the student stored under `id`.
    ///
    /// Returns `false` when nothing was stored there; that is not an error.
    fn delete_by_id(&mut self, id: StudentId) -> Result<bool, RegistrarError>;

    /// Number of stored students.
    fn count(&self) -> Result<usize, RegistrarError>;
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-memory student store.
///
/// Uses `BTreeMap` so `find_all` comes back in identity order for free.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    students: BTreeMap<StudentId, Student>,
    next_id: u64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            students: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StudentStore for MemoryStore {
    fn save(&mut self, mut student: Student) -> Result<Student, RegistrarError> {
        let id = match student.id {
            Some(id) => {
                if !self.students.contains_key(&id) {
                    return Err(RegistrarError::StudentNotFound(id));
                }
                id
            }
            None => {
                let id = StudentId(self.next_id);
                self.next_id = self.next_id.saturating_add(1);
                id
            }
        };

        student.id = Some(id);
        self.students.insert(id, student.clone());
        Ok(student)
    }

    fn find_all(&self) -> Result<Vec<Student>, RegistrarError> {
        Ok(self.students.values().cloned().collect())
    }

    fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, RegistrarError> {
        Ok(self.students.get(&id).cloned())
    }

    fn delete_by_id(&mut self, id: StudentId) -> Result<bool, RegistrarError> {
        Ok(self.students.remove(&id).is_some())
    }

    fn count(&self) -> Result<usize, RegistrarError> {
        Ok(self.students.len())
    }
}

// =============================================================================
// TESTS
// =============================================================================
