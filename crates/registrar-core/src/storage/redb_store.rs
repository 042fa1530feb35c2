//! # redb-backed Student Storage
//!
//! A disk-backed student store using the redb embedded database.
//!
//! Every `save` and `delete_by_id` runs in its own write transaction, so a
//! single-record change is either fully committed or not visible at all.
//! Readers see the last committed state (MVCC).
//!
//! ## Layout
//!
//! - `students`: `StudentId(u64)` -> postcard-encoded `StudentRow`
//! - `metadata`: `"next_student_id"` -> `u64`

use crate::store::StudentStore;
use crate::{Major, RegistrarError, Student, StudentId};
use chrono::NaiveDate;
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Table for students: StudentId(u64) -> serialized StudentRow bytes
const STUDENTS: TableDefinition<u64, &[u8]> = TableDefinition::new("students");

/// Table for metadata: key string -> value u64
const METADATA: TableDefinition<&str, u64> = TableDefinition::new("metadata");

const NEXT_ID_KEY: &str = "next_student_id";

/// The persisted shape of a student: the eight attributes, with `major`
/// kept as its symbolic name rather than an enum discriminant.
#[derive(Debug, Serialize, Deserialize)]
struct StudentRow {
    id: u64,
    name: String,
    student_code: String,
    date_of_birth: Option<NaiveDate>,
    major: Option<String>,
    notes: String,
    gender: String,
    agreed_to_terms: bool,
}

impl StudentRow {
    fn from_student(id: StudentId, student: &Student) -> Self {
        Self {
            id: id.0,
            name: student.name.clone(),
            student_code: student.student_code.clone(),
            date_of_birth: student.date_of_birth,
            major: student.major.map(|m| m.as_str().to_string()),
            notes: student.notes.clone(),
            gender: student.gender.clone(),
            agreed_to_terms: student.agreed_to_terms,
        }
    }

    fn into_student(self) -> Result<Student, RegistrarError> {
        let major = self
            .major
            .map(|m| m.parse::<Major>())
            .transpose()
            .map_err(|e| RegistrarError::DeserializationError(e.to_string()))?;

        Ok(Student {
            id: Some(StudentId(self.id)),
            name: self.name,
            student_code: self.student_code,
            date_of_birth: self.date_of_birth,
            major,
            notes: self.notes,
            gender: self.gender,
            agreed_to_terms: self.agreed_to_terms,
        })
    }
}

fn decode(bytes: &[u8]) -> Result<Student, RegistrarError> {
    postcard::from_bytes::<StudentRow>(bytes)
        .map_err(|e| RegistrarError::DeserializationError(e.to_string()))?
        .into_student()
}

/// A disk-backed student store using redb.
pub struct RedbStore {
    /// The redb database handle.
    db: Database,
    /// Next identity to hand out; mirrors `metadata.next_student_id`.
    next_id: u64,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore")
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create a student database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RegistrarError> {
        let db =
            Database::create(path.as_ref()).map_err(|e| RegistrarError::IoError(e.to_string()))?;

        // Initialize tables if they don't exist
        {
            let write_txn = db
                .begin_write()
                .map_err(|e| RegistrarError::IoError(e.to_string()))?;
            let _ = write_txn
                .open_table(STUDENTS)
                .map_err(|e| RegistrarError::IoError(e.to_string()))?;
            let _ = write_txn
                .open_table(METADATA)
                .map_err(|e| RegistrarError::IoError(e.to_string()))?;
            write_txn
                .commit()
                .map_err(|e| RegistrarError::IoError(e.to_string()))?;
        }

        let next_id = {
            let read_txn = db
                .begin_read()
                .map_err(|e| RegistrarError::IoError(e.to_string()))?;
            let table = read_txn
                .open_table(METADATA)
                .map_err(|e| RegistrarError::IoError(e.to_string()))?;
            table
                .get(NEXT_ID_KEY)
                .map_err(|e| RegistrarError::IoError(e.to_string()))?
                .map(|v| v.value())
                .unwrap_or(1)
        };

        Ok(Self { db, next_id })
    }
}

// =============================================================================
// STUDENTSTORE TRAIT IMPLEMENTATION
// =============================================================================

impl StudentStore for RedbStore {
    fn save(&mut self, mut student: Student) -> Result<Student, RegistrarError> {
        let mut next_id = self.next_id;

        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| RegistrarError::IoError(e.to_string()))?;
        {
            let mut students_table = write_txn
                .open_table(STUDENTS)
                .map_err(|e| RegistrarError::IoError(e.to_string()))?;

            let id = match student.id {
                Some(id) => {
                    let exists = students_table
                        .get(id.0)
                        .map_err(|e| RegistrarError::IoError(e.to_string()))?
                        .is_some();
                    if !exists {
                        return Err(RegistrarError::StudentNotFound(id));
                    }
                    id
                }
                None => {
                    let id = StudentId(next_id);
                    next_id = next_id.saturating_add(1);

                    let mut meta_table = write_txn
                        .open_table(METADATA)
                        .map_err(|e| RegistrarError::IoError(e.to_string()))?;
                    meta_table
                        .insert(NEXT_ID_KEY, next_id)
                        .map_err(|e| RegistrarError::IoError(e.to_string()))?;
                    id
                }
            };

            let row_bytes = postcard::to_allocvec(&StudentRow::from_student(id, &student))
                .map_err(|e| RegistrarError::SerializationError(e.to_string()))?;
            students_table
                .insert(id.0, row_bytes.as_slice())
                .map_err(|e| RegistrarError::IoError(e.to_string()))?;

            student.id = Some(id);
        }
        write_txn
            .commit()
            .map_err(|e| RegistrarError::IoError(e.to_string()))?;

        // Only advance the in-memory counter once the commit succeeded.
        self.next_id = next_id;
        Ok(student)
    }

    fn find_all(&self) -> Result<Vec<Student>, RegistrarError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| RegistrarError::IoError(e.to_string()))?;
        let students_table = read_txn
            .open_table(STUDENTS)
            .map_err(|e| RegistrarError::IoError(e.to_string()))?;

        let mut students = Vec::new();
        for entry in students_table
            .iter()
            .map_err(|e| RegistrarError::IoError(e.to_string()))?
        {
            let (_, value) = entry.map_err(|e| RegistrarError::IoError(e.to_string()))?;
            students.push(decode(value.value())?);
        }
        Ok(students)
    }

    fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, RegistrarError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| RegistrarError::IoError(e.to_string()))?;
        let students_table = read_txn
            .open_table(STUDENTS)
            .map_err(|e| RegistrarError::IoError(e.to_string()))?;

        match students_table
            .get(id.0)
            .map_err(|e| RegistrarError::IoError(e.to_string()))?
        {
            Some(data) => Ok(Some(decode(data.value())?)),
            None => Ok(None),
        }
    }

    fn delete_by_id(&mut self, id: StudentId) -> Result<bool, RegistrarError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| RegistrarError::IoError(e.to_string()))?;
        let removed = {
            let mut students_table = write_txn
                .open_table(STUDENTS)
                .map_err(|e| RegistrarError::IoError(e.to_string()))?;
            let previous = students_table
                .remove(id.0)
                .map_err(|e| RegistrarError::IoError(e.to_string()))?;
            previous.is_some()
        };
        write_txn
            .commit()
            .map_err(|e| RegistrarError::IoError(e.to_string()))?;
        Ok(removed)
    }

    fn count(&self) -> Result<usize, RegistrarError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| RegistrarError::IoError(e.to_string()))?;
        let students_table = read_txn
            .open_table(STUDENTS)
            .map_err(|e| RegistrarError::IoError(e.to_string()))?;
        let count = students_table
            .len()
            .map_err(|e| RegistrarError::IoError(e.to_string()))?;
        Ok(count as usize)
    }
}

// =============================================================================
// TESTS
// =============================================================================
