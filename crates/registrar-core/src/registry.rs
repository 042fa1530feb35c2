//! # Registry
//!
//! The handle request handlers hold for their whole lifetime.
//!
//! A `Registry` owns exactly one storage backend and forwards the gateway
//! operations to it:
//! - `InMemory`: uses `MemoryStore` (fast, volatile)
//! - `Persistent`: uses `RedbStore` for disk-backed ACID storage

use crate::storage::RedbStore;
use crate::store::{MemoryStore, StudentStore};
use crate::{RegistrarError, Student, StudentId};
use std::path::Path;

/// Storage backend for a Registry.
#[derive(Debug)]
pub enum StorageBackend {
    /// In-memory map (fast, volatile).
    InMemory(MemoryStore),
    /// Disk-backed store using redb (ACID, persistent).
    Persistent(RedbStore),
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::InMemory(MemoryStore::new())
    }
}

/// Student registry over a chosen storage backend.
#[derive(Debug, Default)]
pub struct Registry {
    backend: StorageBackend,
}

impl Registry {
    /// Create an empty registry with in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with persistent redb storage.
    ///
    /// Opens or creates a redb database at the given path.
    pub fn with_redb(path: impl AsRef<Path>) -> Result<Self, RegistrarError> {
        let store = RedbStore::open(path)?;
        Ok(Self {
            backend: StorageBackend::Persistent(store),
        })
    }

    /// Check if using persistent storage.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        matches!(self.backend, StorageBackend::Persistent(_))
    }

    fn store(&self) -> &dyn StudentStore {
        match &self.backend {
            StorageBackend::InMemory(s) => s,
            StorageBackend::Persistent(s) => s,
        }
    }

    fn store_mut(&mut self) -> &mut dyn StudentStore {
        match &mut self.backend {
            StorageBackend::InMemory(s) => s,
            StorageBackend::Persistent(s) => s,
        }
    }

    // =========================================================================
    // GATEWAY OPERATIONS
    // =========================================================================

    /// Insert (no id) or update (id present) a student.
    ///
    /// Callers are expected to have validated the record first.
    pub fn save(&mut self, student: Student) -> Result<Student, RegistrarError> {
        self.store_mut().save(student)
    }

    /// All students, ordered by identity.
    pub fn find_all(&self) -> Result<Vec<Student>, RegistrarError> {
        self.store().find_all()
    }

    /// Look up one student.
    pub fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, RegistrarError> {
        self.store().find_by_id(id)
    }

    /// Look up one student, treating absence as `StudentNotFound`.
    pub fn get(&self, id: StudentId) -> Result<Student, RegistrarError> {
        self.find_by_id(id)?
            .ok_or(RegistrarError::StudentNotFound(id))
    }

    /// Delete one student. Unknown identities are a no-op returning `false`.
    pub fn delete_by_id(&mut self, id: StudentId) -> Result<bool, RegistrarError> {
        self.store_mut().delete_by_id(id)
    }

    /// Number of stored students.
    pub fn count(&self) -> Result<usize, RegistrarError> {
        self.store().count()
    }
}
