//! In-memory implementation of StudentService for testing and development

use crate::core::entity::{Student, StudentId, StudentInput};
use crate::core::error::{StorageError, StudentError, StudentResult};
use crate::core::filter::Predicate;
use crate::core::query::{Page, PageRequest};
use crate::core::service::StudentService;
use crate::core::store::QueryableStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Rows keyed by id plus the id sequence
#[derive(Debug)]
struct StudentTable {
    rows: BTreeMap<StudentId, Student>,
    next_id: StudentId,
}

impl Default for StudentTable {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl QueryableStore for StudentTable {
    fn list_all(&self) -> Vec<Student> {
        self.rows.values().cloned().collect()
    }
}

/// In-memory student service implementation
///
/// Useful for testing and development. Every operation runs under a single
/// `RwLock` guard, so mutations are atomic. Ids start at 1 and are never
/// reused.
#[derive(Clone, Default)]
pub struct InMemoryStudentService {
    table: Arc<RwLock<StudentTable>>,
}

impl InMemoryStudentService {
    /// Create a new, empty in-memory student service
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StudentResult<RwLockReadGuard<'_, StudentTable>> {
        self.table.read().map_err(|e| {
            StorageError::LockPoisoned {
                message: format!("Failed to acquire read lock: {}", e),
            }
            .into()
        })
    }

    fn write(&self) -> StudentResult<RwLockWriteGuard<'_, StudentTable>> {
        self.table.write().map_err(|e| {
            StorageError::LockPoisoned {
                message: format!("Failed to acquire write lock: {}", e),
            }
            .into()
        })
    }
}

#[async_trait]
impl StudentService for InMemoryStudentService {
    async fn create(&self, input: StudentInput) -> StudentResult<Student> {
        let mut table = self.write()?;

        let id = table.next_id;
        let student = input.into_student(id)?;
        table.next_id += 1;
        table.rows.insert(id, student.clone());

        tracing::info!(id, "student created");
        Ok(student)
    }

    async fn get(&self, id: StudentId) -> StudentResult<Student> {
        let table = self.read()?;
        table
            .rows
            .get(&id)
            .cloned()
            .ok_or(StudentError::NotFound { id })
    }

    async fn update(&self, id: StudentId, input: StudentInput) -> StudentResult<Student> {
        let mut table = self.write()?;

        if !table.rows.contains_key(&id) {
            return Err(StudentError::NotFound { id });
        }
        let student = input.into_student(id)?;
        table.rows.insert(id, student.clone());

        tracing::info!(id, "student updated");
        Ok(student)
    }

    async fn soft_delete(&self, id: StudentId) -> StudentResult<()> {
        let mut table = self.write()?;

        let student = table
            .rows
            .get_mut(&id)
            .ok_or(StudentError::NotFound { id })?;
        student.deactivate();

        tracing::info!(id, "student deactivated");
        Ok(())
    }

    async fn list(&self, predicate: &Predicate, page: &PageRequest) -> StudentResult<Page<Student>> {
        tracing::debug!(?predicate, page = page.page, size = page.size, sort = %page.sort, "listing students");
        Ok(self.read()?.query(predicate, page))
    }

    async fn count(&self) -> StudentResult<usize> {
        Ok(self.read()?.rows.len())
    }
}
