//! Service trait for student record storage

use crate::core::entity::{Student, StudentId, StudentInput};
use crate::core::error::StudentResult;
use crate::core::filter::Predicate;
use crate::core::query::{Page, PageRequest};
use async_trait::async_trait;

/// Record store for students
///
/// Implementations own persistence only; they are agnostic to HTTP. Every
/// mutating operation is atomic: it either applies completely or leaves the
/// store untouched.
#[async_trait]
pub trait StudentService: Send + Sync {
    /// Validate the candidate, assign a fresh id and persist it
    async fn create(&self, input: StudentInput) -> StudentResult<Student>;

    /// Get a record by id, `NotFound` if absent
    async fn get(&self, id: StudentId) -> StudentResult<Student>;

    /// Replace every field of an existing record except its id
    ///
    /// Fails with `NotFound` (creating nothing) when no record exists at `id`.
    async fn update(&self, id: StudentId, input: StudentInput) -> StudentResult<Student>;

    /// Mark a record `INACTIVE` without removing it
    async fn soft_delete(&self, id: StudentId) -> StudentResult<()>;

    /// One page of the records matching `predicate`, in the requested order
    async fn list(&self, predicate: &Predicate, page: &PageRequest) -> StudentResult<Page<Student>>;

    /// Number of stored records, active or not
    async fn count(&self) -> StudentResult<usize>;
}
