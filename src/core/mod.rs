//! Core module containing the student model, query types and service contract

pub mod entity;
pub mod error;
pub mod extractors;
pub mod field;
pub mod filter;
pub mod query;
pub mod service;
pub mod store;

pub use entity::{Student, StudentId, StudentInput, StudentStatus};
pub use error::{StudentError, StudentResult};
pub use field::{FieldValue, StudentField};
pub use filter::{Predicate, StudentFilter};
pub use query::{Page, PageRequest, SortSpec};
pub use service::StudentService;
pub use store::QueryableStore;
