//! # Student Registry
//!
//! A REST API for managing student records, built on axum.
//!
//! ## Features
//!
//! - **CRUD**: create, fetch, full-replacement update and soft delete
//! - **Listing**: filter by status, GPA range and name; sort by any field; paginate
//! - **Validation**: field-level errors derived from `validator` rules
//! - **Pluggable storage**: in-memory store or PostgreSQL (`postgres` feature)
//! - **Configuration**: YAML file plus environment overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use student_registry::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new()
//!         .with_service(InMemoryStudentService::new())
//!         .serve("127.0.0.1:8080")
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod telemetry;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        entity::{Student, StudentId, StudentInput, StudentStatus},
        error::{
            ErrorResponse, FieldValidationError, RequestError, StorageError, StudentError,
            StudentResult, ValidationError,
        },
        field::{FieldValue, StudentField},
        filter::{Predicate, StudentFilter},
        query::{
            ListParams, Page, PageRequest, PaginatedResponse, PaginationMeta, SortDirection,
            SortSpec,
        },
        service::StudentService,
    };

    // === Storage ===
    pub use crate::storage::InMemoryStudentService;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresStudentService;

    // === Config ===
    pub use crate::config::{AppConfig, PaginationConfig, StorageBackend};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::NaiveDate;
    pub use serde::{Deserialize, Serialize};
}
