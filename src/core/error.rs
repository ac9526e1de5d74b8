//! Typed error handling for the student registry
//!
//! Clients can match specific failures instead of dealing with a generic
//! `anyhow::Error`.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: field-level constraint violations on a candidate record
//! - [`StudentError::NotFound`]: an operation referenced a nonexistent id
//! - [`StorageError`]: the underlying store failed
//! - [`RequestError`]: the HTTP request itself was malformed
//!
//! # Example
//!
//! ```rust,ignore
//! match service.get(42).await {
//!     Ok(student) => println!("Found: {:?}", student),
//!     Err(StudentError::NotFound { id }) => println!("Student {} not found", id),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use crate::core::entity::StudentId;
use crate::core::field::StudentField;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type for student operations
#[derive(Debug, Error)]
pub enum StudentError {
    /// The candidate record failed validation; nothing was written
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No record exists at the given id; nothing was written
    #[error("Student with id '{id}' not found")]
    NotFound { id: StudentId },

    /// Storage backend failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Malformed HTTP request
    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl StudentError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            StudentError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            StudentError::NotFound { .. } => StatusCode::NOT_FOUND,
            StudentError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StudentError::Request(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            StudentError::Validation(_) => "VALIDATION_ERROR",
            StudentError::NotFound { .. } => "STUDENT_NOT_FOUND",
            StudentError::Storage(_) => "STORAGE_ERROR",
            StudentError::Request(e) => e.error_code(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            StudentError::NotFound { id } => Some(serde_json::json!({ "id": id })),
            StudentError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for StudentError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// One or more field constraint violations
    #[error("Validation errors: {}", summarize(.0))]
    FieldErrors(Vec<FieldValidationError>),
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn summarize(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    /// The failing fields, in report order
    pub fn fields(&self) -> &[FieldValidationError] {
        match self {
            ValidationError::FieldErrors(errors) => errors,
        }
    }
}

/// Flatten `validator` output into wire-named field errors, ordered by field
impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let name = StudentField::parse(field.as_ref())
                    .map(|f| f.to_string())
                    .unwrap_or_else(|| field.to_string());
                errs.iter()
                    .map(|err| FieldValidationError {
                        field: name.clone(),
                        message: err
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| err.code.to_string()),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        fields.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
        ValidationError::FieldErrors(fields)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Connection error
    #[error("Failed to connect to {backend}: {message}")]
    ConnectionError { backend: String, message: String },

    /// Query execution error
    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },

    /// Stored data could not be read back
    #[error("Data integrity error: {message}")]
    IntegrityError { message: String },

    /// An in-process lock was poisoned by a panicking writer
    #[error("Storage lock poisoned: {message}")]
    LockPoisoned { message: String },
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, Error)]
pub enum RequestError {
    /// Path id is not an integer
    #[error("Invalid student id format: '{id}'")]
    InvalidId { id: String },

    /// Body is not valid JSON or has wrongly typed fields
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    /// Query string parameter could not be parsed
    #[error("Invalid query parameter '{parameter}': {message}")]
    InvalidQuery { parameter: String, message: String },

    /// Sort expression is not `<field>,<asc|desc>`
    #[error("Invalid sort '{sort}': {message}")]
    InvalidSort { sort: String, message: String },
}

impl RequestError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidId { .. } => "INVALID_ID",
            RequestError::InvalidBody { .. } => "INVALID_BODY",
            RequestError::InvalidQuery { .. } => "INVALID_QUERY",
            RequestError::InvalidSort { .. } => "INVALID_SORT",
        }
    }
}

/// A specialized Result type for student operations
pub type StudentResult<T> = Result<T, StudentError>;
