//! Axum extractors for student requests
//!
//! These wrap axum's own extractors so that every malformed input is
//! reported through [`StudentError`] with the same JSON error body as the
//! rest of the API.

use crate::core::entity::StudentId;
use crate::core::error::{RequestError, StudentError};
use crate::core::query::ListParams;
use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

/// Integer id taken from the `{id}` path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudentPath(pub StudentId);

impl<S> FromRequestParts<S> for StudentPath
where
    S: Send + Sync,
{
    type Rejection = StudentError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| RequestError::InvalidId { id: e.body_text() })?;

        raw.trim()
            .parse::<StudentId>()
            .map(StudentPath)
            .map_err(|_| RequestError::InvalidId { id: raw }.into())
    }
}

/// JSON request body whose rejections map to `INVALID_BODY`
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_student(
///     JsonBody(input): JsonBody<StudentInput>,
/// ) -> Result<Json<Student>, StudentError> {
///     // input is well-formed, but not validated yet
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = StudentError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(e) => Err(RequestError::InvalidBody {
                message: e.body_text(),
            }
            .into()),
        }
    }
}

/// Listing query string whose rejections map to `INVALID_QUERY`
#[derive(Debug, Clone)]
pub struct ListQuery(pub ListParams);

impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = StudentError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<ListParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| RequestError::InvalidQuery {
                parameter: "query".to_string(),
                message: e.body_text(),
            })?;
        Ok(ListQuery(params))
    }
}
