//! Student HTTP handlers

use crate::core::entity::{Student, StudentInput};
use crate::core::error::StudentError;
use crate::core::extractors::{JsonBody, ListQuery, StudentPath};
use crate::core::query::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PaginatedResponse};
use crate::core::service::StudentService;
use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;

/// State shared by the student handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn StudentService>,
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl AppState {
    pub fn new(service: Arc<dyn StudentService>) -> Self {
        Self {
            service,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }

    pub fn with_page_sizes(mut self, default_page_size: usize, max_page_size: usize) -> Self {
        self.default_page_size = default_page_size;
        self.max_page_size = max_page_size;
        self
    }
}

pub async fn create_student(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<StudentInput>,
) -> Result<(StatusCode, Json<Student>), StudentError> {
    let student = state.service.create(input).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

pub async fn get_student(
    State(state): State<AppState>,
    StudentPath(id): StudentPath,
) -> Result<Json<Student>, StudentError> {
    state.service.get(id).await.map(Json)
}

pub async fn update_student(
    State(state): State<AppState>,
    StudentPath(id): StudentPath,
    JsonBody(input): JsonBody<StudentInput>,
) -> Result<Json<Student>, StudentError> {
    state.service.update(id, input).await.map(Json)
}

pub async fn delete_student(
    State(state): State<AppState>,
    StudentPath(id): StudentPath,
) -> Result<StatusCode, StudentError> {
    state.service.soft_delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_students(
    State(state): State<AppState>,
    ListQuery(params): ListQuery,
) -> Result<Json<PaginatedResponse<Student>>, StudentError> {
    let predicate = params.filter()?.to_predicate();
    let page = params.page_request(state.default_page_size, state.max_page_size)?;

    let students = state.service.list(&predicate, &page).await?;
    Ok(Json(PaginatedResponse::new(students, &page)))
}
