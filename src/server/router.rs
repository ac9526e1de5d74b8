//! Router builder for student and health routes

use super::handlers::{
    AppState, create_student, delete_student, get_student, list_students, update_student,
};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

/// Base path of the student resource
pub const STUDENTS_PATH: &str = "/api/students";

/// Build the student CRUD routes
///
/// - GET    /api/students       - List (filter, sort, paginate)
/// - POST   /api/students       - Create
/// - GET    /api/students/{id}  - Get by id
/// - PUT    /api/students/{id}  - Full replacement
/// - DELETE /api/students/{id}  - Soft delete
pub fn build_student_routes(state: AppState) -> Router {
    Router::new()
        .route(STUDENTS_PATH, get(list_students).post(create_student))
        .route(
            &format!("{}/{{id}}", STUDENTS_PATH),
            get(get_student).put(update_student).delete(delete_student),
        )
        .with_state(state)
}

/// Build health check routes
pub fn build_health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "student-registry"
    }))
}
