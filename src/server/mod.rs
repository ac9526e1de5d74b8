//! Server module for building the HTTP API
//!
//! This module provides a `ServerBuilder` that registers:
//! - CRUD routes for students under `/api/students`
//! - Health check routes

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
