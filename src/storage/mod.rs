//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::InMemoryStudentService;
#[cfg(feature = "postgres")]
pub use postgres::PostgresStudentService;
