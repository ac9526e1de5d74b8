//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresStudentService`, a `StudentService` backed by a
//! `students` table through a `sqlx::PgPool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! student-registry = { version = "0.1", features = ["postgres"] }
//! ```

use crate::core::entity::{Student, StudentId, StudentInput, StudentStatus};
use crate::core::error::{StorageError, StudentError, StudentResult};
use crate::core::field::StudentField;
use crate::core::filter::Predicate;
use crate::core::query::{Page, PageRequest, SortDirection};
use crate::core::service::StudentService;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Postgres, QueryBuilder, Row};

const BACKEND: &str = "PostgreSQL";

const COLUMNS: &str =
    "id, first_name, last_name, email, date_of_birth, enrollment_date, gpa, status";

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    id              BIGSERIAL PRIMARY KEY,
    first_name      TEXT NOT NULL,
    last_name       TEXT NOT NULL,
    email           TEXT NOT NULL,
    date_of_birth   DATE NOT NULL,
    enrollment_date DATE NOT NULL,
    gpa             DOUBLE PRECISION CHECK (gpa IS NULL OR (gpa >= 0.0 AND gpa <= 10.0)),
    status          TEXT NOT NULL DEFAULT 'ACTIVE' CHECK (status IN ('ACTIVE', 'INACTIVE'))
)
"#;

/// Student storage service backed by PostgreSQL.
#[derive(Clone, Debug)]
pub struct PostgresStudentService {
    pool: PgPool,
}

impl PostgresStudentService {
    /// Create a new `PostgresStudentService` with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool to `url` and wrap it.
    pub async fn connect(url: &str, max_connections: u32) -> StudentResult<Self> {
        tracing::info!(url = %mask_password(url), max_connections, "Connecting to PostgreSQL");

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| StorageError::ConnectionError {
                backend: BACKEND.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self::new(pool))
    }

    /// Create the `students` table if it does not exist.
    pub async fn migrate(&self) -> StudentResult<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(query_error)?;
        Ok(())
    }

    /// Return a reference to the underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl StudentService for PostgresStudentService {
    async fn create(&self, input: StudentInput) -> StudentResult<Student> {
        // Validate before touching the sequence; the id placeholder is replaced by RETURNING.
        let candidate = input.into_student(0)?;

        let row = sqlx::query(&format!(
            "INSERT INTO students \
             (first_name, last_name, email, date_of_birth, enrollment_date, gpa, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {COLUMNS}"
        ))
        .bind(&candidate.first_name)
        .bind(&candidate.last_name)
        .bind(&candidate.email)
        .bind(candidate.date_of_birth)
        .bind(candidate.enrollment_date)
        .bind(candidate.gpa)
        .bind(candidate.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(query_error)?;

        let student = student_from_row(&row)?;
        tracing::info!(id = student.id, "student created");
        Ok(student)
    }

    async fn get(&self, id: StudentId) -> StudentResult<Student> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM students WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?
            .ok_or(StudentError::NotFound { id })?;

        student_from_row(&row)
    }

    async fn update(&self, id: StudentId, input: StudentInput) -> StudentResult<Student> {
        let mut tx = self.pool.begin().await.map_err(query_error)?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM students WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(query_error)?;
        if exists.is_none() {
            return Err(StudentError::NotFound { id });
        }

        let student = input.into_student(id)?;
        sqlx::query(
            "UPDATE students SET first_name = $2, last_name = $3, email = $4, \
             date_of_birth = $5, enrollment_date = $6, gpa = $7, status = $8 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(&student.email)
        .bind(student.date_of_birth)
        .bind(student.enrollment_date)
        .bind(student.gpa)
        .bind(student.status.as_str())
        .execute(&mut *tx)
        .await
        .map_err(query_error)?;

        tx.commit().await.map_err(query_error)?;

        tracing::info!(id, "student updated");
        Ok(student)
    }

    async fn soft_delete(&self, id: StudentId) -> StudentResult<()> {
        let result = sqlx::query("UPDATE students SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(StudentStatus::Inactive.as_str())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(StudentError::NotFound { id });
        }

        tracing::info!(id, "student deactivated");
        Ok(())
    }

    async fn list(&self, predicate: &Predicate, page: &PageRequest) -> StudentResult<Page<Student>> {
        tracing::debug!(?predicate, page = page.page, size = page.size, sort = %page.sort, "listing students");

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM students");
        push_where(&mut count, predicate);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM students"));
        push_where(&mut select, predicate);
        push_order(&mut select, page);
        select.push(" LIMIT ");
        select.push_bind(i64::try_from(page.limit()).unwrap_or(i64::MAX));
        select.push(" OFFSET ");
        select.push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));

        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(query_error)?;
        let items = rows
            .iter()
            .map(student_from_row)
            .collect::<StudentResult<Vec<_>>>()?;

        Ok(Page::new(items, total as usize))
    }

    async fn count(&self) -> StudentResult<usize> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;
        Ok(total as usize)
    }
}

/// Append ` WHERE ...` for anything narrower than `Predicate::All`
fn push_where(builder: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate) {
    if *predicate != Predicate::All {
        builder.push(" WHERE ");
        push_predicate(builder, predicate);
    }
}

fn push_predicate(builder: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate) {
    match predicate {
        Predicate::All => {
            builder.push("TRUE");
        }
        Predicate::StatusEquals(status) => {
            builder.push("status = ");
            builder.push_bind(status.as_str());
        }
        Predicate::GpaBetween { min, max } => {
            builder.push("gpa BETWEEN ");
            builder.push_bind(*min);
            builder.push(" AND ");
            builder.push_bind(*max);
        }
        Predicate::NameContains(needle) => {
            let pattern = format!("%{}%", escape_like(needle));
            builder.push("(first_name ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR last_name ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }
        Predicate::And(parts) => {
            builder.push("(");
            for (i, part) in parts.iter().enumerate() {
                if i > 0 {
                    builder.push(" AND ");
                }
                push_predicate(builder, part);
            }
            if parts.is_empty() {
                builder.push("TRUE");
            }
            builder.push(")");
        }
    }
}

/// Column names come from `StudentField`, never from user input
///
/// Text columns use the `"C"` collation so ordering is byte-wise, whatever
/// the database locale.
fn push_order(builder: &mut QueryBuilder<'_, Postgres>, page: &PageRequest) {
    builder.push(" ORDER BY ");
    builder.push(page.sort.field.column());
    if page.sort.field.is_text() {
        builder.push(r#" COLLATE "C""#);
    }
    builder.push(" ");
    builder.push(page.sort.direction.as_sql());
    if page.sort.field != StudentField::Id {
        builder.push(", id ");
        builder.push(SortDirection::Asc.as_sql());
    }
}

/// Treat `%`, `_` and `\` in the needle literally
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn student_from_row(row: &PgRow) -> StudentResult<Student> {
    let status: String = row.try_get("status").map_err(integrity_error)?;

    Ok(Student {
        id: row.try_get("id").map_err(integrity_error)?,
        first_name: row.try_get("first_name").map_err(integrity_error)?,
        last_name: row.try_get("last_name").map_err(integrity_error)?,
        email: row.try_get("email").map_err(integrity_error)?,
        date_of_birth: row.try_get("date_of_birth").map_err(integrity_error)?,
        enrollment_date: row.try_get("enrollment_date").map_err(integrity_error)?,
        gpa: row.try_get("gpa").map_err(integrity_error)?,
        status: status
            .parse()
            .map_err(|message| StorageError::IntegrityError { message })?,
    })
}

fn query_error(e: sqlx::Error) -> StudentError {
    StorageError::QueryError {
        backend: BACKEND.to_string(),
        message: e.to_string(),
    }
    .into()
}

fn integrity_error(e: sqlx::Error) -> StudentError {
    StorageError::IntegrityError {
        message: e.to_string(),
    }
    .into()
}

/// Mask the password portion of a database URL for safe logging.
fn mask_password(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
        if let Some(colon_pos) = url[..at_pos].rfind(':') {
            if colon_pos > scheme_end {
                return format!("{}:****@{}", &url[..colon_pos], &url[at_pos + 1..]);
            }
        }
    }
    url.to_string()
}
