//! Query parameters, sorting and pagination utilities

use crate::core::entity::StudentStatus;
use crate::core::error::RequestError;
use crate::core::field::StudentField;
use crate::core::filter::StudentFilter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Upper bound on items per page
pub const MAX_PAGE_SIZE: usize = 100;

/// Query parameters for the listing endpoint
///
/// All parameters are optional; `page` is zero-based.
///
/// # Example
/// ```text
/// GET /api/students?page=1&size=20
/// GET /api/students?status=ACTIVE&minGpa=3.0&maxGpa=4.0
/// GET /api/students?name=an&sort=lastName,desc
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Page number (starts at 0)
    pub page: Option<usize>,

    /// Number of items per page
    pub size: Option<usize>,

    /// Sort expression: `field` or `field,asc` or `field,desc`
    pub sort: Option<String>,

    /// Exact status match, case-insensitive
    pub status: Option<String>,

    /// Lower GPA bound, only applied together with `maxGpa`
    pub min_gpa: Option<f64>,

    /// Upper GPA bound, only applied together with `minGpa`
    pub max_gpa: Option<f64>,

    /// Case-insensitive substring of first or last name
    pub name: Option<String>,
}

impl ListParams {
    /// Build the listing filter from the optional criteria
    pub fn filter(&self) -> Result<StudentFilter, RequestError> {
        let status = self
            .status
            .as_deref()
            .map(StudentStatus::from_str)
            .transpose()
            .map_err(|message| RequestError::InvalidQuery {
                parameter: "status".to_string(),
                message,
            })?;

        Ok(StudentFilter {
            status,
            min_gpa: finite_bound("minGpa", self.min_gpa)?,
            max_gpa: finite_bound("maxGpa", self.max_gpa)?,
            name: self.name.clone(),
        })
    }

    /// Build the page request, clamping size to `[1, max_size]`
    pub fn page_request(
        &self,
        default_size: usize,
        max_size: usize,
    ) -> Result<PageRequest, RequestError> {
        let sort = match self.sort.as_deref() {
            Some(sort) => sort.parse()?,
            None => SortSpec::default(),
        };

        Ok(PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(default_size).clamp(1, max_size.max(1)),
            sort,
        ))
    }
}

/// NaN and infinities order differently per backend, so they are refused
fn finite_bound(parameter: &str, value: Option<f64>) -> Result<Option<f64>, RequestError> {
    match value {
        Some(v) if !v.is_finite() => Err(RequestError::InvalidQuery {
            parameter: parameter.to_string(),
            message: format!("expected a finite number, got {}", v),
        }),
        _ => Ok(value),
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Return the SQL keyword for this direction
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown direction '{}', expected asc or desc", other)),
        }
    }
}

/// A field and a direction to order results by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: StudentField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: StudentField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn asc(field: StudentField) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: StudentField) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

/// `id,asc`
impl Default for SortSpec {
    fn default() -> Self {
        Self::asc(StudentField::Id)
    }
}

impl FromStr for SortSpec {
    type Err = RequestError;

    /// Parse `"<field>,<direction>"`; a missing direction means ascending
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: String| RequestError::InvalidSort {
            sort: s.to_string(),
            message,
        };

        let mut parts = s.split(',');
        let name = parts.next().unwrap_or_default().trim();
        let field = StudentField::parse(name)
            .ok_or_else(|| invalid(format!("unknown field '{}'", name)))?;
        let direction = match parts.next() {
            Some(direction) => direction.parse().map_err(invalid)?,
            None => SortDirection::Asc,
        };

        Ok(Self { field, direction })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{},{}", self.field, direction)
    }
}

/// Which slice of the ordered result set to return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index
    pub page: usize,
    /// Items per page, at least 1
    pub size: usize,
    pub sort: SortSpec,
}

impl PageRequest {
    pub fn new(page: usize, size: usize, sort: SortSpec) -> Self {
        Self {
            page,
            size: size.max(1),
            sort,
        }
    }

    /// Number of matching records to skip
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }

    pub fn limit(&self) -> usize {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE, SortSpec::default())
    }
}

/// One page of records plus the total number of matches
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: usize) -> Self {
        Self { items, total }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }
}

/// Paginated response structure
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// The paginated data
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(page: Page<T>, request: &PageRequest) -> Self {
        let pagination = PaginationMeta::new(request.page, request.size, page.total);
        Self {
            data: page.items,
            pagination,
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number (starts at 0)
    pub page: usize,

    /// Number of items per page
    pub size: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: usize, size: usize, total: usize) -> Self {
        let size = size.max(1);
        let total_pages = total.div_ceil(size);

        Self {
            page,
            size,
            total,
            total_pages,
            has_next: page.saturating_add(1) < total_pages,
            has_prev: page > 0,
        }
    }
}
