//! Student field catalogue and comparable field values

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A named attribute of a student record
///
/// Used to address fields from query strings (sorting), from validation
/// reports and from the SQL backend. The wire name is camelCase; the
/// snake_case Rust/SQL name is accepted as an alias when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StudentField {
    Id,
    FirstName,
    LastName,
    Email,
    DateOfBirth,
    EnrollmentDate,
    Gpa,
    Status,
}

impl StudentField {
    /// Every field, in declaration order
    pub const ALL: [StudentField; 8] = [
        StudentField::Id,
        StudentField::FirstName,
        StudentField::LastName,
        StudentField::Email,
        StudentField::DateOfBirth,
        StudentField::EnrollmentDate,
        StudentField::Gpa,
        StudentField::Status,
    ];

    /// Parse a field name, accepting both `firstName` and `first_name`
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == name || field.column() == name)
    }

    /// The camelCase name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentField::Id => "id",
            StudentField::FirstName => "firstName",
            StudentField::LastName => "lastName",
            StudentField::Email => "email",
            StudentField::DateOfBirth => "dateOfBirth",
            StudentField::EnrollmentDate => "enrollmentDate",
            StudentField::Gpa => "gpa",
            StudentField::Status => "status",
        }
    }

    /// The snake_case column name
    pub fn column(&self) -> &'static str {
        match self {
            StudentField::Id => "id",
            StudentField::FirstName => "first_name",
            StudentField::LastName => "last_name",
            StudentField::Email => "email",
            StudentField::DateOfBirth => "date_of_birth",
            StudentField::EnrollmentDate => "enrollment_date",
            StudentField::Gpa => "gpa",
            StudentField::Status => "status",
        }
    }

    /// Whether the field holds text, ordered byte-wise
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            StudentField::FirstName
                | StudentField::LastName
                | StudentField::Email
                | StudentField::Status
        )
    }
}

impl fmt::Display for StudentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A polymorphic field value extracted from a record
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Null,
}

impl FieldValue {
    /// Total order used for sorting
    ///
    /// Null sorts after every present value. Text compares byte-wise, so
    /// uppercase letters sort before lowercase. Values of different variants
    /// are never compared for the same field, so they are treated as equal.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
            (FieldValue::Null, _) => Ordering::Greater,
            (_, FieldValue::Null) => Ordering::Less,
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.total_cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}
