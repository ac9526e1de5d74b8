//! Student record model and its validation rules

use crate::core::error::{FieldValidationError, ValidationError};
use crate::core::field::{FieldValue, StudentField};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Identifier assigned by the store on creation
pub type StudentId = i64;

/// Lifecycle state of a student record
///
/// Records are never physically removed; deleting one moves it from
/// `Active` to `Inactive`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
}

impl StudentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Active => "ACTIVE",
            StudentStatus::Inactive => "INACTIVE",
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudentStatus {
    type Err = String;

    /// Case-insensitive: `active`, `Active` and `ACTIVE` all parse
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(StudentStatus::Active),
            "INACTIVE" => Ok(StudentStatus::Inactive),
            other => Err(format!(
                "unknown status '{}', expected ACTIVE or INACTIVE",
                other
            )),
        }
    }
}

/// A stored student record
///
/// Every instance held by a store has passed [`StudentInput`] validation,
/// so `gpa` (when present) lies within `[0.0, 10.0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub enrollment_date: NaiveDate,
    pub gpa: Option<f64>,
    pub status: StudentStatus,
}

impl Student {
    /// Soft delete: flip the status, keep everything else
    pub fn deactivate(&mut self) {
        self.status = StudentStatus::Inactive;
    }

    /// Get the value of a specific field
    pub fn field_value(&self, field: StudentField) -> FieldValue {
        match field {
            StudentField::Id => FieldValue::Integer(self.id),
            StudentField::FirstName => FieldValue::Text(self.first_name.clone()),
            StudentField::LastName => FieldValue::Text(self.last_name.clone()),
            StudentField::Email => FieldValue::Text(self.email.clone()),
            StudentField::DateOfBirth => FieldValue::Date(self.date_of_birth),
            StudentField::EnrollmentDate => FieldValue::Date(self.enrollment_date),
            StudentField::Gpa => self.gpa.map_or(FieldValue::Null, FieldValue::Float),
            StudentField::Status => FieldValue::Text(self.status.as_str().to_string()),
        }
    }
}

/// A candidate record as submitted on create or update
///
/// Missing text fields deserialize to the empty string so they are reported
/// as field errors rather than as a malformed body. Any `id` in the payload
/// is ignored: identifiers are assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentInput {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "First name is required"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Last name is required"))]
    pub last_name: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Email is required"),
        email(message = "Email should be valid")
    )]
    pub email: String,

    #[validate(required(message = "Date of birth is required"))]
    pub date_of_birth: Option<NaiveDate>,

    #[validate(required(message = "Enrollment date is required"))]
    pub enrollment_date: Option<NaiveDate>,

    #[validate(range(min = 0.0, max = 10.0, message = "GPA must be between 0.0 and 10.0"))]
    pub gpa: Option<f64>,

    #[serde(default)]
    pub status: Option<StudentStatus>,
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        Err(validator::ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

impl StudentInput {
    /// Validate the candidate and turn it into a record with the given id
    ///
    /// `status` defaults to `ACTIVE` when absent.
    pub fn into_student(self, id: StudentId) -> Result<Student, ValidationError> {
        self.validate()?;

        let (Some(date_of_birth), Some(enrollment_date)) =
            (self.date_of_birth, self.enrollment_date)
        else {
            return Err(ValidationError::FieldErrors(vec![FieldValidationError {
                field: StudentField::DateOfBirth.to_string(),
                message: "Date of birth is required".to_string(),
            }]));
        };

        Ok(Student {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            date_of_birth,
            enrollment_date,
            gpa: self.gpa,
            status: self.status.unwrap_or_default(),
        })
    }
}

impl From<Student> for StudentInput {
    fn from(student: Student) -> Self {
        Self {
            first_name: student.first_name,
            last_name: student.last_name,
            email: student.email,
            date_of_birth: Some(student.date_of_birth),
            enrollment_date: Some(student.enrollment_date),
            gpa: student.gpa,
            status: Some(student.status),
        }
    }
}
