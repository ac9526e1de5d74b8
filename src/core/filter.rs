//! Listing filters composed into a single predicate
//!
//! Each optional criterion contributes one predicate; present criteria are
//! ANDed together. With no criteria the predicate matches every record.

use crate::core::entity::{Student, StudentStatus};
use serde::{Deserialize, Serialize};

/// A condition evaluated against stored records
///
/// The in-memory store evaluates it directly with [`Predicate::matches`];
/// SQL backends compile it into a `WHERE` clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Matches every record
    All,
    /// `status` equals the value
    StatusEquals(StudentStatus),
    /// `gpa` lies in `[min, max]`; records without a gpa never match
    GpaBetween { min: f64, max: f64 },
    /// `firstName` or `lastName` contains the needle, ignoring case
    NameContains(String),
    /// Every inner predicate matches
    And(Vec<Predicate>),
}

impl Predicate {
    pub fn matches(&self, student: &Student) -> bool {
        match self {
            Predicate::All => true,
            Predicate::StatusEquals(status) => student.status == *status,
            Predicate::GpaBetween { min, max } => student
                .gpa
                .is_some_and(|gpa| *min <= gpa && gpa <= *max),
            Predicate::NameContains(needle) => {
                let needle = needle.to_lowercase();
                student.first_name.to_lowercase().contains(&needle)
                    || student.last_name.to_lowercase().contains(&needle)
            }
            Predicate::And(parts) => parts.iter().all(|p| p.matches(student)),
        }
    }

    /// Conjunction of two predicates, flattening nested `And`s and dropping `All`
    pub fn and(self, other: Predicate) -> Predicate {
        match (self, other) {
            (Predicate::All, p) | (p, Predicate::All) => p,
            (Predicate::And(mut left), Predicate::And(right)) => {
                left.extend(right);
                Predicate::And(left)
            }
            (Predicate::And(mut left), p) => {
                left.push(p);
                Predicate::And(left)
            }
            (p, Predicate::And(mut right)) => {
                right.insert(0, p);
                Predicate::And(right)
            }
            (a, b) => Predicate::And(vec![a, b]),
        }
    }
}

/// Optional listing criteria as received from a request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFilter {
    pub status: Option<StudentStatus>,
    pub min_gpa: Option<f64>,
    pub max_gpa: Option<f64>,
    pub name: Option<String>,
}

impl StudentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: StudentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_gpa_range(mut self, min: f64, max: f64) -> Self {
        self.min_gpa = Some(min);
        self.max_gpa = Some(max);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Fold the present criteria into one predicate
    ///
    /// The GPA range only applies when both bounds are given; a single
    /// bound is ignored.
    pub fn to_predicate(&self) -> Predicate {
        let mut predicate = Predicate::All;

        if let Some(status) = self.status {
            predicate = predicate.and(Predicate::StatusEquals(status));
        }
        if let (Some(min), Some(max)) = (self.min_gpa, self.max_gpa) {
            predicate = predicate.and(Predicate::GpaBetween { min, max });
        }
        if let Some(name) = &self.name {
            predicate = predicate.and(Predicate::NameContains(name.clone()));
        }

        predicate
    }

    pub fn is_empty(&self) -> bool {
        self.to_predicate() == Predicate::All
    }
}
