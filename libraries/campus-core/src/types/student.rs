//! Student types

use crate::error::CampusError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub type StudentId = i64;

/// Enrollment status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
    Graduated,
    Withdrawn,
}

impl StudentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Graduated => "Graduated",
            Self::Withdrawn => "Withdrawn",
        }
    }
}

impl FromStr for StudentStatus {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            "Graduated" => Ok(Self::Graduated),
            "Withdrawn" => Ok(Self::Withdrawn),
            other => Err(CampusError::invalid_input(format!(
                "unknown student status: {}",
                other
            ))),
        }
    }
}

/// An enrolled (or formerly enrolled) student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub student_id: StudentId,
    pub admission_number: String,
    pub first_name: String,
    pub last_name: String,
    pub admission_date: NaiveDate,
    pub status: StudentStatus,
    pub created_at: NaiveDateTime,
}

impl Student {
    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Data for creating a new student
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStudent {
    pub admission_number: String,
    pub first_name: String,
    pub last_name: String,
    pub admission_date: NaiveDate,
    #[serde(default)]
    pub status: StudentStatus,
}

/// Public projection of a student returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDetails {
    pub student_id: StudentId,
    pub admission_number: String,
    pub full_name: String,
    pub status: StudentStatus,
    pub admission_date: NaiveDate,
}

impl From<&Student> for StudentDetails {
    fn from(student: &Student) -> Self {
        Self {
            student_id: student.student_id,
            admission_number: student.admission_number.clone(),
            full_name: student.full_name(),
            status: student.status,
            admission_date: student.admission_date,
        }
    }
}
