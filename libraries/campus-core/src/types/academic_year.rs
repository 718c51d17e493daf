//! Academic year types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type YearId = i64;

/// A school year, e.g. "2024-2025"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicYear {
    pub year_id: YearId,
    pub year_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// At most one year carries this flag at a time
    pub is_current: bool,
}

/// Data for creating a new academic year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAcademicYear {
    pub year_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_current: bool,
}
