//! Annual fee assignment and fee summary types

use super::{Money, StudentDetails, StudentId, YearId};
use serde::{Deserialize, Serialize};

/// The fee a student owes for one academic year. One row per (student, year).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentAnnualFee {
    pub annual_fee_id: i64,
    pub student_id: StudentId,
    pub year_id: YearId,
    pub total_annual_fees: Money,
    pub notes: Option<String>,
}

/// Data for assigning a student's annual fee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignAnnualFee {
    pub student_id: StudentId,
    pub year_id: YearId,
    pub total_annual_fees: Money,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Ledger totals for one student and one year
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeeTotals {
    /// Fee assigned for the year
    pub annual_fee: Money,
    /// Sum of `Fee Carry Forward` entries
    pub carried_forward: Money,
    /// Sum of `Fee Payment` entries
    pub paid: Money,
}

impl FeeTotals {
    /// Annual fee plus everything carried forward from earlier years
    pub fn due(&self) -> Money {
        self.annual_fee + self.carried_forward
    }

    /// What is still owed. Negative when the student has overpaid.
    pub fn pending(&self) -> Money {
        self.due() - self.paid
    }
}

/// Financial summary of one student for one academic year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSummary {
    pub student_details: StudentDetails,
    pub academic_year: String,
    pub total_fees_due: Money,
    pub total_amount_paid: Money,
    pub pending_fees: Money,
}

impl FeeSummary {
    pub fn new(student_details: StudentDetails, academic_year: String, totals: FeeTotals) -> Self {
        Self {
            student_details,
            academic_year,
            total_fees_due: totals.due(),
            total_amount_paid: totals.paid,
            pending_fees: totals.pending(),
        }
    }
}
