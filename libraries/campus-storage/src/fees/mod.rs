//! Per-student fee summary

use crate::error::{Result, StorageError};
use crate::{academic_years, annual_fees, students, transactions};
use campus_core::types::{FeeSummary, FeeTotals, StudentDetails, StudentId, TransactionType, YearId};
use sqlx::SqlitePool;

/// Summarize what a student owes for an academic year
///
/// `pending = (annual fee + carried forward) - paid`
///
/// # Errors
///
/// Returns `StorageError::NotFound` if the student, the year, or the
/// student's fee assignment for that year is missing
pub async fn summary(
    pool: &SqlitePool,
    student_id: StudentId,
    year_id: YearId,
) -> Result<FeeSummary> {
    let student = students::get_by_id(pool, student_id)
        .await?
        .ok_or_else(|| StorageError::not_found("Student", student_id))?;

    let annual_fee = annual_fees::get_for_student_year(pool, student_id, year_id)
        .await?
        .ok_or_else(|| {
            StorageError::not_found(
                "Fee record",
                format!("student {} in academic year {}", student_id, year_id),
            )
        })?;

    let year = academic_years::get_by_id(pool, year_id)
        .await?
        .ok_or_else(|| StorageError::not_found("Academic year", year_id))?;

    let paid =
        transactions::total_for_student(pool, student_id, year_id, TransactionType::FeePayment)
            .await?;
    let carried_forward = transactions::total_for_student(
        pool,
        student_id,
        year_id,
        TransactionType::FeeCarryForward,
    )
    .await?;

    let totals = FeeTotals {
        annual_fee: annual_fee.total_annual_fees,
        carried_forward,
        paid,
    };

    Ok(FeeSummary::new(
        StudentDetails::from(&student),
        year.year_name,
        totals,
    ))
}
