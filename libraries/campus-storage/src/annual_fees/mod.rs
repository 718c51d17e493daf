//! Per-year fee assignments

use crate::error::{Result, StorageError};
use crate::{academic_years, rows, students};
use campus_core::types::{AssignAnnualFee, StudentAnnualFee, StudentId, YearId};
use sqlx::SqlitePool;

const FEE_COLUMNS: &str = "annual_fee_id, student_id, year_id, total_annual_fees_cents, notes";

/// Assign a student's fee for an academic year
///
/// # Errors
///
/// - `StorageError::NotFound` if the student or year does not exist
/// - `StorageError::Duplicate` if the student already has a fee for that year
pub async fn assign(pool: &SqlitePool, fee: AssignAnnualFee) -> Result<StudentAnnualFee> {
    let mut tx = pool.begin().await?;

    if !students::exists(&mut *tx, fee.student_id).await? {
        return Err(StorageError::not_found("Student", fee.student_id));
    }
    if !academic_years::exists(&mut *tx, fee.year_id).await? {
        return Err(StorageError::not_found("Academic year", fee.year_id));
    }

    let result = sqlx::query(
        "INSERT INTO student_annual_fees (student_id, year_id, total_annual_fees_cents, notes)
         VALUES (?, ?, ?, ?)",
    )
    .bind(fee.student_id)
    .bind(fee.year_id)
    .bind(fee.total_annual_fees.cents())
    .bind(&fee.notes)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        StorageError::from_insert(e, || {
            format!(
                "student {} already has a fee for year {}",
                fee.student_id, fee.year_id
            )
        })
    })?;

    tx.commit().await?;

    let annual_fee_id = result.last_insert_rowid();
    let sql = format!(
        "SELECT {} FROM student_annual_fees WHERE annual_fee_id = ?",
        FEE_COLUMNS
    );
    let row = sqlx::query(&sql)
        .bind(annual_fee_id)
        .fetch_one(pool)
        .await?;

    rows::annual_fee(&row)
}

/// Get the fee assigned to a student for one year
pub async fn get_for_student_year(
    pool: &SqlitePool,
    student_id: StudentId,
    year_id: YearId,
) -> Result<Option<StudentAnnualFee>> {
    let sql = format!(
        "SELECT {} FROM student_annual_fees WHERE student_id = ? AND year_id = ?",
        FEE_COLUMNS
    );
    let row = sqlx::query(&sql)
        .bind(student_id)
        .bind(year_id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(rows::annual_fee).transpose()
}
