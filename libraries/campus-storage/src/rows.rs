//! Row-to-domain mapping shared by the slices

use crate::error::{Result, StorageError};
use campus_core::types::{
    AcademicYear, Money, Student, StudentAnnualFee, Transaction, TransactionRecord, User,
};
use campus_core::CampusError;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::str::FromStr;

/// Parse a stored enum label (role, status, transaction type...)
fn label<T>(row: &SqliteRow, column: &str) -> Result<T>
where
    T: FromStr<Err = CampusError>,
{
    let raw: String = row.try_get(column)?;
    raw.parse()
        .map_err(|e: CampusError| StorageError::Decode(format!("{}: {}", column, e)))
}

fn optional_label<T>(row: &SqliteRow, column: &str) -> Result<Option<T>>
where
    T: FromStr<Err = CampusError>,
{
    let raw: Option<String> = row.try_get(column)?;
    raw.map(|value| {
        value
            .parse()
            .map_err(|e: CampusError| StorageError::Decode(format!("{}: {}", column, e)))
    })
    .transpose()
}

pub(crate) fn user(row: &SqliteRow) -> Result<User> {
    Ok(User {
        user_id: row.try_get("user_id")?,
        username: row.try_get("username")?,
        full_name: row.try_get("full_name")?,
        role: label(row, "role")?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
    })
}

pub(crate) fn student(row: &SqliteRow) -> Result<Student> {
    Ok(Student {
        student_id: row.try_get("student_id")?,
        admission_number: row.try_get("admission_number")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        admission_date: row.try_get("admission_date")?,
        status: label(row, "status")?,
        created_at: row.try_get("created_at")?,
    })
}

pub(crate) fn academic_year(row: &SqliteRow) -> Result<AcademicYear> {
    Ok(AcademicYear {
        year_id: row.try_get("year_id")?,
        year_name: row.try_get("year_name")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        is_current: row.try_get("is_current")?,
    })
}

pub(crate) fn annual_fee(row: &SqliteRow) -> Result<StudentAnnualFee> {
    Ok(StudentAnnualFee {
        annual_fee_id: row.try_get("annual_fee_id")?,
        student_id: row.try_get("student_id")?,
        year_id: row.try_get("year_id")?,
        total_annual_fees: Money::from_cents(row.try_get("total_annual_fees_cents")?),
        notes: row.try_get("notes")?,
    })
}

pub(crate) fn transaction(row: &SqliteRow) -> Result<Transaction> {
    Ok(Transaction {
        transaction_id: row.try_get("transaction_id")?,
        transaction_type: label(row, "transaction_type")?,
        amount: Money::from_cents(row.try_get("amount_cents")?),
        transaction_date: row.try_get("transaction_date")?,
        description: row.try_get("description")?,
        student_id: row.try_get("student_id")?,
        category: row.try_get("category")?,
        payment_method: optional_label(row, "payment_method")?,
        reference_details: row.try_get("reference_details")?,
        recorded_by_user_id: row.try_get("recorded_by_user_id")?,
        year_id: row.try_get("year_id")?,
    })
}

pub(crate) fn transaction_record(row: &SqliteRow) -> Result<TransactionRecord> {
    Ok(TransactionRecord {
        transaction_id: row.try_get("transaction_id")?,
        transaction_type: label(row, "transaction_type")?,
        amount: Money::from_cents(row.try_get("amount_cents")?),
        transaction_date: row.try_get("transaction_date")?,
        description: row.try_get("description")?,
        category: row.try_get("category")?,
        student_id: row.try_get("student_id")?,
        recorded_by: row.try_get("recorded_by")?,
    })
}
