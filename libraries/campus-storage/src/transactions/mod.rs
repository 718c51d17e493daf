//! Append-only ledger

use crate::error::{Result, StorageError};
use crate::{academic_years, rows, students};
use campus_core::types::{
    CreateTransaction, DateRange, FeePayment, Money, StudentId, Transaction, TransactionId,
    TransactionRecord, TransactionType, UserId, YearId,
};
use sqlx::{Row, SqlitePool};

const TRANSACTION_COLUMNS: &str = "transaction_id, transaction_type, amount_cents, transaction_date, \
     description, student_id, category, payment_method, reference_details, recorded_by_user_id, year_id";

/// Append a ledger entry
///
/// The referenced student (if any) and academic year are checked inside the
/// same database transaction as the insert, so a failed check writes nothing.
///
/// # Errors
///
/// - `StorageError::Invalid` if the entry fails domain validation
/// - `StorageError::NotFound` if the student or academic year does not exist
pub async fn record(pool: &SqlitePool, entry: CreateTransaction) -> Result<Transaction> {
    entry.validate().map_err(StorageError::Invalid)?;

    let mut tx = pool.begin().await?;

    if let Some(student_id) = entry.student_id {
        if !students::exists(&mut *tx, student_id).await? {
            return Err(StorageError::not_found("Student", student_id));
        }
    }
    if !academic_years::exists(&mut *tx, entry.year_id).await? {
        return Err(StorageError::not_found("Academic year", entry.year_id));
    }

    let result = sqlx::query(
        "INSERT INTO transactions (transaction_type, amount_cents, transaction_date, description,
             student_id, category, payment_method, reference_details, recorded_by_user_id, year_id)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(entry.transaction_type.as_str())
    .bind(entry.amount.cents())
    .bind(entry.transaction_date)
    .bind(&entry.description)
    .bind(entry.student_id)
    .bind(&entry.category)
    .bind(entry.payment_method.map(|m| m.as_str()))
    .bind(&entry.reference_details)
    .bind(entry.recorded_by_user_id)
    .bind(entry.year_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    let transaction_id = result.last_insert_rowid();
    tracing::info!(
        transaction_id,
        kind = entry.transaction_type.as_str(),
        amount = %entry.amount,
        "Recorded ledger entry"
    );

    get_by_id(pool, transaction_id)
        .await?
        .ok_or_else(|| StorageError::not_found("Transaction", transaction_id))
}

/// Record a student's fee payment on behalf of `recorded_by`
pub async fn record_fee_payment(
    pool: &SqlitePool,
    payment: FeePayment,
    recorded_by: UserId,
) -> Result<Transaction> {
    record(pool, payment.into_transaction(recorded_by)).await
}

/// Get a ledger entry by ID
pub async fn get_by_id(
    pool: &SqlitePool,
    transaction_id: TransactionId,
) -> Result<Option<Transaction>> {
    let sql = format!(
        "SELECT {} FROM transactions WHERE transaction_id = ?",
        TRANSACTION_COLUMNS
    );
    let row = sqlx::query(&sql)
        .bind(transaction_id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(rows::transaction).transpose()
}

/// Entries dated inside `range` (bounds included), newest first, each with
/// the full name of the user who recorded it
pub async fn history(pool: &SqlitePool, range: &DateRange) -> Result<Vec<TransactionRecord>> {
    let records = sqlx::query(
        r#"
        SELECT t.transaction_id, t.transaction_type, t.amount_cents, t.transaction_date,
               t.description, t.category, t.student_id, u.full_name AS recorded_by
        FROM transactions t
        JOIN users u ON u.user_id = t.recorded_by_user_id
        WHERE t.transaction_date >= ? AND t.transaction_date <= ?
        ORDER BY t.transaction_date DESC, t.transaction_id DESC
        "#,
    )
    .bind(range.start())
    .bind(range.end())
    .fetch_all(pool)
    .await?;

    records.iter().map(rows::transaction_record).collect()
}

/// Sum of one kind of entry for a student in a year
pub async fn total_for_student(
    pool: &SqlitePool,
    student_id: StudentId,
    year_id: YearId,
    transaction_type: TransactionType,
) -> Result<Money> {
    let row = sqlx::query(
        "SELECT COALESCE(SUM(amount_cents), 0) AS total
         FROM transactions
         WHERE student_id = ? AND year_id = ? AND transaction_type = ?",
    )
    .bind(student_id)
    .bind(year_id)
    .bind(transaction_type.as_str())
    .fetch_one(pool)
    .await?;

    Ok(Money::from_cents(row.try_get("total")?))
}
