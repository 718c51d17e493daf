//! Academic years and the current-year flag

use crate::error::{Result, StorageError};
use crate::rows;
use campus_core::types::{AcademicYear, CreateAcademicYear, DateRange, YearId};
use sqlx::SqlitePool;

const YEAR_COLUMNS: &str = "year_id, year_name, start_date, end_date, is_current";

/// Create an academic year
///
/// If `is_current` is set, every other year loses the flag in the same
/// database transaction.
pub async fn create(pool: &SqlitePool, year: CreateAcademicYear) -> Result<AcademicYear> {
    DateRange::new(year.start_date, year.end_date).map_err(StorageError::Invalid)?;

    let mut tx = pool.begin().await?;

    if year.is_current {
        sqlx::query("UPDATE academic_years SET is_current = 0 WHERE is_current = 1")
            .execute(&mut *tx)
            .await?;
    }

    let result = sqlx::query(
        "INSERT INTO academic_years (year_name, start_date, end_date, is_current)
         VALUES (?, ?, ?, ?)",
    )
    .bind(&year.year_name)
    .bind(year.start_date)
    .bind(year.end_date)
    .bind(year.is_current)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        StorageError::from_insert(e, || format!("academic year '{}' already exists", year.year_name))
    })?;

    tx.commit().await?;

    let year_id = result.last_insert_rowid();
    get_by_id(pool, year_id)
        .await?
        .ok_or_else(|| StorageError::not_found("Academic year", year_id))
}

/// Get an academic year by ID
pub async fn get_by_id(pool: &SqlitePool, year_id: YearId) -> Result<Option<AcademicYear>> {
    let sql = format!("SELECT {} FROM academic_years WHERE year_id = ?", YEAR_COLUMNS);
    let row = sqlx::query(&sql)
        .bind(year_id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(rows::academic_year).transpose()
}

/// Get the year flagged as current, if any
pub async fn get_current(pool: &SqlitePool) -> Result<Option<AcademicYear>> {
    let sql = format!(
        "SELECT {} FROM academic_years WHERE is_current = 1 LIMIT 1",
        YEAR_COLUMNS
    );
    let row = sqlx::query(&sql).fetch_optional(pool).await?;

    row.as_ref().map(rows::academic_year).transpose()
}

/// Get all academic years, most recent first
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<AcademicYear>> {
    let sql = format!(
        "SELECT {} FROM academic_years ORDER BY start_date DESC",
        YEAR_COLUMNS
    );
    let records = sqlx::query(&sql).fetch_all(pool).await?;

    records.iter().map(rows::academic_year).collect()
}

/// Make `year_id` the only current year
///
/// # Errors
///
/// Returns `StorageError::NotFound` (and changes nothing) if the year does not exist
pub async fn set_current(pool: &SqlitePool, year_id: YearId) -> Result<AcademicYear> {
    let mut tx = pool.begin().await?;

    let updated = sqlx::query("UPDATE academic_years SET is_current = 1 WHERE year_id = ?")
        .bind(year_id)
        .execute(&mut *tx)
        .await?;

    if updated.rows_affected() == 0 {
        // Dropping `tx` rolls back
        return Err(StorageError::not_found("Academic year", year_id));
    }

    sqlx::query("UPDATE academic_years SET is_current = 0 WHERE year_id != ?")
        .bind(year_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    get_by_id(pool, year_id)
        .await?
        .ok_or_else(|| StorageError::not_found("Academic year", year_id))
}

/// Whether a year with this ID exists
pub(crate) async fn exists<'e, E>(executor: E, year_id: YearId) -> Result<bool>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let row = sqlx::query("SELECT 1 FROM academic_years WHERE year_id = ?")
        .bind(year_id)
        .fetch_optional(executor)
        .await?;
    Ok(row.is_some())
}
