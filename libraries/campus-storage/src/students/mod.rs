//! Student records

use crate::error::{Result, StorageError};
use crate::rows;
use campus_core::types::{CreateStudent, Student, StudentId};
use sqlx::SqlitePool;

const STUDENT_COLUMNS: &str =
    "student_id, admission_number, first_name, last_name, admission_date, status, created_at";

/// Create a student
///
/// # Errors
///
/// Returns `StorageError::Duplicate` if the admission number is taken
pub async fn create(pool: &SqlitePool, student: CreateStudent) -> Result<Student> {
    let result = sqlx::query(
        "INSERT INTO students (admission_number, first_name, last_name, admission_date, status)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&student.admission_number)
    .bind(&student.first_name)
    .bind(&student.last_name)
    .bind(student.admission_date)
    .bind(student.status.as_str())
    .execute(pool)
    .await
    .map_err(|e| {
        StorageError::from_insert(e, || {
            format!("admission number '{}' already exists", student.admission_number)
        })
    })?;

    let student_id = result.last_insert_rowid();

    get_by_id(pool, student_id)
        .await?
        .ok_or_else(|| StorageError::not_found("Student", student_id))
}

/// Get a student by ID
pub async fn get_by_id(pool: &SqlitePool, student_id: StudentId) -> Result<Option<Student>> {
    let sql = format!("SELECT {} FROM students WHERE student_id = ?", STUDENT_COLUMNS);
    let row = sqlx::query(&sql)
        .bind(student_id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(rows::student).transpose()
}

/// Get all students, ordered by admission number
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Student>> {
    let sql = format!(
        "SELECT {} FROM students ORDER BY admission_number",
        STUDENT_COLUMNS
    );
    let records = sqlx::query(&sql).fetch_all(pool).await?;

    records.iter().map(rows::student).collect()
}

/// Whether a student with this ID exists
pub(crate) async fn exists<'e, E>(executor: E, student_id: StudentId) -> Result<bool>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let row = sqlx::query("SELECT 1 FROM students WHERE student_id = ?")
        .bind(student_id)
        .fetch_optional(executor)
        .await?;
    Ok(row.is_some())
}
