//! Staff accounts and login lookups

use crate::error::{Result, StorageError};
use crate::rows;
use campus_core::types::{CreateUser, User, UserId};
use sqlx::{Row, SqlitePool};

const USER_COLUMNS: &str = "user_id, username, full_name, role, is_active, created_at";

/// Create a user
///
/// # Errors
///
/// Returns `StorageError::Duplicate` if the username is already registered
pub async fn create(pool: &SqlitePool, user: CreateUser) -> Result<User> {
    let result = sqlx::query(
        "INSERT INTO users (username, password_hash, full_name, role) VALUES (?, ?, ?, ?)",
    )
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(&user.full_name)
    .bind(user.role.as_str())
    .execute(pool)
    .await
    .map_err(|e| {
        StorageError::from_insert(e, || format!("username '{}' already registered", user.username))
    })?;

    let user_id = result.last_insert_rowid();
    tracing::debug!(user_id, username = %user.username, "Created user");

    get_by_id(pool, user_id)
        .await?
        .ok_or_else(|| StorageError::not_found("User", user_id))
}

/// Get a user by ID
pub async fn get_by_id(pool: &SqlitePool, user_id: UserId) -> Result<Option<User>> {
    let sql = format!("SELECT {} FROM users WHERE user_id = ?", USER_COLUMNS);
    let row = sqlx::query(&sql)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(rows::user).transpose()
}

/// Get a user by login name
pub async fn get_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let sql = format!("SELECT {} FROM users WHERE username = ?", USER_COLUMNS);
    let row = sqlx::query(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(rows::user).transpose()
}

/// Get a user together with their password hash, for login
///
/// Returns `None` if no user has that username
pub async fn get_with_password_hash(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<(User, String)>> {
    let sql = format!(
        "SELECT {}, password_hash FROM users WHERE username = ?",
        USER_COLUMNS
    );
    let row = sqlx::query(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => {
            let user = rows::user(&row)?;
            let hash: String = row.try_get("password_hash")?;
            Ok(Some((user, hash)))
        }
        None => Ok(None),
    }
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let sql = format!("SELECT {} FROM users ORDER BY username", USER_COLUMNS);
    let records = sqlx::query(&sql).fetch_all(pool).await?;

    records.iter().map(rows::user).collect()
}
