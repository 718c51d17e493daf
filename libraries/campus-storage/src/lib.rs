//! Campus Storage
//!
//! `SQLite` database layer for the school finance API.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each entity owns its own queries (`users`, `students`,
//!   `academic_years`, `annual_fees`, `transactions`) and `fees` composes them
//!   into the per-student summary
//! - **Integer money**: amounts live in `*_cents` columns, never as floats
//! - **Explicit pool**: every query takes the `SqlitePool` it runs against; there
//!   is no global connection
//!
//! # Example
//!
//! ```rust,no_run
//! use campus_storage::{create_pool, run_migrations};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://campus.db").await?;
//! run_migrations(&pool).await?;
//!
//! let students = campus_storage::students::get_all(&pool).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod rows;

// Vertical slices
pub mod academic_years;
pub mod annual_fees;
pub mod fees;
pub mod students;
pub mod transactions;
pub mod users;

pub use error::{Result, StorageError};

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> std::result::Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://campus.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> std::result::Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!("SQLite pool ready");

    Ok(pool)
}

/// Open a pool and bring its schema up to date
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let pool = create_pool(database_url).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
