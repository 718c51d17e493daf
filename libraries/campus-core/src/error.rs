/// Core error types for the campus finance domain
use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias using `CampusError`
pub type Result<T> = std::result::Result<T, CampusError>;

/// Core error type for the finance domain
#[derive(Error, Debug)]
pub enum CampusError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint on a natural key was violated
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Query window where the start comes after the end
    #[error("Start date {start} cannot be after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CampusError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
