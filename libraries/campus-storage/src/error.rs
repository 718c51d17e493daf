/// Storage-specific errors
use campus_core::CampusError;
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violated
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Domain validation rejected the input before any write
    #[error(transparent)]
    Invalid(CampusError),

    /// A stored value could not be mapped back to a domain type
    #[error("Decode error: {0}")]
    Decode(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Map a unique-constraint violation to `Duplicate`, leaving other errors intact
    pub(crate) fn from_insert(err: sqlx::Error, what: impl FnOnce() -> String) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::Duplicate(what()),
            _ => Self::Database(err),
        }
    }
}

impl From<StorageError> for CampusError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity, id } => CampusError::NotFound { entity, id },
            StorageError::Duplicate(msg) => CampusError::Duplicate(msg),
            StorageError::Invalid(inner) => inner,
            other => CampusError::storage(other.to_string()),
        }
    }
}
