/// Server error types
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use campus_core::CampusError;
use campus_storage::StorageError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not validate credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Username already registered: {0}")]
    DuplicateUser(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InvalidRange(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl ServerError {
    /// Stable machine-readable code sent alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            ServerError::InvalidCredentials => "invalid_credentials",
            ServerError::UserNotFound => "user_not_found",
            ServerError::DuplicateUser(_) => "duplicate_user",
            ServerError::NotFound(_) => "not_found",
            ServerError::Conflict(_) => "conflict",
            ServerError::InvalidRange(_) => "invalid_range",
            ServerError::BadRequest(_) => "bad_request",
            ServerError::Internal(_) | ServerError::Config(_) | ServerError::Bcrypt(_) => {
                "internal_error"
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidCredentials | ServerError::UserNotFound => StatusCode::UNAUTHORIZED,
            ServerError::DuplicateUser(_) | ServerError::Conflict(_) => StatusCode::CONFLICT,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::InvalidRange(_) | ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Internal(_) | ServerError::Config(_) | ServerError::Bcrypt(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<CampusError> for ServerError {
    fn from(err: CampusError) -> Self {
        match err {
            CampusError::NotFound { .. } => ServerError::NotFound(err.to_string()),
            CampusError::Duplicate(msg) => ServerError::Conflict(msg),
            CampusError::InvalidRange { .. } => ServerError::InvalidRange(err.to_string()),
            CampusError::InvalidInput(msg) => ServerError::BadRequest(msg),
            CampusError::Storage(msg) => ServerError::Internal(msg),
        }
    }
}

impl From<StorageError> for ServerError {
    fn from(err: StorageError) -> Self {
        // Convert StorageError -> CampusError -> ServerError
        ServerError::from(CampusError::from(err))
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ServerError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            ServerError::Config(msg) => {
                tracing::error!("Config error: {}", msg);
                "Internal server error".to_string()
            }
            ServerError::Bcrypt(e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": message,
            "code": self.code(),
        }));

        if status == StatusCode::UNAUTHORIZED {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response();
        }

        (status, body).into_response()
    }
}
