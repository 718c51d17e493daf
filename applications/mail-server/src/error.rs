/// Server error types
use axum::{
    extract::rejection::QueryRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use campus_mail::MailError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Mail(#[from] MailError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<QueryRejection> for ServerError {
    fn from(rejection: QueryRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl ServerError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ServerError::Mail(err) => match err {
                MailError::NotAuthenticated(_) => (StatusCode::UNAUTHORIZED, "not_authenticated"),
                MailError::AuthExpired(_) => (StatusCode::UNAUTHORIZED, "auth_expired"),
                MailError::InvalidCount(_) => (StatusCode::BAD_REQUEST, "invalid_count"),
                MailError::InvalidIdentity(_) => (StatusCode::BAD_REQUEST, "invalid_identity"),
                MailError::Request(_) | MailError::Upstream { .. } | MailError::Parse(_) => {
                    (StatusCode::BAD_GATEWAY, "upstream_error")
                }
                MailError::Store(_) | MailError::Config(_) | MailError::Io(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
                }
            },
            ServerError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ServerError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.parts().0
    }

    pub fn code(&self) -> &'static str {
        self.parts().1
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();

        let message = if status == StatusCode::BAD_GATEWAY {
            tracing::error!("Upstream failure: {}", self);
            "An upstream service failed".to_string()
        } else if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal error: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": message,
            "code": code,
        }));

        if status == StatusCode::UNAUTHORIZED {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response();
        }

        (status, body).into_response()
    }
}
