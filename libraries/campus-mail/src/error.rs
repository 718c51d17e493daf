//! Error types for the mail digest library.

use thiserror::Error;

/// Errors that can occur while authenticating, reading mail or summarizing.
#[derive(Error, Debug)]
pub enum MailError {
    /// No usable credential for this identity; the user has to go through the consent flow
    #[error("No valid credential for '{0}'; start authorization at /oauth/start")]
    NotAuthenticated(String),

    /// The token endpoint rejected a refresh or code exchange
    #[error("Authorization expired: {0}")]
    AuthExpired(String),

    /// Requested message count is outside the accepted range
    #[error("Message count {0} is out of range (1-{})", crate::digest::MAX_COUNT)]
    InvalidCount(u32),

    /// Identity cannot be used as a credential key
    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A remote API answered with a non-success status
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Failed to parse a response or stored document
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Credential store failure
    #[error("Credential store error: {0}")]
    Store(String),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error on the local credential store or client-secret file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MailError {
    /// Build an `Upstream` error from a failed response, consuming its body.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        Self::Upstream { status, message }
    }
}

/// Result type for mail operations.
pub type Result<T> = std::result::Result<T, MailError>;
