//! Campus Mail
//!
//! Delegated mailbox access and inbox summarization.
//!
//! # Features
//!
//! - **Credentials**: per-identity OAuth credentials with one-shot refresh
//! - **Stores**: local directory or object-storage bucket for credential blobs
//! - **Mail**: recent inbox messages reduced to plain text
//! - **Summaries**: one generative-language call per message
//!
//! # Example
//!
//! ```ignore
//! use campus_mail::*;
//! use std::sync::Arc;
//!
//! let http = build_http_client()?;
//! let store = Arc::new(FileCredentialStore::new("./tokens"));
//! let credentials = CredentialManager::new(store, OAuthClient::new(http.clone()));
//! let mail = MailClient::new(http.clone(), "https://gmail.googleapis.com");
//! let summarizer = SummarizerClient::new(
//!     http,
//!     "https://generativelanguage.googleapis.com",
//!     DEFAULT_MODEL,
//!     api_key,
//! );
//!
//! let digest = InboxDigest::new(credentials, mail, summarizer);
//! for summary in digest.summarize_inbox("alice", 5).await? {
//!     println!("#{}: {}", summary.email_number, summary.summary);
//! }
//! ```

mod credential;
mod credentials;
mod digest;
mod error;
mod mail;
mod oauth;
mod secrets;
mod store;
mod summarizer;

use std::time::Duration;

pub use credential::{storage_key, validate_identity, Credential};
pub use credentials::{CredentialManager, AUTHORIZATION_STATE_TTL_SECS};
pub use digest::{validate_count, EmailSummary, InboxDigest, DEFAULT_COUNT, MAX_COUNT};
pub use error::{MailError, Result};
pub use mail::{decode_body, MailClient, MAX_BODY_CHARS, RECENT_QUERY};
pub use oauth::{ClientConfig, OAuthClient};
pub use secrets::{load_client_config, ClientConfigSource};
pub use store::{CredentialStore, FileCredentialStore, ObjectCredentialStore};
pub use summarizer::{build_prompt, SummarizerClient, DEFAULT_MODEL};

/// Scope needed to read the mailbox.
pub const GMAIL_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/gmail.readonly";

/// HTTP client shared by every outbound collaborator.
pub fn build_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(format!("CampusMail/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(MailError::Request)
}
