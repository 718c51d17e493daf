//! Delegated mailbox credential

use crate::error::{MailError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Clock skew tolerated when deciding whether an access token has expired.
const EXPIRY_SKEW_SECS: i64 = 10;

/// Access/refresh token pair plus everything needed to refresh it.
///
/// Persisted as a JSON blob under [`storage_key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// `None` means the provider did not report a lifetime
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    pub token_uri: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl Credential {
    /// Whether the access token can be used right now.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        if self.access_token.is_empty() {
            return false;
        }
        match self.expires_at {
            Some(expires_at) => now + Duration::seconds(EXPIRY_SKEW_SECS) < expires_at,
            None => true,
        }
    }

    /// Whether a refresh can be attempted.
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| MailError::Parse(e.to_string()))
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| MailError::Parse(e.to_string()))
    }
}

/// Store key holding the credential of `identity`.
pub fn storage_key(identity: &str) -> String {
    format!("token_{}.json", identity)
}

/// Reject identities that cannot safely become part of a file or object name.
pub fn validate_identity(identity: &str) -> Result<()> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '_' | '-' | '+');

    if identity.is_empty() || identity.len() > 128 {
        return Err(MailError::InvalidIdentity(
            "identity must be 1-128 characters".to_string(),
        ));
    }
    if identity.starts_with('.') || !identity.chars().all(allowed) {
        return Err(MailError::InvalidIdentity(identity.to_string()));
    }
    Ok(())
}
