//! Per-identity credential lifecycle

use crate::credential::{storage_key, validate_identity, Credential};
use crate::error::{MailError, Result};
use crate::oauth::{ClientConfig, OAuthClient};
use crate::store::CredentialStore;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How long a consent round trip may take before its state is refused.
pub const AUTHORIZATION_STATE_TTL_SECS: i64 = 600;

/// Identity waiting on the provider's redirect, keyed by a one-time state.
#[derive(Debug, Serialize, Deserialize)]
struct PendingAuthorization {
    identity: String,
    created_at: DateTime<Utc>,
}

fn pending_key(state: &str) -> String {
    format!("pending_{}.json", state)
}

fn unknown_state() -> MailError {
    MailError::AuthExpired("authorization state is unknown or expired".to_string())
}

/// Loads, validates, refreshes and persists mailbox credentials.
///
/// One credential per identity. A stale credential gets exactly one refresh
/// attempt; there is no backoff.
#[derive(Clone)]
pub struct CredentialManager {
    store: Arc<dyn CredentialStore>,
    oauth: OAuthClient,
}

impl CredentialManager {
    pub fn new(store: Arc<dyn CredentialStore>, oauth: OAuthClient) -> Self {
        Self { store, oauth }
    }

    /// Stored credential for `identity`.
    ///
    /// A blob that cannot be decoded is logged and treated as absent.
    pub async fn load(&self, identity: &str) -> Result<Option<Credential>> {
        validate_identity(identity)?;

        let Some(bytes) = self.store.get(&storage_key(identity)).await? else {
            return Ok(None);
        };

        match Credential::from_json(&bytes) {
            Ok(credential) => Ok(Some(credential)),
            Err(e) => {
                warn!(identity = %identity, error = %e, "Ignoring unreadable credential");
                Ok(None)
            }
        }
    }

    pub fn is_valid(&self, credential: &Credential) -> bool {
        credential.is_valid()
    }

    pub async fn refresh(&self, credential: &Credential) -> Result<Credential> {
        self.oauth.refresh(credential).await
    }

    pub async fn exchange_authorization_code(
        &self,
        code: &str,
        redirect_uri: &str,
        client_config: &ClientConfig,
        scopes: &[String],
    ) -> Result<Credential> {
        self.oauth
            .exchange_code(client_config, code, redirect_uri, scopes)
            .await
    }

    pub async fn persist(&self, identity: &str, credential: &Credential) -> Result<()> {
        validate_identity(identity)?;
        self.store
            .put(&storage_key(identity), &credential.to_json()?)
            .await
    }

    /// Start a consent round trip for `identity`.
    ///
    /// Returns a random single-use state value to send to the provider; only
    /// [`complete_authorization`](Self::complete_authorization) with that value
    /// can bind the resulting credential to `identity`.
    pub async fn begin_authorization(&self, identity: &str) -> Result<String> {
        validate_identity(identity)?;

        let state = uuid::Uuid::new_v4().simple().to_string();
        let pending = PendingAuthorization {
            identity: identity.to_string(),
            created_at: Utc::now(),
        };
        let bytes = serde_json::to_vec(&pending)
            .map_err(|e| MailError::Parse(format!("Failed to encode pending state: {}", e)))?;
        self.store.put(&pending_key(&state), &bytes).await?;

        debug!(identity = %identity, "Authorization started");
        Ok(state)
    }

    /// Consume a state issued by `begin_authorization` and return its identity.
    ///
    /// # Errors
    ///
    /// `MailError::AuthExpired` if the state was never issued, was already
    /// used, or is older than `AUTHORIZATION_STATE_TTL_SECS`.
    pub async fn complete_authorization(&self, state: &str) -> Result<String> {
        if state.len() != 32 || !state.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(unknown_state());
        }

        let key = pending_key(state);
        let Some(bytes) = self.store.get(&key).await? else {
            return Err(unknown_state());
        };
        self.store.delete(&key).await?;

        let pending: PendingAuthorization = serde_json::from_slice(&bytes).map_err(|e| {
            warn!(error = %e, "Ignoring unreadable authorization state");
            unknown_state()
        })?;

        if Utc::now() - pending.created_at > Duration::seconds(AUTHORIZATION_STATE_TTL_SECS) {
            return Err(unknown_state());
        }

        Ok(pending.identity)
    }

    /// A usable credential for `identity`, refreshing and persisting it if needed.
    ///
    /// # Errors
    ///
    /// - `MailError::NotAuthenticated` if nothing is stored or the stored
    ///   credential cannot be refreshed
    /// - `MailError::AuthExpired` if the token endpoint rejects the refresh
    pub async fn authenticate(&self, identity: &str) -> Result<Credential> {
        let credential = self
            .load(identity)
            .await?
            .ok_or_else(|| MailError::NotAuthenticated(identity.to_string()))?;

        if credential.is_valid() {
            debug!(identity = %identity, "Using stored credential");
            return Ok(credential);
        }

        if !credential.can_refresh() {
            return Err(MailError::NotAuthenticated(identity.to_string()));
        }

        let refreshed = self.refresh(&credential).await?;
        self.persist(identity, &refreshed).await?;
        info!(identity = %identity, "Credential refreshed");

        Ok(refreshed)
    }
}
