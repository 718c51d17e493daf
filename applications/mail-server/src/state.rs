/// Shared application state
use campus_mail::{ClientConfig, InboxDigest};
use std::sync::Arc;

/// What `/oauth/start` and `/oauth/callback` need to talk to the provider
#[derive(Debug, Clone)]
pub struct OAuthContext {
    pub client: ClientConfig,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub digest: Arc<InboxDigest>,
    pub oauth: Arc<OAuthContext>,
    pub default_identity: String,
}

impl AppState {
    pub fn new(digest: InboxDigest, oauth: OAuthContext, default_identity: String) -> Self {
        Self {
            digest: Arc::new(digest),
            oauth: Arc::new(oauth),
            default_identity,
        }
    }
}
