//! Campus Mail Server Library
//!
//! HTTP front end for the inbox digest: OAuth consent, credential storage and
//! per-message summaries.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

pub use crate::config::MailConfig;
pub use error::{Result, ServerError};
pub use state::{AppState, OAuthContext};

use axum::{routing::get, Router};
use campus_mail::{
    build_http_client, load_client_config, CredentialManager, CredentialStore,
    FileCredentialStore, InboxDigest, MailClient, OAuthClient, ObjectCredentialStore,
    SummarizerClient,
};
use crate::config::StorageBackend;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the HTTP router
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(api::health::root))
        .route("/health", get(api::health::health))
        .route("/summarize-emails", get(api::summarize::summarize_emails))
        .route("/oauth/start", get(api::oauth::start))
        .route("/oauth/callback", get(api::oauth::callback))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

/// Wire clients, credential store and OAuth registration from configuration
pub async fn build_state(config: &MailConfig) -> Result<AppState> {
    let http = build_http_client()?;

    let store: Arc<dyn CredentialStore> = match config.storage.backend {
        StorageBackend::File => {
            tracing::info!(dir = %config.storage.directory.display(), "Using file credential store");
            Arc::new(FileCredentialStore::new(config.storage.directory.clone()))
        }
        StorageBackend::Object => {
            let bucket = config
                .storage
                .bucket
                .clone()
                .ok_or_else(|| ServerError::Config("storage.bucket is not set".to_string()))?;
            tracing::info!(bucket = %bucket, "Using object credential store");
            Arc::new(ObjectCredentialStore::new(
                http.clone(),
                &config.storage.endpoint,
                bucket,
                config.storage.bearer_token.clone(),
            )?)
        }
    };

    let source = config.oauth.client_config_source().ok_or_else(|| {
        ServerError::Config("no OAuth client configuration source".to_string())
    })?;
    let client = load_client_config(&http, &source).await?;

    let credentials = CredentialManager::new(store, OAuthClient::new(http.clone()));
    let digest = InboxDigest::new(
        credentials,
        MailClient::new(http.clone(), &config.gmail.base_url),
        SummarizerClient::new(
            http,
            &config.genai.base_url,
            config.genai.model.clone(),
            config.genai.api_key.clone(),
        ),
    );

    Ok(AppState::new(
        digest,
        OAuthContext {
            client,
            redirect_uri: config.oauth.redirect_uri.clone(),
            scopes: config.gmail.scopes.clone(),
        },
        config.server.default_identity.clone(),
    ))
}
