//! Common test utilities and fixtures

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use campus_mail::{
    build_http_client, ClientConfig, Credential, CredentialManager, FileCredentialStore,
    InboxDigest, MailClient, OAuthClient, SummarizerClient, DEFAULT_MODEL, GMAIL_READONLY_SCOPE,
};
use campus_mail_server::{create_router, AppState, OAuthContext};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;
use wiremock::MockServer;

pub const REDIRECT_URI: &str = "http://localhost:8001/oauth/callback";

/// Router whose every outbound collaborator is one mock server
pub struct TestApp {
    pub router: Router,
    pub server: MockServer,
    pub state: AppState,
    pub token_dir: TempDir,
}

pub async fn create_test_app() -> TestApp {
    let server = MockServer::start().await;
    let token_dir = TempDir::new().expect("Failed to create temp dir");
    let http = build_http_client().unwrap();

    let store = Arc::new(FileCredentialStore::new(token_dir.path()));
    let digest = InboxDigest::new(
        CredentialManager::new(store, OAuthClient::new(http.clone())),
        MailClient::new(http.clone(), &server.uri()),
        SummarizerClient::new(http, &server.uri(), DEFAULT_MODEL, "test-key"),
    );

    let oauth = OAuthContext {
        client: ClientConfig {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            auth_uri: format!("{}/o/oauth2/auth", server.uri()),
            token_uri: format!("{}/token", server.uri()),
            redirect_uris: vec![REDIRECT_URI.to_string()],
        },
        redirect_uri: REDIRECT_URI.to_string(),
        scopes: vec![GMAIL_READONLY_SCOPE.to_string()],
    };

    let state = AppState::new(digest, oauth, "default".to_string());
    let router = create_router(state.clone());

    TestApp {
        router,
        server,
        state,
        token_dir,
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> (StatusCode, HeaderMap, serde_json::Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, body)
    }

    pub fn credential(&self, access_token: &str, expires_in_secs: i64) -> Credential {
        Credential {
            access_token: access_token.to_string(),
            refresh_token: Some("1//refresh".to_string()),
            expires_at: Some(chrono::Utc::now() + chrono::Duration::seconds(expires_in_secs)),
            token_uri: format!("{}/token", self.server.uri()),
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            scopes: vec![GMAIL_READONLY_SCOPE.to_string()],
        }
    }

    pub async fn store_credential(&self, identity: &str, credential: &Credential) {
        self.state
            .digest
            .credentials()
            .persist(identity, credential)
            .await
            .unwrap();
    }
}
