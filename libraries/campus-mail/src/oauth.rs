//! OAuth 2.0 authorization-code client

use crate::credential::Credential;
use crate::error::{MailError, Result};
use chrono::{Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

/// OAuth client registration, as found in a provider's client-secret document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    pub client_id: String,
    pub client_secret: String,
    pub auth_uri: String,
    pub token_uri: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

#[derive(Deserialize)]
struct ClientSecretDocument {
    web: Option<ClientConfig>,
    installed: Option<ClientConfig>,
}

impl ClientConfig {
    /// Parse a `{"web": {...}}` or `{"installed": {...}}` client-secret document.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let doc: ClientSecretDocument = serde_json::from_slice(bytes)
            .map_err(|e| MailError::Config(format!("invalid client secret document: {}", e)))?;

        doc.web.or(doc.installed).ok_or_else(|| {
            MailError::Config("client secret document has no 'web' or 'installed' entry".into())
        })
    }

    /// Consent page URL that sends the user back to `redirect_uri` with a code.
    pub fn authorization_url(
        &self,
        redirect_uri: &str,
        scopes: &[String],
        state: &str,
    ) -> Result<String> {
        let url = Url::parse_with_params(
            &self.auth_uri,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", redirect_uri),
                ("response_type", "code"),
                ("scope", scopes.join(" ").as_str()),
                ("access_type", "offline"),
                ("prompt", "consent"),
                ("state", state),
            ],
        )
        .map_err(|e| MailError::Config(format!("invalid auth_uri: {}", e)))?;

        Ok(url.into())
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Talks to the provider's token endpoint.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: Client,
}

impl OAuthClient {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Trade an authorization code for a credential.
    pub async fn exchange_code(
        &self,
        config: &ClientConfig,
        code: &str,
        redirect_uri: &str,
        scopes: &[String],
    ) -> Result<Credential> {
        debug!(token_uri = %config.token_uri, "Exchanging authorization code");

        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
        ];
        let token = self.request_token(&config.token_uri, &params).await?;

        info!("Authorization code exchanged");

        Ok(Credential {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at: expiry(token.expires_in),
            token_uri: config.token_uri.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            scopes: token
                .scope
                .map_or_else(|| scopes.to_vec(), |s| split_scopes(&s)),
        })
    }

    /// Obtain a fresh access token using the credential's refresh token.
    ///
    /// The returned credential keeps the old refresh token when the endpoint
    /// does not rotate it.
    pub async fn refresh(&self, credential: &Credential) -> Result<Credential> {
        let refresh_token = credential
            .refresh_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| MailError::AuthExpired("no refresh token available".to_string()))?;

        debug!(token_uri = %credential.token_uri, "Refreshing access token");

        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", credential.client_id.as_str()),
            ("client_secret", credential.client_secret.as_str()),
        ];
        let token = self.request_token(&credential.token_uri, &params).await?;

        Ok(Credential {
            access_token: token.access_token,
            refresh_token: token
                .refresh_token
                .or_else(|| credential.refresh_token.clone()),
            expires_at: expiry(token.expires_in),
            token_uri: credential.token_uri.clone(),
            client_id: credential.client_id.clone(),
            client_secret: credential.client_secret.clone(),
            scopes: token
                .scope
                .map_or_else(|| credential.scopes.clone(), |s| split_scopes(&s)),
        })
    }

    async fn request_token(&self, token_uri: &str, params: &[(&str, &str)]) -> Result<TokenResponse> {
        let response = self.http.post(token_uri).form(params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) => err.error_description.unwrap_or(err.error),
                Err(_) => format!("token endpoint returned {}", status),
            };
            warn!(status = %status, error = %message, "Token request rejected");
            return Err(MailError::AuthExpired(message));
        }

        response
            .json()
            .await
            .map_err(|e| MailError::Parse(format!("Failed to parse token response: {}", e)))
    }
}

fn expiry(expires_in: Option<i64>) -> Option<chrono::DateTime<Utc>> {
    expires_in.map(|secs| Utc::now() + Duration::seconds(secs))
}

fn split_scopes(scope: &str) -> Vec<String> {
    scope.split_whitespace().map(str::to_string).collect()
}
