//! Where the OAuth client registration comes from

use crate::error::{MailError, Result};
use crate::oauth::ClientConfig;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

/// Source of the client-secret document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientConfigSource {
    /// A client-secret JSON file on local disk
    File(PathBuf),
    /// A secret version in a Secret Manager compatible service,
    /// e.g. `projects/p/secrets/oauth-client/versions/latest`
    SecretManager {
        endpoint: String,
        name: String,
        bearer_token: Option<String>,
    },
}

#[derive(Deserialize)]
struct AccessSecretResponse {
    payload: SecretPayload,
}

#[derive(Deserialize)]
struct SecretPayload {
    data: String,
}

/// Load and parse the client configuration from `source`.
pub async fn load_client_config(http: &Client, source: &ClientConfigSource) -> Result<ClientConfig> {
    match source {
        ClientConfigSource::File(path) => {
            debug!(path = %path.display(), "Reading client secret file");
            let bytes = tokio::fs::read(path).await?;
            ClientConfig::from_json(&bytes)
        }
        ClientConfigSource::SecretManager {
            endpoint,
            name,
            bearer_token,
        } => {
            let url = format!("{}/v1/{}:access", endpoint.trim_end_matches('/'), name);
            debug!(secret = %name, "Fetching client secret");

            let mut request = http.get(&url);
            if let Some(token) = bearer_token {
                request = request.bearer_auth(token);
            }

            let response = request.send().await?;
            if !response.status().is_success() {
                return Err(MailError::from_response(response).await);
            }

            let secret: AccessSecretResponse = response
                .json()
                .await
                .map_err(|e| MailError::Parse(format!("Failed to parse secret response: {}", e)))?;
            let bytes = STANDARD
                .decode(secret.payload.data.trim())
                .map_err(|e| MailError::Parse(format!("secret payload is not base64: {}", e)))?;

            ClientConfig::from_json(&bytes)
        }
    }
}
