//! Credential persistence backends

use crate::error::{MailError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Key/value storage for credential blobs.
///
/// Last write wins; readers never observe a partially written value.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fetch the blob stored under `key`, `None` if nothing is stored.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `bytes` under `key`, replacing any previous value.
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Credential blobs as files in a local directory.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.dir.join(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        // Write beside the target and rename over it
        let tmp = self
            .dir
            .join(format!(".{}.{}.tmp", key, uuid::Uuid::new_v4()));
        tokio::fs::write(&tmp, bytes).await?;
        if let Err(e) = tokio::fs::rename(&tmp, self.dir.join(key)).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        debug!(key = %key, dir = %self.dir.display(), "Credential written");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        match tokio::fs::remove_file(self.dir.join(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Credential blobs as objects in a bucket, via the Cloud Storage JSON API.
#[derive(Debug, Clone)]
pub struct ObjectCredentialStore {
    http: Client,
    base_url: Url,
    bucket: String,
    bearer_token: Option<String>,
}

impl ObjectCredentialStore {
    pub fn new(
        http: Client,
        base_url: &str,
        bucket: impl Into<String>,
        bearer_token: Option<String>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| MailError::Config(format!("invalid object store URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(MailError::Config(format!(
                "object store URL cannot be a base: {}",
                base_url
            )));
        }

        let bucket = bucket.into();
        if bucket.is_empty() {
            return Err(MailError::Config("object store bucket is empty".to_string()));
        }

        Ok(Self {
            http,
            base_url,
            bucket,
            bearer_token,
        })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl CredentialStore for ObjectCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut url = self.url(&["storage", "v1", "b", &self.bucket, "o", key]);
        url.query_pairs_mut().append_pair("alt", "media");

        debug!(bucket = %self.bucket, key = %key, "Fetching credential object");

        let response = self.authorize(self.http.get(url)).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MailError::Store(format!(
                "get {} returned {}: {}",
                key, status, message
            )));
        }

        Ok(Some(response.bytes().await?.to_vec()))
    }

    async fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let mut url = self.url(&["upload", "storage", "v1", "b", &self.bucket, "o"]);
        url.query_pairs_mut()
            .append_pair("uploadType", "media")
            .append_pair("name", key);

        let response = self
            .authorize(self.http.post(url))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(bytes.to_vec())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MailError::Store(format!(
                "put {} returned {}: {}",
                key, status, message
            )));
        }

        debug!(bucket = %self.bucket, key = %key, "Credential object written");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let url = self.url(&["storage", "v1", "b", &self.bucket, "o", key]);

        let response = self.authorize(self.http.delete(url)).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND || status.is_success() {
            return Ok(());
        }

        let message = response.text().await.unwrap_or_default();
        Err(MailError::Store(format!(
            "delete {} returned {}: {}",
            key, status, message
        )))
    }
}
