/// Server configuration
use crate::error::{Result, ServerError};
use campus_mail::ClientConfigSource;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_genai")]
    pub genai: GenAiSettings,

    #[serde(default = "default_gmail")]
    pub gmail: GmailSettings,

    #[serde(default = "default_oauth")]
    pub oauth: OAuthSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Identity used when `/summarize-emails` is called without `user`
    #[serde(default = "default_identity")]
    pub default_identity: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenAiSettings {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_genai_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GmailSettings {
    #[serde(default = "default_gmail_base_url")]
    pub base_url: String,

    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OAuthSettings {
    /// Local client-secret document
    #[serde(default)]
    pub client_secret_file: Option<PathBuf>,

    /// Secret Manager version holding the client-secret document; wins over the file
    #[serde(default)]
    pub secret_name: Option<String>,

    #[serde(default = "default_secret_endpoint")]
    pub secret_endpoint: String,

    #[serde(default)]
    pub secret_bearer_token: Option<String>,

    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    File,
    Object,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,

    /// Credential directory for the file backend
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Bucket for the object backend
    #[serde(default)]
    pub bucket: Option<String>,

    #[serde(default = "default_object_endpoint")]
    pub endpoint: String,

    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl OAuthSettings {
    /// Where the client registration is read from, if configured
    pub fn client_config_source(&self) -> Option<ClientConfigSource> {
        if let Some(name) = &self.secret_name {
            return Some(ClientConfigSource::SecretManager {
                endpoint: self.secret_endpoint.clone(),
                name: name.clone(),
                bearer_token: self.secret_bearer_token.clone(),
            });
        }
        self.client_secret_file
            .clone()
            .map(ClientConfigSource::File)
    }
}

impl MailConfig {
    /// Load configuration from file and environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (prefixed with CAMPUS_MAIL_)
        settings = settings.add_source(
            config::Environment::with_prefix("CAMPUS_MAIL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.genai.api_key.is_empty() {
            return Err(ServerError::Config(
                "Generative API key is required (set CAMPUS_MAIL_GENAI__API_KEY)".to_string(),
            ));
        }

        if self.storage.backend == StorageBackend::Object
            && !matches!(self.storage.bucket.as_deref(), Some(bucket) if !bucket.is_empty())
        {
            return Err(ServerError::Config(
                "storage.bucket is required for the object backend".to_string(),
            ));
        }

        if self.oauth.client_config_source().is_none() {
            return Err(ServerError::Config(
                "Set oauth.client_secret_file or oauth.secret_name".to_string(),
            ));
        }

        campus_mail::validate_identity(&self.server.default_identity)
            .map_err(|e| ServerError::Config(e.to_string()))?;

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
        default_identity: default_identity(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8001
}

fn default_identity() -> String {
    "default".to_string()
}

fn default_genai() -> GenAiSettings {
    GenAiSettings {
        api_key: String::new(),
        model: default_model(),
        base_url: default_genai_base_url(),
    }
}

fn default_model() -> String {
    campus_mail::DEFAULT_MODEL.to_string()
}

fn default_genai_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gmail() -> GmailSettings {
    GmailSettings {
        base_url: default_gmail_base_url(),
        scopes: default_scopes(),
    }
}

fn default_gmail_base_url() -> String {
    "https://gmail.googleapis.com".to_string()
}

fn default_scopes() -> Vec<String> {
    vec![campus_mail::GMAIL_READONLY_SCOPE.to_string()]
}

fn default_oauth() -> OAuthSettings {
    OAuthSettings {
        client_secret_file: Some(PathBuf::from("client_secret.json")),
        secret_name: None,
        secret_endpoint: default_secret_endpoint(),
        secret_bearer_token: None,
        redirect_uri: default_redirect_uri(),
    }
}

fn default_secret_endpoint() -> String {
    "https://secretmanager.googleapis.com".to_string()
}

fn default_redirect_uri() -> String {
    "http://localhost:8001/oauth/callback".to_string()
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        backend: default_backend(),
        directory: default_directory(),
        bucket: None,
        endpoint: default_object_endpoint(),
        bearer_token: None,
    }
}

fn default_backend() -> StorageBackend {
    StorageBackend::File
}

fn default_directory() -> PathBuf {
    PathBuf::from("./data/tokens")
}

fn default_object_endpoint() -> String {
    "https://storage.googleapis.com".to_string()
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            genai: default_genai(),
            gmail: default_gmail(),
            oauth: default_oauth(),
            storage: default_storage(),
        }
    }
}
