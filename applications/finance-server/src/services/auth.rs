/// Authentication service - JWT and password handling
use crate::error::{Result, ServerError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct AuthService {
    secret: String,
    token_ttl: Duration,
    bcrypt_cost: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (username)
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
}

impl AuthService {
    pub fn new(secret: String, token_ttl: Duration, bcrypt_cost: u32) -> Self {
        Self {
            secret,
            token_ttl,
            bcrypt_cost,
        }
    }

    /// Lifetime of session tokens issued at login
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Hash a password using bcrypt
    pub fn hash_password(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, self.bcrypt_cost).map_err(ServerError::from)
    }

    /// Verify a password against a hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(ServerError::from)
    }

    /// Create a session token for `subject` with the configured lifetime
    pub fn issue_session_token(&self, subject: &str) -> Result<String> {
        self.issue_token(subject, self.token_ttl)
    }

    /// Create a token for `subject` that expires after `ttl`
    pub fn issue_token(&self, subject: &str, ttl: Duration) -> Result<String> {
        let now = Utc::now();
        let exp = now + ttl;

        let claims = Claims {
            sub: subject.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::new(Algorithm::HS256), &claims, &encoding_key).map_err(|e| {
            tracing::error!("Failed to sign token: {:?}", e);
            ServerError::Internal("token signing failed".to_string())
        })
    }

    /// Verify a token and return its subject
    ///
    /// Every failure (bad signature, expiry, missing `sub`) is reported as
    /// `InvalidCredentials`.
    pub fn verify_token(&self, token: &str) -> Result<String> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
            tracing::debug!("Token rejected: {}", e);
            ServerError::InvalidCredentials
        })?;

        if token_data.claims.sub.is_empty() {
            return Err(ServerError::InvalidCredentials);
        }

        // Valid strictly before `exp`; the library only rejects `exp < now`
        if token_data.claims.exp <= Utc::now().timestamp() {
            tracing::debug!("Token rejected: expired");
            return Err(ServerError::InvalidCredentials);
        }

        Ok(token_data.claims.sub)
    }
}
