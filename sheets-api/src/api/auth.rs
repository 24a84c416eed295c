//! Service-account authentication for the Sheets API
//!
//! Signs a short-lived JWT with the service account's private key, trades it
//! for an OAuth access token and caches that token until shortly before it
//! expires. The cache is an `ArcSwapOption`, so concurrent requests read it
//! without locking; two requests racing on an expired token both refresh and
//! the last one wins, which is harmless.

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::constants::{
    ASSERTION_LIFETIME_SECS, DEFAULT_TOKEN_URI, JWT_BEARER_GRANT_TYPE, SPREADSHEETS_SCOPE,
    TOKEN_EXPIRY_SKEW_SECS,
};
use super::error::ClientError;

/// Errors loading service-account credentials at startup
#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("failed to read credentials file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("credentials file is not a valid service account key: {0}")]
    InvalidKeyFile(#[from] serde_json::Error),
    #[error("service account private key could not be parsed: {0}")]
    InvalidPrivateKey(#[from] jsonwebtoken::errors::Error),
}

/// The fields we need from a Google service-account JSON key file
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub token_uri: Option<String>,
}

impl ServiceAccountKey {
    /// Read and parse a key file from disk
    pub fn from_file(path: &Path) -> Result<Self, CredentialsError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CredentialsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// An access token and the moment it stops being valid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl TokenInfo {
    /// Whether the token should be refreshed before use at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(TOKEN_EXPIRY_SKEW_SECS) >= self.expires_at
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

/// Obtains and caches access tokens for one service account
pub struct AuthManager {
    http: reqwest::Client,
    client_email: String,
    token_uri: String,
    encoding_key: EncodingKey,
    cached: ArcSwapOption<TokenInfo>,
}

impl AuthManager {
    /// Load a key file and prepare the signer. Fails if the file is missing,
    /// malformed, or its private key is not a valid RSA PEM.
    pub fn from_key_file(path: &Path, http: reqwest::Client) -> Result<Self, CredentialsError> {
        let key = ServiceAccountKey::from_file(path)?;
        Self::new(key, http)
    }

    pub fn new(key: ServiceAccountKey, http: reqwest::Client) -> Result<Self, CredentialsError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
        let token_uri = key
            .token_uri
            .filter(|uri| !uri.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TOKEN_URI.to_string());

        info!("Loaded service account credentials for {}", key.client_email);

        Ok(Self {
            http,
            client_email: key.client_email,
            token_uri,
            encoding_key,
            cached: ArcSwapOption::empty(),
        })
    }

    /// Service account email the tokens are issued to
    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    /// Return a valid access token, refreshing it if needed
    pub async fn access_token(&self) -> Result<String, ClientError> {
        let now = Utc::now();
        if let Some(token) = self.cached_token(now) {
            return Ok(token);
        }

        debug!("Access token missing or expired, requesting a new one");
        let token = self.fetch_token(now).await?;
        let access_token = token.access_token.clone();
        self.cached.store(Some(Arc::new(token)));
        Ok(access_token)
    }

    fn cached_token(&self, now: DateTime<Utc>) -> Option<String> {
        let guard = self.cached.load();
        guard
            .as_ref()
            .filter(|token| !token.is_expired(now))
            .map(|token| token.access_token.clone())
    }

    /// Sign the JWT assertion presented to the token endpoint
    fn build_assertion(&self, now: DateTime<Utc>) -> Result<String, ClientError> {
        let iat = now.timestamp();
        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: SPREADSHEETS_SCOPE,
            aud: &self.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| ClientError::Auth(format!("failed to sign assertion: {}", e)))
    }

    async fn fetch_token(&self, now: DateTime<Utc>) -> Result<TokenInfo, ClientError> {
        let assertion = self.build_assertion(now)?;

        let response = self
            .http
            .post(&self.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT_TYPE),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ClientError::Auth(format!("token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Auth(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Auth(format!("invalid token response: {}", e)))?;

        debug!("Obtained access token valid for {}s", token.expires_in);

        Ok(TokenInfo {
            access_token: token.access_token,
            expires_at: token_expiry(now, token.expires_in)?,
        })
    }

    #[cfg(test)]
    pub(crate) fn prime_cache(&self, token: TokenInfo) {
        self.cached.store(Some(Arc::new(token)));
    }
}

fn token_expiry(now: DateTime<Utc>, expires_in: i64) -> Result<DateTime<Utc>, ClientError> {
    Duration::try_seconds(expires_in)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| ClientError::Auth(format!("token lifetime out of range: {}s", expires_in)))
}
