//! Token endpoint responses and the cached session.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, MutexGuard};

use crate::error::{Error, ErrorKind, Result};
use crate::signature;

/// JSON body returned by the token endpoint.
///
/// Sensitive fields like `access_token` and `refresh_token` are redacted
/// in Debug output to prevent accidental exposure in logs.
#[derive(Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token (web-server flow with the `refresh_token` scope).
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Instance URL.
    pub instance_url: String,
    /// Identity URL.
    #[serde(default)]
    pub id: Option<String>,
    /// Token type (usually "Bearer").
    #[serde(default)]
    pub token_type: Option<String>,
    /// Scopes granted.
    #[serde(default)]
    pub scope: Option<String>,
    /// Signature for verification.
    #[serde(default)]
    pub signature: Option<String>,
    /// Issue time, milliseconds since the epoch as a string.
    #[serde(default)]
    pub issued_at: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("instance_url", &self.instance_url)
            .field("id", &self.id)
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("signature", &self.signature.as_ref().map(|_| "[REDACTED]"))
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

impl TokenResponse {
    /// Validate the signature against the consumer secret.
    pub fn verify_signature(&self, client_secret: &str) -> Result<()> {
        signature::verify(
            self.id.as_deref(),
            self.issued_at.as_deref(),
            client_secret,
            self.signature.as_deref(),
        )
    }

    /// Parse `issued_at`, falling back to `now` when it is absent.
    pub fn issued_at(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let Some(raw) = self.issued_at.as_deref() else {
            return Ok(now);
        };

        raw.parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis)
            .ok_or_else(|| {
                Error::new(ErrorKind::InvalidInput(format!(
                    "issued_at is not a millisecond timestamp: {}",
                    raw
                )))
            })
    }
}

/// Grant used to obtain a token from the password authenticator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    /// Resource-owner password grant.
    Password,
    /// Refresh-token grant; falls back to `Password` with no refresh token cached.
    RefreshToken,
}

impl Grant {
    /// The `grant_type` form value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Grant::Password => "password",
            Grant::RefreshToken => "refresh_token",
        }
    }
}

impl std::fmt::Display for Grant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated session.
///
/// The access token is redacted in Debug output.
#[derive(Clone)]
pub struct Token {
    access_token: String,
    /// Org-specific host all API calls go to.
    pub instance_url: String,
    /// Identity URL of the authenticated user.
    pub identity_url: Option<String>,
    /// When Salesforce issued the token.
    pub issued_at: DateTime<Utc>,
    /// Local expiry, when a session lifetime is configured.
    pub expires_at: Option<DateTime<Utc>>,
    /// Token type (usually "Bearer").
    pub token_type: Option<String>,
    /// Scopes granted.
    pub scope: Option<String>,
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"[REDACTED]")
            .field("instance_url", &self.instance_url)
            .field("identity_url", &self.identity_url)
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

impl Token {
    /// Create a token from known values.
    pub fn new(access_token: impl Into<String>, instance_url: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            instance_url: instance_url.into(),
            identity_url: None,
            issued_at: Utc::now(),
            expires_at: None,
            token_type: None,
            scope: None,
        }
    }

    /// Build a session from a token endpoint response.
    pub fn from_response(response: &TokenResponse, session_lifetime: Option<Duration>) -> Result<Self> {
        let issued_at = response.issued_at(Utc::now())?;
        Ok(Self {
            access_token: response.access_token.clone(),
            instance_url: response.instance_url.trim_end_matches('/').to_string(),
            identity_url: response.id.clone(),
            issued_at,
            expires_at: session_lifetime.map(|lifetime| issued_at + lifetime),
            token_type: response.token_type.clone(),
            scope: response.scope.clone(),
        })
    }

    /// The bearer token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Whether the token is past its local expiry.
    ///
    /// Tokens without an expiry never expire locally; Salesforce reports
    /// them invalid with a 401 instead.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// Cache state behind the lock.
#[derive(Debug, Default)]
pub struct Session {
    /// The current session, if any.
    pub token: Option<Token>,
    refresh_token: Option<String>,
}

impl Session {
    /// The cached refresh token.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Replace the session; the refresh token is kept unless a new one is given.
    pub fn store(&mut self, token: Token, refresh_token: Option<String>) {
        self.token = Some(token);
        if refresh_token.is_some() {
            self.refresh_token = refresh_token;
        }
    }
}

/// Shared token cache guarded by an async mutex.
///
/// Authenticators hold the lock for the whole token round-trip, so at most
/// one grant runs at a time per cache. Clones share the same session.
#[derive(Debug, Clone, Default)]
pub struct TokenCache {
    inner: Arc<Mutex<Session>>,
}

impl TokenCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the session for a read-modify-write.
    pub async fn lock(&self) -> MutexGuard<'_, Session> {
        self.inner.lock().await
    }

    /// The cached token, expired or not.
    pub async fn token(&self) -> Option<Token> {
        self.lock().await.token.clone()
    }

    /// The cached token if it has not expired at `now`.
    pub async fn valid_token(&self, now: DateTime<Utc>) -> Option<Token> {
        self.lock()
            .await
            .token
            .as_ref()
            .filter(|token| !token.is_expired(now))
            .cloned()
    }

    /// The cached refresh token.
    pub async fn refresh_token(&self) -> Option<String> {
        self.lock().await.refresh_token.clone()
    }

    /// Replace the access token of the cached session.
    ///
    /// Returns `false` when nothing is cached.
    pub async fn set_access_token(&self, access_token: String) -> bool {
        match self.lock().await.token.as_mut() {
            Some(token) => {
                token.access_token = access_token;
                true
            }
            None => false,
        }
    }

    /// Replace the refresh token.
    pub async fn set_refresh_token(&self, refresh_token: String) {
        self.lock().await.refresh_token = Some(refresh_token);
    }

    /// Drop the cached access token. The refresh token is kept so the next
    /// authentication can use it.
    pub async fn invalidate(&self) {
        self.lock().await.token = None;
    }
}
