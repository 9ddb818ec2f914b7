//! Resource-owner password flow.

use chrono::Duration;
use tracing::{info, instrument};

use salesforce_rest_client::SfHttpClient;

use crate::authenticator::Authenticator;
use crate::config::AuthConfig;
use crate::endpoint::request_token;
use crate::error::{Error, ErrorKind, Result};
use crate::token::{Grant, Token, TokenCache};

/// Authenticates with the connected app's credentials plus the user's
/// username, password and security token.
///
/// Every token response must carry a valid signature before it is cached.
///
/// # Example
///
/// ```rust,ignore
/// use salesforce_rest_auth::{AuthConfig, Authenticator, PasswordAuth};
///
/// let auth = PasswordAuth::new(AuthConfig::from_env()?)?;
/// let token = auth.access_token().await?;
/// ```
#[derive(Clone)]
pub struct PasswordAuth {
    config: AuthConfig,
    http: SfHttpClient,
    cache: TokenCache,
    session_lifetime: Option<Duration>,
}

impl std::fmt::Debug for PasswordAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordAuth")
            .field("config", &self.config)
            .field("session_lifetime", &self.session_lifetime)
            .finish_non_exhaustive()
    }
}

impl PasswordAuth {
    /// Create a password authenticator. Fails when username or password is missing.
    pub fn new(config: AuthConfig) -> Result<Self> {
        config.validate_password_grant()?;
        let http = SfHttpClient::default_client()?;

        Ok(Self {
            config,
            http,
            cache: TokenCache::new(),
            session_lifetime: None,
        })
    }

    /// Use a specific HTTP client.
    pub fn with_http_client(mut self, http: SfHttpClient) -> Self {
        self.http = http;
        self
    }

    /// Treat cached sessions as expired `lifetime` after they were issued.
    ///
    /// Should match the org's session timeout setting.
    pub fn with_session_lifetime(mut self, lifetime: Duration) -> Self {
        self.session_lifetime = Some(lifetime);
        self
    }

    /// The config this authenticator was built from.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Run a grant against the token endpoint and cache the result.
    ///
    /// `Grant::RefreshToken` only uses the refresh grant when a refresh token
    /// is cached; otherwise the password grant runs instead.
    #[instrument(skip(self), fields(auth_url = %self.config.auth_url))]
    pub async fn authenticate_with(&self, grant: Grant) -> Result<Token> {
        let mut session = self.cache.lock().await;

        let (grant, form) = match (grant, session.refresh_token()) {
            (Grant::RefreshToken, Some(refresh_token)) => {
                (Grant::RefreshToken, self.refresh_form(refresh_token))
            }
            _ => (Grant::Password, self.password_form()?),
        };

        let response = request_token(&self.http, &self.config.auth_url, form).await?;
        response.verify_signature(self.config.client_secret())?;

        let token = Token::from_response(&response, self.session_lifetime)?;
        session.store(token.clone(), response.refresh_token);

        info!(%grant, instance_url = %token.instance_url, "Authenticated with Salesforce");
        Ok(token)
    }

    fn password_form(&self) -> Result<Vec<(&'static str, String)>> {
        let username = self.config.username.clone().ok_or_else(|| {
            Error::new(ErrorKind::InvalidCredentials("username is required".to_string()))
        })?;
        let password = self.config.login_password().ok_or_else(|| {
            Error::new(ErrorKind::InvalidCredentials("password is required".to_string()))
        })?;

        Ok(vec![
            ("grant_type", Grant::Password.as_str().to_string()),
            ("client_id", self.config.client_id.clone()),
            ("client_secret", self.config.client_secret().to_string()),
            ("username", username),
            ("password", password),
            ("format", "json".to_string()),
        ])
    }

    fn refresh_form(&self, refresh_token: &str) -> Vec<(&'static str, String)> {
        vec![
            ("grant_type", Grant::RefreshToken.as_str().to_string()),
            ("client_id", self.config.client_id.clone()),
            ("client_secret", self.config.client_secret().to_string()),
            ("refresh_token", refresh_token.to_string()),
            ("format", "json".to_string()),
        ]
    }
}

impl Authenticator for PasswordAuth {
    fn cache(&self) -> &TokenCache {
        &self.cache
    }

    async fn authenticate(&self) -> Result<Token> {
        self.authenticate_with(Grant::Password).await
    }

    async fn refresh_access_token(&self) -> Result<String> {
        let token = self.authenticate_with(Grant::RefreshToken).await?;
        Ok(token.access_token().to_string())
    }
}
