//! Connected-app configuration.
//!
//! All secrets are redacted in Debug output.

use serde::Deserialize;

use crate::error::{Error, ErrorKind, Result};
use crate::{PRODUCTION_LOGIN_URL, SANDBOX_LOGIN_URL};

const TOKEN_PATH: &str = "/services/oauth2/token";
const AUTHORIZE_PATH: &str = "/services/oauth2/authorize";

/// Connected-app settings and user credentials.
///
/// Deserializes from the camelCase option keys used by Salesforce tooling
/// (`clientId`, `clientSecret`, `securityToken`, `authUrl`, `callbackUrl`);
/// snake_case keys are accepted too.
///
/// ```rust
/// use salesforce_rest_auth::AuthConfig;
///
/// let config: AuthConfig = serde_json::from_str(r#"{
///     "clientId": "3MVG9...",
///     "clientSecret": "secret",
///     "username": "user@example.com",
///     "password": "hunter2",
///     "securityToken": "XYZ"
/// }"#).unwrap();
///
/// assert_eq!(config.auth_url, "https://login.salesforce.com/services/oauth2/token");
/// ```
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    /// Consumer key of the connected app.
    #[serde(alias = "client_id")]
    pub client_id: String,
    #[serde(alias = "client_secret")]
    client_secret: String,
    /// Username for the password grant.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default, alias = "security_token")]
    security_token: Option<String>,
    /// Token endpoint.
    #[serde(default = "default_auth_url", alias = "auth_url")]
    pub auth_url: String,
    /// Redirect URI registered on the connected app (web-server flow).
    #[serde(default, alias = "callback_url")]
    pub callback_url: Option<String>,
    /// Scopes requested by the web-server flow.
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
}

fn default_auth_url() -> String {
    format!("{}{}", PRODUCTION_LOGIN_URL, TOKEN_PATH)
}

fn default_scopes() -> Vec<String> {
    vec!["api".to_string(), "refresh_token".to_string()]
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field(
                "security_token",
                &self.security_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("auth_url", &self.auth_url)
            .field("callback_url", &self.callback_url)
            .field("scopes", &self.scopes)
            .finish()
    }
}

impl AuthConfig {
    /// Create a config for a connected app against the production login host.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            username: None,
            password: None,
            security_token: None,
            auth_url: default_auth_url(),
            callback_url: None,
            scopes: default_scopes(),
        }
    }

    /// Set the username and password for the password grant.
    pub fn with_password(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the user's security token, appended to the password on login.
    pub fn with_security_token(mut self, token: impl Into<String>) -> Self {
        self.security_token = Some(token.into());
        self
    }

    /// Set the token endpoint.
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    /// Use the sandbox login host.
    pub fn sandbox(self) -> Self {
        self.with_auth_url(format!("{}{}", SANDBOX_LOGIN_URL, TOKEN_PATH))
    }

    /// Set the redirect URI for the web-server flow.
    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    /// Set the scopes.
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// The password the token endpoint expects: password followed by the
    /// security token.
    pub(crate) fn login_password(&self) -> Option<String> {
        let password = self.password.as_deref()?;
        Some(format!(
            "{}{}",
            password,
            self.security_token.as_deref().unwrap_or_default()
        ))
    }

    /// The authorize endpoint on the same host as the token endpoint.
    pub fn authorize_url(&self) -> String {
        match self.auth_url.strip_suffix(TOKEN_PATH) {
            Some(host) => format!("{}{}", host, AUTHORIZE_PATH),
            None => format!("{}{}", self.auth_url.trim_end_matches('/'), AUTHORIZE_PATH),
        }
    }

    /// Load the config from environment variables.
    ///
    /// Required:
    /// - `SF_CLIENT_ID` or `SALESFORCE_CLIENT_ID`
    /// - `SF_CLIENT_SECRET` or `SALESFORCE_CLIENT_SECRET`
    ///
    /// Optional:
    /// - `SF_USERNAME`, `SF_PASSWORD`, `SF_SECURITY_TOKEN`
    /// - `SF_AUTH_URL` (default: production token endpoint)
    /// - `SF_CALLBACK_URL`
    ///
    /// Each variable also accepts the `SALESFORCE_` prefix. Empty values count
    /// as unset.
    pub fn from_env() -> Result<Self> {
        let client_id = env_var("CLIENT_ID")
            .ok_or_else(|| Error::new(ErrorKind::EnvVar("SF_CLIENT_ID".to_string())))?;
        let client_secret = env_var("CLIENT_SECRET")
            .ok_or_else(|| Error::new(ErrorKind::EnvVar("SF_CLIENT_SECRET".to_string())))?;

        let mut config = Self::new(client_id, client_secret);
        config.username = env_var("USERNAME");
        config.password = env_var("PASSWORD");
        config.security_token = env_var("SECURITY_TOKEN");
        config.callback_url = env_var("CALLBACK_URL");
        if let Some(url) = env_var("AUTH_URL") {
            config.auth_url = url;
        }

        Ok(config)
    }

    /// Check that the password grant can be attempted.
    pub(crate) fn validate_password_grant(&self) -> Result<()> {
        if self.client_id.is_empty() {
            return Err(Error::new(ErrorKind::InvalidCredentials(
                "client_id is required".to_string(),
            )));
        }
        if self.username.as_deref().is_none_or(str::is_empty) {
            return Err(Error::new(ErrorKind::InvalidCredentials(
                "username is required for the password grant".to_string(),
            )));
        }
        if self.password.is_none() {
            return Err(Error::new(ErrorKind::InvalidCredentials(
                "password is required for the password grant".to_string(),
            )));
        }
        Ok(())
    }
}

fn env_var(suffix: &str) -> Option<String> {
    ["SF", "SALESFORCE"].iter().find_map(|prefix| {
        std::env::var(format!("{}_{}", prefix, suffix))
            .ok()
            .filter(|v| !v.is_empty())
    })
}
