//! OAuth 2.0 web-server (authorization code) flow.
//!
//! The flow has two legs that happen in different requests of the host
//! application:
//!
//! 1. [`WebServerAuth::start_authorization`] (or [`Authenticator::authenticate`]
//!    with nothing cached) yields the URL to send the user to.
//! 2. Salesforce redirects the user back to the callback URL with a `code`;
//!    [`WebServerAuth::handle_callback`] exchanges it for a session.

use chrono::Duration;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use salesforce_rest_client::SfHttpClient;

use crate::authenticator::Authenticator;
use crate::config::AuthConfig;
use crate::endpoint::request_token;
use crate::error::{Error, ErrorKind, Result};
use crate::token::{Grant, Session, Token, TokenCache};

/// Query parameters Salesforce appends to the callback URL.
#[derive(Debug, Default, Deserialize)]
struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// Authorization-code authenticator for web applications.
///
/// Sessions come from an interactive login; once a refresh token is cached,
/// expired sessions are renewed without the user.
pub struct WebServerAuth {
    config: AuthConfig,
    callback_url: String,
    http: SfHttpClient,
    cache: TokenCache,
    session_lifetime: Option<Duration>,
    pending_state: Mutex<Option<String>>,
}

impl std::fmt::Debug for WebServerAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebServerAuth")
            .field("config", &self.config)
            .field("session_lifetime", &self.session_lifetime)
            .finish_non_exhaustive()
    }
}

impl WebServerAuth {
    /// Create a web-server authenticator. The config must carry a callback URL.
    pub fn new(config: AuthConfig) -> Result<Self> {
        let callback_url = config.callback_url.clone().ok_or_else(|| {
            Error::new(ErrorKind::Config(
                "callback_url is required for the web-server flow".to_string(),
            ))
        })?;

        Ok(Self {
            config,
            callback_url,
            http: SfHttpClient::default_client()?,
            cache: TokenCache::new(),
            session_lifetime: None,
            pending_state: Mutex::new(None),
        })
    }

    /// Use a specific HTTP client.
    pub fn with_http_client(mut self, http: SfHttpClient) -> Self {
        self.http = http;
        self
    }

    /// Treat cached sessions as expired `lifetime` after they were issued.
    pub fn with_session_lifetime(mut self, lifetime: Duration) -> Self {
        self.session_lifetime = Some(lifetime);
        self
    }

    /// The config this authenticator was built from.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Build the URL of the Salesforce login page.
    pub fn authorization_url(&self, state: Option<&str>) -> String {
        let mut url = format!(
            "{}?response_type=code&client_id={}&redirect_uri={}",
            self.config.authorize_url(),
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.callback_url),
        );

        let scopes = self.config.scopes.join(" ");
        if !scopes.is_empty() {
            url.push_str(&format!("&scope={}", urlencoding::encode(&scopes)));
        }

        if let Some(state) = state {
            url.push_str(&format!("&state={}", urlencoding::encode(state)));
        }

        url
    }

    /// Issue a fresh `state` and return the login URL carrying it.
    ///
    /// The callback must echo the same state back. Any state issued
    /// earlier is replaced.
    pub async fn start_authorization(&self) -> String {
        let state = uuid::Uuid::new_v4().to_string();
        let url = self.authorization_url(Some(&state));
        *self.pending_state.lock().await = Some(state);
        url
    }

    /// The login URL for the login already in progress, or for a new one.
    ///
    /// Unlike [`start_authorization`](Self::start_authorization) this keeps
    /// a pending state, so a user on the login page can still complete it.
    pub async fn pending_authorization(&self) -> String {
        let mut pending = self.pending_state.lock().await;
        let state = pending
            .get_or_insert_with(|| uuid::Uuid::new_v4().to_string())
            .clone();
        self.authorization_url(Some(&state))
    }

    /// Exchange an authorization code for a session and cache it.
    ///
    /// The code is not logged.
    #[instrument(skip(self, code))]
    pub async fn exchange_code(&self, code: &str) -> Result<Token> {
        let form = vec![
            ("grant_type", "authorization_code".to_string()),
            ("code", code.to_string()),
            ("client_id", self.config.client_id.clone()),
            ("client_secret", self.config.client_secret().to_string()),
            ("redirect_uri", self.callback_url.clone()),
            ("format", "json".to_string()),
        ];

        let mut session = self.cache.lock().await;
        let token = self.run_grant(form, &mut session).await?;
        info!(instance_url = %token.instance_url, "Authorized through web-server flow");
        Ok(token)
    }

    /// Complete the flow from the URL Salesforce redirected the user to.
    #[instrument(skip_all)]
    pub async fn handle_callback(&self, callback_url: &str) -> Result<Token> {
        let url = url::Url::parse(callback_url)?;
        let params: CallbackParams = serde_urlencoded::from_str(url.query().unwrap_or_default())?;

        if let Some(error) = params.error {
            return Err(Error::new(ErrorKind::OAuth {
                error,
                description: params.error_description.unwrap_or_default(),
            }));
        }

        {
            // The issued state is only consumed by a callback that echoes it
            let mut pending = self.pending_state.lock().await;
            if let Some(expected) = pending.as_deref() {
                if params.state.as_deref() != Some(expected) {
                    warn!("Callback state does not match the issued state");
                    return Err(Error::new(ErrorKind::StateMismatch));
                }
            }
            pending.take();
        }

        let code = params.code.ok_or_else(|| {
            Error::new(ErrorKind::InvalidInput(
                "callback URL carries no authorization code".to_string(),
            ))
        })?;

        self.exchange_code(&code).await
    }

    /// Run a grant and cache its session.
    ///
    /// Signatures are checked when the response carries one.
    async fn run_grant(
        &self,
        form: Vec<(&'static str, String)>,
        session: &mut Session,
    ) -> Result<Token> {
        let response = request_token(&self.http, &self.config.auth_url, form).await?;
        if response.signature.is_some() {
            response.verify_signature(self.config.client_secret())?;
        }

        let token = Token::from_response(&response, self.session_lifetime)?;
        session.store(token.clone(), response.refresh_token);
        Ok(token)
    }

    async fn refresh_grant(&self) -> Result<Token> {
        let mut session = self.cache.lock().await;
        let Some(refresh_token) = session.refresh_token().map(str::to_string) else {
            return Err(Error::new(ErrorKind::TokenExpired));
        };

        let form = vec![
            ("grant_type", Grant::RefreshToken.as_str().to_string()),
            ("client_id", self.config.client_id.clone()),
            ("client_secret", self.config.client_secret().to_string()),
            ("refresh_token", refresh_token),
            ("format", "json".to_string()),
        ];

        let token = self.run_grant(form, &mut session).await?;
        info!(instance_url = %token.instance_url, "Refreshed web-server session");
        Ok(token)
    }
}

impl Authenticator for WebServerAuth {
    fn cache(&self) -> &TokenCache {
        &self.cache
    }

    /// Returns the cached session, renews it with the refresh token, or
    /// fails with [`ErrorKind::AuthorizationRequired`] carrying the login URL.
    async fn authenticate(&self) -> Result<Token> {
        if let Some(token) = self.cache.valid_token(chrono::Utc::now()).await {
            return Ok(token);
        }

        match self.refresh_grant().await {
            Err(err) if matches!(err.kind, ErrorKind::TokenExpired) => {
                Err(Error::new(ErrorKind::AuthorizationRequired {
                    authorization_url: self.pending_authorization().await,
                }))
            }
            other => other,
        }
    }

    async fn refresh_access_token(&self) -> Result<String> {
        let token = self.refresh_grant().await?;
        Ok(token.access_token().to_string())
    }
}
