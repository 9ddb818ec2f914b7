//! Salesforce REST API client.
//!
//! [`SalesforceRest`] pairs an [`Authenticator`] with an HTTP client and
//! exposes one method per REST endpoint. Every call asks the authenticator
//! for the current session, so the first call authenticates lazily.

use std::future::Future;

use tracing::{debug, warn};

use salesforce_rest_auth::{Authenticator, ErrorKind as AuthErrorKind};
use salesforce_rest_client::security::{soql, url as url_security};
use salesforce_rest_client::{SalesforceClient, SfHttpClient, DEFAULT_API_VERSION};

use crate::error::{Error, Result};

mod crud;
mod describe;
mod list_views;
mod query;

/// Salesforce REST API client.
///
/// # Example
///
/// ```rust,ignore
/// use salesforce_rest_api::SalesforceRest;
/// use salesforce_rest_auth::{AuthConfig, PasswordAuth};
///
/// let auth = PasswordAuth::new(AuthConfig::from_env()?)?;
/// let sf = SalesforceRest::new(auth)?;
///
/// let accounts = sf.query_all("SELECT Id, Name FROM Account").await?;
/// let id = sf.create("Account", &json!({"Name": "New Account"})).await?;
/// sf.update("Account", &id, &json!({"Name": "Updated"})).await?;
/// sf.delete("Account", &id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SalesforceRest<A> {
    auth: A,
    http: SfHttpClient,
    api_version: String,
}

impl<A: Authenticator> SalesforceRest<A> {
    /// Create a REST client backed by `auth` with the default HTTP configuration.
    pub fn new(auth: A) -> Result<Self> {
        Ok(Self {
            auth,
            http: SfHttpClient::default_client()?,
            api_version: DEFAULT_API_VERSION.to_string(),
        })
    }

    /// Use a specific HTTP client.
    pub fn with_http_client(mut self, http: SfHttpClient) -> Self {
        self.http = http;
        self
    }

    /// Set the API version, e.g. `"60.0"`.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// The authenticator.
    pub fn auth(&self) -> &A {
        &self.auth
    }

    /// The API version requests are sent to.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// A [`SalesforceClient`] bound to the current session.
    ///
    /// Authenticates first if nothing is cached.
    pub async fn client(&self) -> Result<SalesforceClient> {
        let token = self.auth.session().await?;
        Ok(SalesforceClient::from_http(
            self.http.clone(),
            token.instance_url.clone(),
            token.access_token(),
        )
        .with_api_version(self.api_version.clone()))
    }

    /// Run `op` against the current session.
    ///
    /// A 401 drops the cached session, renews it once and replays `op` once.
    /// Without a refresh token the authenticator starts a new session, which
    /// for the web-server flow means [`ErrorKind::AuthorizationRequired`].
    /// A second 401 goes back to the caller.
    ///
    /// [`ErrorKind::AuthorizationRequired`]: crate::ErrorKind::AuthorizationRequired
    pub(crate) async fn with_session<T, F, Fut>(&self, op: F) -> Result<T>
    where
        F: Fn(SalesforceClient) -> Fut,
        Fut: Future<Output = salesforce_rest_client::Result<T>>,
    {
        let client = self.client().await?;
        match op(client).await {
            Err(err) if err.is_auth_error() => {
                warn!(error = %err, "Session rejected; re-authenticating");
                self.auth.invalidate().await;
                if let Err(err) = self.auth.refresh_access_token().await {
                    // No refresh token cached: start over with a new session
                    if !matches!(err.kind, AuthErrorKind::TokenExpired) {
                        return Err(err.into());
                    }
                    self.auth.authenticate().await?;
                }

                let client = self.client().await?;
                debug!("Replaying request with renewed session");
                op(client).await.map_err(Into::into)
            }
            result => result.map_err(Into::into),
        }
    }
}

pub(crate) fn check_sobject(sobject: &str) -> Result<()> {
    if soql::is_safe_sobject_name(sobject) {
        Ok(())
    } else {
        Err(Error::invalid_input("INVALID_SOBJECT", "Invalid SObject name"))
    }
}

pub(crate) fn check_field(field: &str) -> Result<()> {
    if soql::is_safe_field_name(field) {
        Ok(())
    } else {
        Err(Error::invalid_input("INVALID_FIELD", "Invalid field name"))
    }
}

pub(crate) fn check_id(id: &str) -> Result<()> {
    if url_security::is_valid_salesforce_id(id) {
        Ok(())
    } else {
        Err(Error::invalid_input("INVALID_ID", "Invalid Salesforce ID format"))
    }
}
