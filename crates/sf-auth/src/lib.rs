//! # salesforce-rest-auth
//!
//! Authentication for the Salesforce REST API.
//!
//! ## Security
//!
//! - Sensitive data (tokens, secrets, passwords) is redacted in Debug output
//! - Tracing skips credential parameters
//! - Every token response signature is checked against the consumer secret
//!   before the session is cached
//!
//! ## Supported Flows
//!
//! - **Username-password** ([`PasswordAuth`]): server-side integrations
//! - **Web server / authorization code** ([`WebServerAuth`]): interactive
//!   logins, renewed through the refresh token
//!
//! Both implement [`Authenticator`], which caches the session and
//! authenticates lazily on first use.
//!
//! ## Example
//!
//! ```rust,ignore
//! use salesforce_rest_auth::{AuthConfig, Authenticator, PasswordAuth};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), salesforce_rest_auth::Error> {
//!     let config = AuthConfig::new("consumer_key", "consumer_secret")
//!         .with_password("user@example.com", "password")
//!         .with_security_token("token");
//!
//!     let auth = PasswordAuth::new(config)?;
//!     let instance_url = auth.instance_url().await?;
//!
//!     Ok(())
//! }
//! ```

mod authenticator;
mod config;
mod endpoint;
mod error;
mod oauth;
mod password;
pub mod signature;
mod token;

pub use authenticator::Authenticator;
pub use config::AuthConfig;
pub use error::{Error, ErrorKind, Result};
pub use oauth::WebServerAuth;
pub use password::PasswordAuth;
pub use token::{Grant, Session, Token, TokenCache, TokenResponse};

/// Default Salesforce login URL for production.
pub const PRODUCTION_LOGIN_URL: &str = "https://login.salesforce.com";

/// Default Salesforce login URL for sandbox.
pub const SANDBOX_LOGIN_URL: &str = "https://test.salesforce.com";
