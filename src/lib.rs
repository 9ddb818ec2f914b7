//! # salesforce-rest
//!
//! A Salesforce REST API client for Rust.
//!
//! Authenticates with either the username-password flow or the OAuth 2.0
//! web-server (authorization code) flow, validates the signature of every
//! token Salesforce issues, and wraps the REST endpoints for SOQL queries,
//! SObject CRUD, describe and list views.
//!
//! ## Security
//!
//! - Secrets and tokens are redacted in Debug output
//! - Tracing skips credential parameters
//! - Error messages sanitize anything that looks like a session ID
//!
//! ## Crates
//!
//! - **salesforce-rest-client** - HTTP plumbing, error model, SOQL/URL safety helpers
//! - **salesforce-rest-auth** - Password and web-server flows, token cache, signature checks
//! - **salesforce-rest-api** - Query, CRUD, describe and list view wrappers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use salesforce_rest::{AuthConfig, PasswordAuth, SalesforceRest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let auth = PasswordAuth::new(AuthConfig::from_env()?)?;
//!     let sf = SalesforceRest::new(auth)?;
//!
//!     for account in sf.query_all("SELECT Id, Name FROM Account LIMIT 10").await? {
//!         println!("{}", account["Name"]);
//!     }
//!
//!     Ok(())
//! }
//! ```

#[cfg(feature = "auth")]
pub use salesforce_rest_auth as auth;
#[cfg(feature = "client")]
pub use salesforce_rest_client as client;
#[cfg(feature = "rest")]
pub use salesforce_rest_api as rest;

#[cfg(feature = "auth")]
pub use salesforce_rest_auth::{AuthConfig, Authenticator, PasswordAuth, WebServerAuth};
#[cfg(feature = "client")]
pub use salesforce_rest_client::{ClientConfig, SalesforceClient};
#[cfg(feature = "rest")]
pub use salesforce_rest_api::SalesforceRest;
