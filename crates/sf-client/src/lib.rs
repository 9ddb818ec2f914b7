//! # salesforce-rest-client
//!
//! Core HTTP client infrastructure for the Salesforce REST API.
//!
//! This crate provides the foundational HTTP layer used by the auth and
//! REST crates:
//! - One request, one response: no hidden retries
//! - Compression support (gzip, deflate)
//! - Salesforce error body parsing with sanitized messages
//! - Request/response tracing
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (salesforce-rest-auth, salesforce-rest-api)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   SalesforceClient                          │
//! │  - Binds instance URL + access token + API version          │
//! │  - Provides typed JSON methods (get_json, post_json, etc.)  │
//! │  - Adds the bearer header                                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SfHttpClient                             │
//! │  - Raw HTTP with compression and tracing                    │
//! │  - Status-code to error mapping                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use salesforce_rest_client::SalesforceClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), salesforce_rest_client::Error> {
//!     let client = SalesforceClient::new("https://na1.salesforce.com", "00D...")?;
//!
//!     let accounts: salesforce_rest_client::QueryResult<serde_json::Value> = client
//!         .query("SELECT Id, Name FROM Account LIMIT 10")
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;
mod salesforce_client;
pub mod security;

pub use client::SfHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use request::{RequestBuilder, RequestMethod};
pub use response::{Response, ResponseExt};
pub use salesforce_client::{QueryResult, SalesforceClient};

/// Default Salesforce API version
pub const DEFAULT_API_VERSION: &str = "62.0";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("salesforce-rest/", env!("CARGO_PKG_VERSION"));
