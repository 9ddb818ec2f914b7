//! # salesforce-rest-api
//!
//! Thin wrappers over the Salesforce REST API. Each method maps to one
//! HTTP request against `{instance_url}/services/data/vNN.0/...`.
//!
//! ## Features
//!
//! - **SOQL Query** - single batch, `nextRecordsUrl` follow-up, or everything at once
//! - **SObject CRUD** - create, get, update, upsert by external ID, delete
//! - **Describe** - object and field metadata
//! - **List Views** - list, describe and run list views
//!
//! Sessions come from an [`Authenticator`](salesforce_rest_auth::Authenticator).
//! The first call authenticates, and a session Salesforce rejects with 401
//! is renewed once before the call is replayed.
//!
//! ## Example
//!
//! ```rust,ignore
//! use salesforce_rest_api::SalesforceRest;
//! use salesforce_rest_auth::{AuthConfig, PasswordAuth};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), salesforce_rest_api::Error> {
//!     let auth = PasswordAuth::new(AuthConfig::from_env()?)?;
//!     let sf = SalesforceRest::new(auth)?;
//!
//!     let accounts = sf.query_all("SELECT Id, Name FROM Account LIMIT 10").await?;
//!
//!     let id = sf
//!         .create("Account", &serde_json::json!({"Name": "New Account"}))
//!         .await?;
//!     sf.update("Account", &id, &serde_json::json!({"Name": "Updated"}))
//!         .await?;
//!     sf.delete("Account", &id).await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod describe;
mod error;
mod list_views;
mod sobject;

pub use client::SalesforceRest;

pub use describe::{
    DescribeGlobalResult, DescribeSObjectResult, FieldDescribe, PicklistValue, SObjectBasicInfo,
};
pub use error::{Error, ErrorKind, Result};
pub use list_views::{
    ListView, ListViewCollection, ListViewColumn, ListViewDescribe, ListViewOrderBy,
    ListViewResult,
};
pub use sobject::{CreateResult, Record, SalesforceError, UpsertResult};

pub use salesforce_rest_client::QueryResult;
