//! High-level Salesforce client with typed HTTP methods.
//!
//! This module provides `SalesforceClient`, which binds an instance URL and
//! access token to an HTTP client and provides typed JSON methods for API
//! interactions.
//!
//! ## Security
//!
//! - Access tokens are redacted in Debug output
//! - Sensitive parameters are skipped in tracing spans

use serde::{de::DeserializeOwned, Serialize};
use tracing::instrument;

use crate::client::SfHttpClient;
use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::RequestBuilder;
use crate::response::Response;
use crate::DEFAULT_API_VERSION;

/// High-level Salesforce API client.
///
/// Holds one session (instance URL plus access token). Higher layers that
/// renew sessions build a fresh client per call with
/// [`from_http`](Self::from_http), which shares the underlying connection
/// pool.
///
/// # Example
///
/// ```rust,ignore
/// use salesforce_rest_client::SalesforceClient;
///
/// let client = SalesforceClient::new("https://na1.salesforce.com", token)?;
///
/// let result: QueryResult<serde_json::Value> =
///     client.query("SELECT Id, Name FROM Account").await?;
/// ```
#[derive(Clone)]
pub struct SalesforceClient {
    http: SfHttpClient,
    instance_url: String,
    access_token: String,
    api_version: String,
}

impl std::fmt::Debug for SalesforceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceClient")
            .field("instance_url", &self.instance_url)
            .field("access_token", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl SalesforceClient {
    /// Create a new Salesforce client with the given instance URL and access token.
    pub fn new(instance_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        Self::with_config(instance_url, access_token, ClientConfig::default())
    }

    /// Create a new Salesforce client with custom configuration.
    pub fn with_config(
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let http = SfHttpClient::new(config)?;
        Ok(Self::from_http(http, instance_url, access_token))
    }

    /// Create a client on top of an existing HTTP client.
    pub fn from_http(
        http: SfHttpClient,
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            instance_url: instance_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Set the API version (e.g., "62.0").
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Get the instance URL.
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    /// Get the access token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Get the API version.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Build the full URL for a path.
    ///
    /// If the path starts with `/`, it's appended to the instance URL.
    /// Full URLs are accepted only when they point at the instance, since
    /// every request built from them carries the access token.
    pub fn url(&self, path: &str) -> Result<String> {
        if path.starts_with("http://") || path.starts_with("https://") {
            let rest = path.strip_prefix(self.instance_url.as_str());
            match rest {
                Some(rest) if rest.is_empty() || rest.starts_with(['/', '?']) => {
                    Ok(path.to_string())
                }
                _ => Err(Error::new(ErrorKind::InvalidUrl(format!(
                    "{} is not on the instance {}",
                    path, self.instance_url
                )))),
            }
        } else if path.starts_with('/') {
            Ok(format!("{}{}", self.instance_url, path))
        } else {
            Ok(format!("{}/{}", self.instance_url, path))
        }
    }

    /// Build the REST API URL for a path.
    ///
    /// Example: `rest_url("sobjects/Account")` -> `/services/data/v62.0/sobjects/Account`
    pub fn rest_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!(
            "{}/services/data/v{}/{}",
            self.instance_url, self.api_version, path
        )
    }

    // =========================================================================
    // Base HTTP Methods (with authentication)
    // =========================================================================

    /// Create a GET request builder with authentication.
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.http.get(url).bearer_auth(&self.access_token)
    }

    /// Create a POST request builder with authentication.
    pub fn post(&self, url: &str) -> RequestBuilder {
        self.http.post(url).bearer_auth(&self.access_token)
    }

    /// Create a PATCH request builder with authentication.
    pub fn patch(&self, url: &str) -> RequestBuilder {
        self.http.patch(url).bearer_auth(&self.access_token)
    }

    /// Create a DELETE request builder with authentication.
    pub fn delete(&self, url: &str) -> RequestBuilder {
        self.http.delete(url).bearer_auth(&self.access_token)
    }

    /// Execute a request and return the raw response.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        self.http.execute(request).await
    }

    /// Check that a successful response carries the status the endpoint promises.
    pub fn expect_status(response: &Response, expected: u16) -> Result<()> {
        let actual = response.status();
        if actual == expected {
            Ok(())
        } else {
            Err(Error::new(ErrorKind::UnexpectedStatus { expected, actual }))
        }
    }

    // =========================================================================
    // Typed JSON Methods
    // =========================================================================

    /// GET request with JSON response deserialization.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let request = self.get(&self.url(url)?);
        let response = self.http.execute(request).await?;
        Self::expect_status(&response, 200)?;
        response.json().await
    }

    /// GET request to REST API with JSON response.
    pub async fn rest_get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_json(&self.rest_url(path)).await
    }

    /// POST request with JSON body; the response must be `expected`.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        expected: u16,
    ) -> Result<T> {
        let request = self.post(&self.url(url)?).json(body)?;
        let response = self.http.execute(request).await?;
        Self::expect_status(&response, expected)?;
        response.json().await
    }

    /// POST request to REST API with JSON body and response.
    pub async fn rest_post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        expected: u16,
    ) -> Result<T> {
        self.post_json(&self.rest_url(path), body, expected).await
    }

    /// PATCH request with JSON body.
    ///
    /// Returns the raw response so callers that accept several statuses
    /// (upsert) can inspect it.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn patch_json<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Response> {
        let request = self.patch(&self.url(url)?).json(body)?;
        self.http.execute(request).await
    }

    /// PATCH request to REST API that must answer 204 No Content.
    pub async fn rest_patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let response = self.patch_json(&self.rest_url(path), body).await?;
        Self::expect_status(&response, 204)
    }

    /// DELETE request that must answer 204 No Content.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn delete_request(&self, url: &str) -> Result<()> {
        let request = self.delete(&self.url(url)?);
        let response = self.http.execute(request).await?;
        Self::expect_status(&response, 204)
    }

    /// DELETE request to REST API.
    pub async fn rest_delete(&self, path: &str) -> Result<()> {
        self.delete_request(&self.rest_url(path)).await
    }

    // =========================================================================
    // Query Helpers
    // =========================================================================

    /// Execute a SOQL query via REST API.
    pub async fn query<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        let encoded = urlencoding::encode(soql);
        let url = format!(
            "{}/services/data/v{}/query?q={}",
            self.instance_url, self.api_version, encoded
        );
        self.get_json(&url).await
    }

    /// Fetch the next batch of a query from its `nextRecordsUrl`.
    pub async fn query_more<T: DeserializeOwned>(
        &self,
        next_records_url: &str,
    ) -> Result<QueryResult<T>> {
        self.get_json(next_records_url).await
    }

    /// Execute a SOQL query and automatically fetch all pages.
    pub async fn query_all<T: DeserializeOwned>(&self, soql: &str) -> Result<Vec<T>> {
        let mut result: QueryResult<T> = self.query(soql).await?;
        let mut all_records = std::mem::take(&mut result.records);

        while let Some(next_url) = result.next_records_url.take() {
            result = self.query_more(&next_url).await?;
            all_records.append(&mut result.records);
        }

        Ok(all_records)
    }
}

/// Result of a SOQL query.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct QueryResult<T> {
    /// Total number of records matching the query.
    #[serde(rename = "totalSize")]
    pub total_size: u64,

    /// Whether all records are returned (no more pages).
    pub done: bool,

    /// URL to fetch next batch of results.
    #[serde(rename = "nextRecordsUrl", default)]
    pub next_records_url: Option<String>,

    /// The records.
    pub records: Vec<T>,
}
