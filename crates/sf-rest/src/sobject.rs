//! SObject record results.

use serde::{Deserialize, Serialize};

/// Untyped SObject payload.
///
/// Records pass through as JSON objects keyed by field API name.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Body of a `201 Created` answer to `POST sobjects/{sobject}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateResult {
    pub id: String,
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<SalesforceError>,
}

/// Outcome of an upsert by external ID.
///
/// Salesforce answers 201 with a body when it inserted a record and 204
/// (or 200 on newer API versions) when it updated one, so `id` is only
/// known for inserts unless the body carries it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpsertResult {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub created: bool,
    #[serde(default)]
    pub errors: Vec<SalesforceError>,
}

fn default_success() -> bool {
    true
}

/// Error entry inside a record result.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SalesforceError {
    #[serde(rename = "statusCode")]
    pub status_code: String,
    pub message: String,
    #[serde(default)]
    pub fields: Vec<String>,
}
