//! List view types.

use serde::{Deserialize, Serialize};

/// A list view defined on an SObject.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    pub id: String,
    pub developer_name: String,
    pub label: String,
    #[serde(default)]
    pub describe_url: Option<String>,
    #[serde(default)]
    pub results_url: Option<String>,
    #[serde(default)]
    pub sobject_type: Option<String>,
}

/// Response of `GET sobjects/{sobject}/listviews`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListViewCollection {
    #[serde(default = "default_done")]
    pub done: bool,
    #[serde(default)]
    pub next_records_url: Option<String>,
    #[serde(default)]
    pub listviews: Vec<ListView>,
}

fn default_done() -> bool {
    true
}

impl ListViewCollection {
    /// Find a list view by developer name.
    pub fn by_developer_name(&self, developer_name: &str) -> Option<&ListView> {
        self.listviews
            .iter()
            .find(|v| v.developer_name == developer_name)
    }
}

/// Response of `GET sobjects/{sobject}/listviews/{id}/describe`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListViewDescribe {
    pub id: String,
    #[serde(default)]
    pub developer_name: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub sobject_type: Option<String>,
    /// The SOQL Salesforce runs for this view.
    pub query: String,
    #[serde(default)]
    pub columns: Vec<ListViewColumn>,
    #[serde(default)]
    pub order_by: Vec<ListViewOrderBy>,
}

/// A list view column.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListViewColumn {
    pub field_name_or_path: String,
    pub label: String,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(rename = "type", default)]
    pub field_type: Option<String>,
}

/// Sort order of a list view.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListViewOrderBy {
    pub field_name_or_path: String,
    #[serde(default)]
    pub sort_direction: Option<String>,
    #[serde(default)]
    pub nulls_position: Option<String>,
}

/// Response of `GET sobjects/{sobject}/listviews/{id}/results`.
///
/// Rows come back as `{"columns": [{"fieldNameOrPath", "value"}, ..]}`;
/// `T` is the row type, usually [`serde_json::Value`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListViewResult<T> {
    #[serde(default = "default_done")]
    pub done: bool,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub developer_name: Option<String>,
    #[serde(default)]
    pub size: u32,
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
    #[serde(default)]
    pub next_records_url: Option<String>,
}
