use serde::de::DeserializeOwned;
use tracing::instrument;

use salesforce_rest_auth::Authenticator;

use super::{check_id, check_sobject};
use crate::error::Result;
use crate::list_views::{ListViewCollection, ListViewDescribe, ListViewResult};

impl<A: Authenticator> super::SalesforceRest<A> {
    /// List the list views defined on an SObject.
    #[instrument(skip(self))]
    pub async fn list_views(&self, sobject: &str) -> Result<ListViewCollection> {
        check_sobject(sobject)?;
        let path = format!("sobjects/{}/listviews", sobject);
        let path = path.as_str();

        self.with_session(|client| async move { client.rest_get(path).await })
            .await
    }

    /// Columns, sort order and SOQL of a list view.
    #[instrument(skip(self))]
    pub async fn describe_list_view(
        &self,
        sobject: &str,
        list_view_id: &str,
    ) -> Result<ListViewDescribe> {
        check_sobject(sobject)?;
        check_id(list_view_id)?;
        let path = format!("sobjects/{}/listviews/{}/describe", sobject, list_view_id);
        let path = path.as_str();

        self.with_session(|client| async move { client.rest_get(path).await })
            .await
    }

    /// Run a list view and return its rows.
    #[instrument(skip(self))]
    pub async fn list_view_results<T: DeserializeOwned>(
        &self,
        sobject: &str,
        list_view_id: &str,
    ) -> Result<ListViewResult<T>> {
        check_sobject(sobject)?;
        check_id(list_view_id)?;
        let path = format!("sobjects/{}/listviews/{}/results", sobject, list_view_id);
        let path = path.as_str();

        self.with_session(|client| async move { client.rest_get(path).await })
            .await
    }
}
