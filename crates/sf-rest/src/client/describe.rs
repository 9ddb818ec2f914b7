use tracing::instrument;

use salesforce_rest_auth::Authenticator;

use super::check_sobject;
use crate::describe::{DescribeGlobalResult, DescribeSObjectResult, FieldDescribe};
use crate::error::Result;

impl<A: Authenticator> super::SalesforceRest<A> {
    /// List every SObject visible to the user.
    #[instrument(skip(self))]
    pub async fn describe_global(&self) -> Result<DescribeGlobalResult> {
        self.with_session(|client| async move { client.rest_get("sobjects").await })
            .await
    }

    /// Describe an SObject.
    #[instrument(skip(self))]
    pub async fn describe(&self, sobject: &str) -> Result<DescribeSObjectResult> {
        check_sobject(sobject)?;
        let path = format!("sobjects/{}/describe", sobject);
        let path = path.as_str();

        self.with_session(|client| async move { client.rest_get(path).await })
            .await
    }

    /// Field metadata of an SObject.
    pub async fn fields(&self, sobject: &str) -> Result<Vec<FieldDescribe>> {
        Ok(self.describe(sobject).await?.fields)
    }

    /// API names of an SObject's fields.
    pub async fn field_names(&self, sobject: &str) -> Result<Vec<String>> {
        Ok(self.describe(sobject).await?.field_names())
    }
}
