use serde::de::DeserializeOwned;
use tracing::instrument;

use salesforce_rest_auth::Authenticator;
use salesforce_rest_client::QueryResult;

use crate::error::Result;
use crate::sobject::Record;

impl<A: Authenticator> super::SalesforceRest<A> {
    /// Run a SOQL query and return the first batch.
    ///
    /// The query text is URL-encoded as the `q` parameter. Values spliced
    /// into it should go through [`soql::escape_string`] first.
    ///
    /// [`soql::escape_string`]: salesforce_rest_client::security::soql::escape_string
    #[instrument(skip(self))]
    pub async fn query(&self, soql: &str) -> Result<QueryResult<Record>> {
        self.query_as(soql).await
    }

    /// Run a SOQL query, deserializing records into `T`.
    #[instrument(skip(self))]
    pub async fn query_as<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        self.with_session(|client| async move { client.query(soql).await })
            .await
    }

    /// Fetch the batch behind a `nextRecordsUrl`.
    #[instrument(skip(self))]
    pub async fn query_more<T: DeserializeOwned>(
        &self,
        next_records_url: &str,
    ) -> Result<QueryResult<T>> {
        self.with_session(|client| async move { client.query_more(next_records_url).await })
            .await
    }

    /// Run a SOQL query and follow `nextRecordsUrl` until every record is fetched.
    #[instrument(skip(self))]
    pub async fn query_all(&self, soql: &str) -> Result<Vec<Record>> {
        let mut result: QueryResult<Record> = self.query_as(soql).await?;
        let mut records = std::mem::take(&mut result.records);

        while let Some(next_url) = result.next_records_url.take() {
            result = self.query_more(&next_url).await?;
            records.append(&mut result.records);
        }

        Ok(records)
    }
}
