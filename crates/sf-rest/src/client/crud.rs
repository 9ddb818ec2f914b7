use serde::Serialize;
use tracing::instrument;

use salesforce_rest_auth::Authenticator;
use salesforce_rest_client::security::url as url_security;
use salesforce_rest_client::{Error as ClientError, ErrorKind as ClientErrorKind};

use super::{check_field, check_id, check_sobject};
use crate::error::{Error, ErrorKind, Result};
use crate::sobject::{CreateResult, Record, UpsertResult};

impl<A: Authenticator> super::SalesforceRest<A> {
    /// Create a record and return its ID.
    ///
    /// `POST sobjects/{sobject}` must answer 201.
    #[instrument(skip(self, record))]
    pub async fn create<T: Serialize + ?Sized + Sync>(
        &self,
        sobject: &str,
        record: &T,
    ) -> Result<String> {
        check_sobject(sobject)?;
        let path = format!("sobjects/{}", sobject);
        let path = path.as_str();

        let result: CreateResult = self
            .with_session(|client| async move { client.rest_post(path, record, 201).await })
            .await?;

        if result.success {
            Ok(result.id)
        } else {
            let (error_code, message) = result
                .errors
                .first()
                .map(|e| (e.status_code.clone(), e.message.clone()))
                .unwrap_or_else(|| ("UNKNOWN_ERROR".to_string(), "Create failed".to_string()));
            Err(Error::new(ErrorKind::Salesforce {
                error_code,
                message,
            }))
        }
    }

    /// Fetch a record by ID, optionally limited to `fields`.
    #[instrument(skip(self))]
    pub async fn get(&self, sobject: &str, id: &str, fields: &[&str]) -> Result<Record> {
        check_sobject(sobject)?;
        check_id(id)?;
        for field in fields {
            check_field(field)?;
        }

        let mut path = format!("sobjects/{}/{}", sobject, id);
        if !fields.is_empty() {
            path.push_str("?fields=");
            path.push_str(&fields.join(","));
        }
        let path = path.as_str();

        self.with_session(|client| async move { client.rest_get(path).await })
            .await
    }

    /// Update a record. `PATCH sobjects/{sobject}/{id}` must answer 204.
    #[instrument(skip(self, record))]
    pub async fn update<T: Serialize + ?Sized + Sync>(
        &self,
        sobject: &str,
        id: &str,
        record: &T,
    ) -> Result<()> {
        check_sobject(sobject)?;
        check_id(id)?;
        let path = format!("sobjects/{}/{}", sobject, id);
        let path = path.as_str();

        self.with_session(|client| async move { client.rest_patch(path, record).await })
            .await
    }

    /// Insert or update a record keyed by an external ID field.
    ///
    /// Salesforce answers 201 when it inserted a record and 200 or 204 when
    /// it updated one.
    #[instrument(skip(self, record))]
    pub async fn upsert<T: Serialize + ?Sized + Sync>(
        &self,
        sobject: &str,
        external_id_field: &str,
        external_id_value: &str,
        record: &T,
    ) -> Result<UpsertResult> {
        check_sobject(sobject)?;
        check_field(external_id_field)?;
        let path = url_security::external_id_path(sobject, external_id_field, external_id_value)
            .ok_or_else(|| Error::invalid_input("INVALID_ID", "External ID value is empty"))?;
        let path = path.as_str();

        self.with_session(|client| async move {
            let response = client.patch_json(&client.rest_url(path), record).await?;
            match response.status() {
                201 => {
                    let mut result: UpsertResult = response.json().await?;
                    result.created = true;
                    Ok(result)
                }
                200 => {
                    let mut result: UpsertResult = response.json().await?;
                    result.created = false;
                    Ok(result)
                }
                204 => Ok(UpsertResult {
                    id: None,
                    success: true,
                    created: false,
                    errors: Vec::new(),
                }),
                actual => Err(ClientError::new(ClientErrorKind::UnexpectedStatus {
                    expected: 201,
                    actual,
                })),
            }
        })
        .await
    }

    /// Delete a record. `DELETE sobjects/{sobject}/{id}` must answer 204.
    #[instrument(skip(self))]
    pub async fn delete(&self, sobject: &str, id: &str) -> Result<()> {
        check_sobject(sobject)?;
        check_id(id)?;
        let path = format!("sobjects/{}/{}", sobject, id);
        let path = path.as_str();

        self.with_session(|client| async move { client.rest_delete(path).await })
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::StaticAuth;
    use crate::error::ErrorKind;
    use crate::SalesforceRest;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ID: &str = "001xx000003DGb2AAG";

    #[tokio::test]
    async fn test_create_returns_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/data/v62.0/sobjects/Account"))
            .and(body_json(json!({"Name": "Acme"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": ID,
                "success": true,
                "errors": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let sf = SalesforceRest::new(StaticAuth::new(server.uri())).unwrap();
        let id = sf.create("Account", &json!({"Name": "Acme"})).await.unwrap();
        assert_eq!(id, ID);
    }

    #[tokio::test]
    async fn test_create_wrong_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/data/v62.0/sobjects/Account"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": ID,
                "success": true,
                "errors": []
            })))
            .mount(&server)
            .await;

        let sf = SalesforceRest::new(StaticAuth::new(server.uri())).unwrap();
        let err = sf.create("Account", &json!({"Name": "Acme"})).await.unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::UnexpectedStatus {
                expected: 201,
                actual: 200
            }
        ));
    }

    #[tokio::test]
    async fn test_create_validation_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/data/v62.0/sobjects/Account"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!([{
                "errorCode": "REQUIRED_FIELD_MISSING",
                "message": "Required fields are missing: [Name]",
                "fields": ["Name"]
            }])))
            .mount(&server)
            .await;

        let sf = SalesforceRest::new(StaticAuth::new(server.uri())).unwrap();
        let err = sf.create("Account", &json!({})).await.unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::Salesforce { ref error_code, .. } if error_code == "REQUIRED_FIELD_MISSING"
        ));
    }

    #[tokio::test]
    async fn test_get_with_fields() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/services/data/v62.0/sobjects/Account/{ID}")))
            .and(query_param("fields", "Id,Name"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "attributes": {"type": "Account"},
                "Id": ID,
                "Name": "Acme"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let sf = SalesforceRest::new(StaticAuth::new(server.uri())).unwrap();
        let record = sf.get("Account", ID, &["Id", "Name"]).await.unwrap();
        assert_eq!(record["Name"], "Acme");
    }

    #[tokio::test]
    async fn test_get_rejects_unsafe_field() {
        let sf = SalesforceRest::new(StaticAuth::new("https://na1.salesforce.com")).unwrap();
        let err = sf
            .get("Account", ID, &["Name", "Id FROM User--"])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("INVALID_FIELD"));
        assert_eq!(sf.auth().grants.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_expects_204() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path(format!("/services/data/v62.0/sobjects/Account/{ID}")))
            .and(body_json(json!({"Name": "Renamed"})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let sf = SalesforceRest::new(StaticAuth::new(server.uri())).unwrap();
        sf.update("Account", ID, &json!({"Name": "Renamed"}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_invalid_id() {
        let sf = SalesforceRest::new(StaticAuth::new("https://na1.salesforce.com")).unwrap();
        let err = sf
            .update("Account", "../limits", &json!({}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("INVALID_ID"));
    }

    #[tokio::test]
    async fn test_upsert_created() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/services/data/v62.0/sobjects/Account/External_Id__c/EXT-1"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": ID,
                "success": true,
                "errors": [],
                "created": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let sf = SalesforceRest::new(StaticAuth::new(server.uri())).unwrap();
        let result = sf
            .upsert("Account", "External_Id__c", "EXT-1", &json!({"Name": "Acme"}))
            .await
            .unwrap();
        assert!(result.created);
        assert_eq!(result.id.as_deref(), Some(ID));
    }

    #[tokio::test]
    async fn test_upsert_updated_no_content() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path(
                "/services/data/v62.0/sobjects/Account/External_Id__c/ACME%2F42",
            ))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let sf = SalesforceRest::new(StaticAuth::new(server.uri())).unwrap();
        let result = sf
            .upsert("Account", "External_Id__c", "ACME/42", &json!({"Name": "Acme"}))
            .await
            .unwrap();
        assert!(!result.created);
        assert!(result.success);
        assert!(result.id.is_none());
    }

    #[tokio::test]
    async fn test_upsert_updated_with_body() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/services/data/v62.0/sobjects/Account/External_Id__c/EXT-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": ID,
                "success": true,
                "errors": [],
                "created": false
            })))
            .mount(&server)
            .await;

        let sf = SalesforceRest::new(StaticAuth::new(server.uri())).unwrap();
        let result = sf
            .upsert("Account", "External_Id__c", "EXT-1", &json!({}))
            .await
            .unwrap();
        assert!(!result.created);
        assert_eq!(result.id.as_deref(), Some(ID));
    }

    #[tokio::test]
    async fn test_upsert_rejects_empty_value() {
        let sf = SalesforceRest::new(StaticAuth::new("https://na1.salesforce.com")).unwrap();
        let err = sf
            .upsert("Account", "External_Id__c", "", &json!({}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("INVALID_ID"));
    }

    #[tokio::test]
    async fn test_delete() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path(format!("/services/data/v62.0/sobjects/Account/{ID}")))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let sf = SalesforceRest::new(StaticAuth::new(server.uri())).unwrap();
        sf.delete("Account", ID).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path(format!("/services/data/v62.0/sobjects/Account/{ID}")))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!([{
                "errorCode": "ENTITY_IS_DELETED",
                "message": "entity is deleted"
            }])))
            .mount(&server)
            .await;

        let sf = SalesforceRest::new(StaticAuth::new(server.uri())).unwrap();
        let err = sf.delete("Account", ID).await.unwrap_err();
        assert!(err.to_string().contains("ENTITY_IS_DELETED"));
        assert_eq!(err.status(), Some(404));
    }
}
