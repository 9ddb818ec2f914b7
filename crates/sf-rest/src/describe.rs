//! Describe result types.
//!
//! Only the parts of the describe payloads used for field and object
//! introspection are typed. Everything else Salesforce returns is ignored.

use serde::{Deserialize, Serialize};

/// Response of `GET sobjects`: every SObject visible to the user.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeGlobalResult {
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub max_batch_size: Option<u32>,
    pub sobjects: Vec<SObjectBasicInfo>,
}

impl DescribeGlobalResult {
    /// Look up an object by API name, ignoring case.
    pub fn sobject(&self, name: &str) -> Option<&SObjectBasicInfo> {
        self.sobjects
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }
}

/// One entry of the global describe.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SObjectBasicInfo {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub label_plural: Option<String>,
    #[serde(default)]
    pub key_prefix: Option<String>,
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub queryable: bool,
    #[serde(default)]
    pub createable: bool,
    #[serde(default)]
    pub updateable: bool,
    #[serde(default)]
    pub deletable: bool,
}

/// Response of `GET sobjects/{sobject}/describe`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeSObjectResult {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub label_plural: Option<String>,
    #[serde(default)]
    pub key_prefix: Option<String>,
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub createable: bool,
    #[serde(default)]
    pub updateable: bool,
    #[serde(default)]
    pub deletable: bool,
    #[serde(default)]
    pub queryable: bool,
    #[serde(default)]
    pub fields: Vec<FieldDescribe>,
}

impl DescribeSObjectResult {
    /// Look up a field by API name, ignoring case.
    pub fn field(&self, name: &str) -> Option<&FieldDescribe> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// API names of all fields, in describe order.
    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }
}

/// Field metadata.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescribe {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub length: Option<i32>,
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub createable: bool,
    #[serde(default)]
    pub updateable: bool,
    #[serde(default)]
    pub nillable: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub external_id: bool,
    #[serde(default)]
    pub id_lookup: bool,
    #[serde(default)]
    pub calculated: bool,
    #[serde(default)]
    pub default_value: Option<serde_json::Value>,
    #[serde(default)]
    pub reference_to: Vec<String>,
    #[serde(default)]
    pub relationship_name: Option<String>,
    #[serde(default)]
    pub picklist_values: Vec<PicklistValue>,
}

impl FieldDescribe {
    /// Whether the field can key an upsert.
    pub fn is_upsert_key(&self) -> bool {
        self.external_id || self.id_lookup
    }

    /// Values of the active picklist entries.
    pub fn active_picklist_values(&self) -> Vec<&str> {
        self.picklist_values
            .iter()
            .filter(|p| p.active)
            .map(|p| p.value.as_str())
            .collect()
    }
}

/// Picklist entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PicklistValue {
    pub value: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub default_value: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_global_lookup() {
        let json = r#"{
            "encoding": "UTF-8",
            "maxBatchSize": 200,
            "sobjects": [
                {"name": "Account", "label": "Account", "keyPrefix": "001", "queryable": true},
                {"name": "Invoice__c", "label": "Invoice", "custom": true}
            ]
        }"#;

        let result: DescribeGlobalResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.max_batch_size, Some(200));
        assert!(result.sobject("account").unwrap().queryable);
        assert!(result.sobject("INVOICE__C").unwrap().custom);
        assert!(result.sobject("Contact").is_none());
    }

    #[test]
    fn test_field_describe() {
        let json = r#"{
            "name": "Industry",
            "label": "Industry",
            "type": "picklist",
            "length": 255,
            "createable": true,
            "nillable": true,
            "referenceTo": [],
            "picklistValues": [
                {"value": "Banking", "label": "Banking", "active": true, "defaultValue": false},
                {"value": "Legacy", "label": "Legacy", "active": false, "defaultValue": false}
            ],
            "someFieldWeIgnore": 42
        }"#;

        let field: FieldDescribe = serde_json::from_str(json).unwrap();
        assert_eq!(field.field_type, "picklist");
        assert_eq!(field.length, Some(255));
        assert!(field.createable);
        assert!(!field.is_upsert_key());
        assert_eq!(field.active_picklist_values(), vec!["Banking"]);
    }

    #[test]
    fn test_sobject_field_names() {
        let json = r#"{
            "name": "Account",
            "label": "Account",
            "fields": [
                {"name": "Id", "label": "Account ID", "type": "id", "idLookup": true},
                {"name": "Name", "label": "Account Name", "type": "string"}
            ]
        }"#;

        let describe: DescribeSObjectResult = serde_json::from_str(json).unwrap();
        assert_eq!(describe.field_names(), vec!["Id", "Name"]);
        assert!(describe.field("id").unwrap().is_upsert_key());
    }
}
