use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::RecordError;

pub const ACCOUNT_FIELD: &str = "acctName";
pub const IDENTIFIER_FIELD: &str = "identifier";
pub const SUB_TYPE_FIELD: &str = "subType";

/// A single credential entry from the dump.
///
/// The shape differs per category, so the record is kept as an ordered bag of
/// fields and forwarded to the target exactly as it was read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialRecord(Map<String, Value>);

impl CredentialRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn account(&self) -> Result<String, RecordError> {
        self.key_field(ACCOUNT_FIELD)
    }

    pub fn identifier(&self) -> Result<String, RecordError> {
        self.key_field(IDENTIFIER_FIELD)
    }

    pub fn sub_type(&self) -> Result<String, RecordError> {
        self.key_field(SUB_TYPE_FIELD)
    }

    /// Textual value of one of the fields used to address the record remotely.
    ///
    /// Non-string scalars are rendered the way JSON writes them.
    pub fn key_field(&self, name: &'static str) -> Result<String, RecordError> {
        match self.0.get(name) {
            None | Some(Value::Null) => Err(RecordError::MissingField(name)),
            Some(Value::String(value)) => Ok(value.clone()),
            Some(Value::Bool(value)) => Ok(value.to_string()),
            Some(Value::Number(value)) => Ok(value.to_string()),
            Some(Value::Array(_)) | Some(Value::Object(_)) => Err(RecordError::NotScalar(name)),
        }
    }

    /// Request body for create/update: the record itself, field order kept.
    pub fn to_body(&self) -> Result<Bytes, serde_json::Error> {
        serde_json::to_vec(&self.0).map(Bytes::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(value: Value) -> CredentialRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn key_fields_are_read() {
        let rec = record(json!({
            "acctName": "shankj3",
            "identifier": "config",
            "subType": "KUBECONF",
            "k8sContents": "x"
        }));
        assert_eq!(rec.account().unwrap(), "shankj3");
        assert_eq!(rec.identifier().unwrap(), "config");
        assert_eq!(rec.sub_type().unwrap(), "KUBECONF");
    }

    #[test]
    fn scalar_key_fields_use_json_rendering() {
        let rec = record(json!({"acctName": "a", "identifier": 42, "subType": true}));
        assert_eq!(rec.identifier().unwrap(), "42");
        assert_eq!(rec.sub_type().unwrap(), "true");
    }

    #[test]
    fn missing_or_null_key_field_is_reported() {
        let rec = record(json!({"acctName": null, "identifier": "x"}));
        assert_eq!(rec.account(), Err(RecordError::MissingField("acctName")));
        assert_eq!(rec.sub_type(), Err(RecordError::MissingField("subType")));
    }

    #[test]
    fn structured_key_field_is_rejected() {
        let rec = record(json!({"acctName": ["a"]}));
        assert_eq!(rec.account(), Err(RecordError::NotScalar("acctName")));
    }

    #[test]
    fn body_keeps_field_order() {
        let rec = record(json!({
            "username": "admin",
            "password": "pw",
            "repoUrl": "insecure-docker.com:443",
            "identifier": "docker-nexus",
            "acctName": "level11consulting",
            "subType": "DOCKER"
        }));
        assert_eq!(
            String::from_utf8(rec.to_body().unwrap().to_vec()).unwrap(),
            r#"{"username":"admin","password":"pw","repoUrl":"insecure-docker.com:443","identifier":"docker-nexus","acctName":"level11consulting","subType":"DOCKER"}"#
        );
    }
}
