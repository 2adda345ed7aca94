use credmig_common::{CredentialRecord, RecordError, path_segment};

pub const SCHEME: &str = "http";
pub const CREDS_PATH: &str = "/v1/creds";
pub const SUB_TYPE_PARAM: &str = "subType";

/// `http://{host_port}/v1/creds/{category}`
pub fn creation_url(host_port: &str, category: &str) -> String {
    format!("{SCHEME}://{host_port}{CREDS_PATH}/{category}")
}

/// `http://{host_port}/v1/creds/{category}/{account}/{identifier}?subType={sub_type}`
///
/// Values are inserted as-is.
pub fn lookup_url(
    host_port: &str,
    category: &str,
    account: &str,
    identifier: &str,
    sub_type: &str,
) -> String {
    format!(
        "{}/{account}/{identifier}?{SUB_TYPE_PARAM}={sub_type}",
        creation_url(host_port, category)
    )
}

/// Where a single record lives on the target service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialTarget {
    pub category: String,
    pub account: String,
    pub identifier: String,
    pub sub_type: String,
}

impl CredentialTarget {
    pub fn for_record(raw_category: &str, record: &CredentialRecord) -> Result<Self, RecordError> {
        Ok(Self {
            category: path_segment(raw_category),
            account: record.account()?,
            identifier: record.identifier()?,
            sub_type: record.sub_type()?,
        })
    }

    pub fn lookup_url(&self, host_port: &str) -> String {
        lookup_url(
            host_port,
            &self.category,
            &self.account,
            &self.identifier,
            &self.sub_type,
        )
    }

    pub fn creation_url(&self, host_port: &str) -> String {
        creation_url(host_port, &self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_lookup_url() {
        assert_eq!(
            lookup_url("localhost:9090", "k8s", "a", "cfg", "KUBECONF"),
            "http://localhost:9090/v1/creds/k8s/a/cfg?subType=KUBECONF"
        );
    }

    #[test]
    fn builds_creation_url() {
        assert_eq!(
            creation_url("admin:10000", "ssh"),
            "http://admin:10000/v1/creds/ssh"
        );
    }

    #[test]
    fn target_uses_notify_segment() {
        let record: CredentialRecord = serde_json::from_value(json!({
            "acctName": "j",
            "identifier": "SLACK1",
            "subType": "SLACK",
            "clientSecret": "s"
        }))
        .unwrap();
        let target = CredentialTarget::for_record("NOTIFIER", &record).unwrap();
        assert_eq!(
            target.lookup_url("h:1"),
            "http://h:1/v1/creds/notify/j/SLACK1?subType=SLACK"
        );
        assert_eq!(target.creation_url("h:1"), "http://h:1/v1/creds/notify");
    }

    #[test]
    fn target_requires_key_fields() {
        let record: CredentialRecord =
            serde_json::from_value(json!({"acctName": "a", "subType": "SSHKEY"})).unwrap();
        assert_eq!(
            CredentialTarget::for_record("SSH", &record),
            Err(RecordError::MissingField("identifier"))
        );
    }
}
