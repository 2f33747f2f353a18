//! Per-license records.
//!
//! Older records carry the notice text under `body`, newer ones under
//! `notice`; some carry both. `body` wins when present. This is the only
//! place that knows about the two names.

use serde::Deserialize;

use sdklic_core::LicenseText;

use crate::error::RegistryError;
use crate::RegistryClient;

#[derive(Debug, Deserialize)]
struct RawLicenseRecord {
    name: String,
    #[serde(default)]
    base_license: Option<String>,
    #[serde(default)]
    notice: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    create_date: Option<serde_json::Value>,
    #[serde(default)]
    mod_date: Option<serde_json::Value>,
}

impl RawLicenseRecord {
    fn normalize(self, endpoint: &str) -> Result<LicenseText, RegistryError> {
        let notice_body = self
            .body
            .or(self.notice)
            .ok_or_else(|| RegistryError::Malformed {
                endpoint: endpoint.into(),
                detail: format!("record '{}' has neither 'body' nor 'notice'", self.name),
            })?;

        Ok(LicenseText {
            display_name: self.name,
            base_license: self.base_license,
            notice_body,
            created_date: date_text(self.create_date),
            modified_date: date_text(self.mod_date),
        })
    }
}

fn date_text(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

impl RegistryClient {
    /// Fetch one license record by its catalog record id.
    ///
    /// Calls `GET {base_url}/software_license/record/{id}.json`.
    pub async fn fetch_text(&self, record_id: &str) -> Result<LicenseText, RegistryError> {
        let endpoint = format!("GET record {record_id}");
        let url = self.config().record_url(record_id);
        let body = self.get_body(&endpoint, &url).await?;
        let text = parse_record(&endpoint, &body)?;
        tracing::debug!(record_id, name = %text.display_name, "fetched license record");
        Ok(text)
    }
}

/// Parse a record JSON body into a normalized [`LicenseText`].
pub fn parse_record(endpoint: &str, body: &str) -> Result<LicenseText, RegistryError> {
    let raw: RawLicenseRecord =
        serde_json::from_str(body).map_err(|e| RegistryError::Malformed {
            endpoint: endpoint.into(),
            detail: format!("license record has unexpected shape: {e}"),
        })?;
    raw.normalize(endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "GET record 7";

    #[test]
    fn notice_field_is_used() {
        let body = r#"{"id": 7, "name": "MIT License", "base_license": "", "notice": "Permission is hereby granted", "code": "MIT", "create_date": "2019-03-01", "mod_date": "2021-06-30"}"#;
        let text = parse_record(ENDPOINT, body).unwrap();
        assert_eq!(text.display_name, "MIT License");
        assert_eq!(text.notice_body, "Permission is hereby granted");
        assert_eq!(text.base_license(), None);
        assert_eq!(text.created_date.as_deref(), Some("2019-03-01"));
        assert_eq!(text.modified_date.as_deref(), Some("2021-06-30"));
    }

    #[test]
    fn body_field_takes_precedence_over_notice() {
        let body = r#"{"id": 8, "name": "Old License", "notice": "stale", "body": "canonical text"}"#;
        let text = parse_record(ENDPOINT, body).unwrap();
        assert_eq!(text.notice_body, "canonical text");
    }

    #[test]
    fn body_only_record() {
        let body = r#"{"id": 9, "name": "Legacy", "base_license": null, "body": "legacy text"}"#;
        let text = parse_record(ENDPOINT, body).unwrap();
        assert_eq!(text.notice_body, "legacy text");
        assert_eq!(text.base_license, None);
    }

    #[test]
    fn missing_notice_and_body_is_malformed() {
        let body = r#"{"id": 10, "name": "Empty"}"#;
        let err = parse_record(ENDPOINT, body).unwrap_err();
        match err {
            RegistryError::Malformed { detail, .. } => assert!(detail.contains("Empty")),
            other => panic!("expected Malformed, got: {other:?}"),
        }
    }

    #[test]
    fn missing_name_is_malformed() {
        let err = parse_record(ENDPOINT, r#"{"notice": "text"}"#).unwrap_err();
        assert!(matches!(err, RegistryError::Malformed { .. }));
    }

    #[test]
    fn numeric_dates_are_kept_as_text() {
        let body = r#"{"name": "X", "notice": "n", "create_date": 1700000000, "mod_date": null}"#;
        let text = parse_record(ENDPOINT, body).unwrap();
        assert_eq!(text.created_date.as_deref(), Some("1700000000"));
        assert_eq!(text.modified_date, None);
    }
}
