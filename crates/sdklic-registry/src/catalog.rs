//! License catalog: every license code the registry knows.
//!
//! Each catalog object must carry `id`, `code` and `name`; other fields are
//! ignored. Codes are used exactly as published. Identifier defects are
//! corrected on the summary side, never here.

use serde::{Deserialize, Deserializer};

use sdklic_core::{LicenseCatalog, LicenseCatalogEntry};

use crate::error::RegistryError;
use crate::RegistryClient;

#[derive(Debug, Deserialize)]
struct RawCatalogEntry {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    code: String,
    name: String,
}

impl From<RawCatalogEntry> for LicenseCatalogEntry {
    fn from(raw: RawCatalogEntry) -> Self {
        Self {
            identifier: raw.code,
            registry_record_id: raw.id,
            display_name: raw.name,
        }
    }
}

/// Record ids are numeric in current catalog exports and strings in older ones.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

impl RegistryClient {
    /// Fetch the license catalog.
    ///
    /// Calls `GET {base_url}/software_license/list.json`.
    pub async fn fetch_catalog(&self) -> Result<LicenseCatalog, RegistryError> {
        let endpoint = "GET catalog";
        let url = self.config().catalog_url();
        let body = self.get_body(endpoint, &url).await?;
        let catalog = parse_catalog(endpoint, &body)?;
        tracing::info!(licenses = catalog.len(), "fetched license catalog");
        Ok(catalog)
    }
}

/// Parse a catalog JSON body.
pub fn parse_catalog(endpoint: &str, body: &str) -> Result<LicenseCatalog, RegistryError> {
    let raw: Vec<RawCatalogEntry> =
        serde_json::from_str(body).map_err(|e| RegistryError::Malformed {
            endpoint: endpoint.into(),
            detail: format!("catalog is not an array of {{id, code, name}} objects: {e}"),
        })?;
    Ok(LicenseCatalog::from_entries(
        raw.into_iter().map(LicenseCatalogEntry::from),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_lookup_keyed_by_code() {
        let body = r#"[
            {"id": 12, "code": "MIT", "name": "MIT License", "create_date": "2019-01-01"},
            {"id": "31", "code": "glslangPreprocessor", "name": "glslang Preprocessor License"}
        ]"#;
        let catalog = parse_catalog("GET catalog", body).unwrap();
        assert_eq!(catalog.len(), 2);
        let mit = catalog.resolve("MIT").unwrap();
        assert_eq!(mit.registry_record_id, "12");
        assert_eq!(mit.display_name, "MIT License");
        assert_eq!(
            catalog.resolve("glslangPreprocessor").unwrap().registry_record_id,
            "31"
        );
    }

    #[test]
    fn missing_required_field_is_malformed() {
        let body = r#"[{"id": 12, "name": "MIT License"}]"#;
        let err = parse_catalog("GET catalog", body).unwrap_err();
        match err {
            RegistryError::Malformed { detail, .. } => {
                assert!(detail.contains("missing field `code`"), "detail: {detail}")
            }
            other => panic!("expected Malformed, got: {other:?}"),
        }
    }

    #[test]
    fn non_array_is_malformed() {
        let err = parse_catalog("GET catalog", r#"{"licenses": []}"#).unwrap_err();
        assert!(matches!(err, RegistryError::Malformed { .. }));
    }

    #[test]
    fn codes_are_not_corrected() {
        let body = r#"[{"id": 1, "code": "glslangPreprocesssor", "name": "typo"}]"#;
        let catalog = parse_catalog("GET catalog", body).unwrap();
        assert!(catalog.resolve("glslangPreprocesssor").is_some());
        assert!(catalog.resolve("glslangPreprocessor").is_none());
    }
}
