//! Release license overview: one headerless CSV per (SDK version, platform).
//!
//! The first five columns of each row are, positionally:
//! `path, shipped file name, package, licenses (&-delimited), copyright`.
//! Extra trailing columns are ignored. A row with fewer than five columns
//! is a data fault and fails the whole overview.

use sdklic_core::{LicenseOverview, LicenseSummary, Platform};

use crate::error::RegistryError;
use crate::RegistryClient;

const OVERVIEW_COLUMNS: usize = 5;

impl RegistryClient {
    /// Fetch the license overview for an SDK release.
    ///
    /// Calls `GET {base_url}/software/license/vulkan-{version}-{os}-license-detail.csv`.
    pub async fn fetch_overview(
        &self,
        platform: Platform,
        version: &str,
    ) -> Result<LicenseOverview, RegistryError> {
        let endpoint = format!("GET overview {version}-{platform}");
        let url = self.config().overview_url(platform, version);
        let body = self.get_body(&endpoint, &url).await?;
        let overview = parse_overview(&endpoint, &body)?;
        tracing::info!(
            %platform,
            version,
            files = overview.len(),
            "fetched license overview"
        );
        Ok(overview)
    }
}

/// Parse an overview CSV body. A later row with the same shipped file name
/// replaces an earlier one.
pub fn parse_overview(endpoint: &str, body: &str) -> Result<LicenseOverview, RegistryError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let mut overview = LicenseOverview::new();
    for row in reader.records() {
        let row = row.map_err(|e| RegistryError::Malformed {
            endpoint: endpoint.into(),
            detail: format!("unreadable CSV: {e}"),
        })?;

        if row.iter().all(str::is_empty) {
            continue;
        }

        if row.len() < OVERVIEW_COLUMNS {
            let line = row.position().map_or(0, |p| p.line());
            return Err(RegistryError::Malformed {
                endpoint: endpoint.into(),
                detail: format!(
                    "line {line} has {} columns, expected at least {OVERVIEW_COLUMNS}",
                    row.len()
                ),
            });
        }

        let summary = LicenseSummary::from_columns(&row[0], &row[1], &row[2], &row[3], &row[4]);
        if let Some(previous) = overview.insert(summary.shipped_file_name.clone(), summary) {
            tracing::debug!(
                file = %previous.shipped_file_name,
                "duplicate overview row, keeping the later one"
            );
        }
    }
    Ok(overview)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "GET overview test";

    #[test]
    fn parses_positional_columns() {
        let body = "Bin/glslangValidator.exe,glslangValidator.exe,glslang,glslang & glslangPreprocesssor,The Khronos Group Inc.\n";
        let overview = parse_overview(ENDPOINT, body).unwrap();
        let summary = &overview["glslangValidator.exe"];
        assert_eq!(summary.path, "Bin/glslangValidator.exe");
        assert_eq!(summary.package, "glslang");
        assert_eq!(summary.license_ids, vec!["glslang", "glslangPreprocesssor"]);
        assert_eq!(summary.copyright_holder, "The Khronos Group Inc.");
    }

    #[test]
    fn first_row_is_data_not_header() {
        let body = "path,file,package,licenses,copyright\na,b.exe,pkg,MIT,Acme\n";
        let overview = parse_overview(ENDPOINT, body).unwrap();
        assert_eq!(overview.len(), 2);
        assert!(overview.contains_key("file"));
    }

    #[test]
    fn duplicate_keys_keep_the_last_row() {
        let body = "a,tool.exe,first,MIT,One\nb,tool.exe,second,Apache-2.0,Two\n";
        let overview = parse_overview(ENDPOINT, body).unwrap();
        assert_eq!(overview.len(), 1);
        assert_eq!(overview["tool.exe"].package, "second");
    }

    #[test]
    fn short_row_is_malformed() {
        let body = "a,tool.exe,pkg,MIT,Acme\nb,other.exe,pkg\n";
        let err = parse_overview(ENDPOINT, body).unwrap_err();
        match err {
            RegistryError::Malformed { detail, .. } => {
                assert!(detail.contains("line 2"), "detail: {detail}");
                assert!(detail.contains("3 columns"), "detail: {detail}");
            }
            other => panic!("expected Malformed, got: {other:?}"),
        }
    }

    #[test]
    fn quoted_fields_and_extra_columns() {
        let body = "a,tool.exe,pkg,MIT,\"Acme, Inc.\",extra\n";
        let overview = parse_overview(ENDPOINT, body).unwrap();
        assert_eq!(overview["tool.exe"].copyright_holder, "Acme, Inc.");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let body = "a,tool.exe,pkg,MIT,Acme\n\n\r\n";
        assert_eq!(parse_overview(ENDPOINT, body).unwrap().len(), 1);
    }
}
