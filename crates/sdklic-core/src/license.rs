//! # License Data Model
//!
//! Records joined from the two independently versioned registry datasets:
//! the per-release overview (shipped file → license summary) and the
//! license catalog (license code → registry record).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// License summary for one shipped file, parsed from one overview row.
///
/// `license_ids` keeps the order declared by the registry; the combined
/// document's sections follow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseSummary {
    /// SDK-relative path column of the overview row.
    pub path: String,
    /// Shipped file name with extension; the overview's key.
    pub shipped_file_name: String,
    /// Upstream package the file is built from.
    pub package: String,
    /// License codes in declared order.
    pub license_ids: Vec<String>,
    /// Copyright holder string substituted into notice bodies.
    pub copyright_holder: String,
}

impl LicenseSummary {
    /// Build a summary from the five positional overview columns.
    pub fn from_columns(
        path: &str,
        shipped_file_name: &str,
        package: &str,
        licenses_joined: &str,
        copyright_holder: &str,
    ) -> Self {
        Self {
            path: path.to_string(),
            shipped_file_name: shipped_file_name.to_string(),
            package: package.to_string(),
            license_ids: split_license_ids(licenses_joined),
            copyright_holder: copyright_holder.to_string(),
        }
    }
}

/// Split an `&`-delimited license field, trimming each code and dropping
/// empty segments. Order is preserved.
pub fn split_license_ids(joined: &str) -> Vec<String> {
    joined
        .split('&')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

/// Overview for one (platform, SDK version): shipped file name → summary.
pub type LicenseOverview = HashMap<String, LicenseSummary>;

/// One registry-known license.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseCatalogEntry {
    /// License code; the join key with [`LicenseSummary::license_ids`].
    pub identifier: String,
    /// Registry record id used to fetch the full text.
    pub registry_record_id: String,
    pub display_name: String,
}

/// All registry-known licenses, keyed by license code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseCatalog {
    entries: HashMap<String, LicenseCatalogEntry>,
}

impl LicenseCatalog {
    /// Build a catalog. A later entry with a repeated code replaces the earlier one.
    pub fn from_entries(entries: impl IntoIterator<Item = LicenseCatalogEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|e| (e.identifier.clone(), e))
                .collect(),
        }
    }

    pub fn resolve(&self, code: &str) -> Option<&LicenseCatalogEntry> {
        self.entries.get(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Full license record, normalized at the ingestion boundary.
///
/// `notice_body` is the canonical notice text regardless of which field
/// name the registry used for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseText {
    pub display_name: String,
    pub base_license: Option<String>,
    pub notice_body: String,
    pub created_date: Option<String>,
    pub modified_date: Option<String>,
}

impl LicenseText {
    /// The base license, if the registry gave a non-empty one.
    pub fn base_license(&self) -> Option<&str> {
        self.base_license
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
    }
}
