//! # Defect Correction
//!
//! The registry's overview data contains identifier typos that its catalog
//! does not. Summaries are rewritten through a [`CorrectionTable`] before
//! their codes are used as catalog keys.
//!
//! The table is a plain value: built once at startup from the built-in
//! defects plus an optional YAML file, then only read. New registry defects
//! are handled by adding an entry, either to [`BUILTIN_CORRECTIONS`] or to
//! the operator's corrections file:
//!
//! ```yaml
//! glslangPreprocesssor: glslangPreprocessor
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::SdklicError;
use crate::license::LicenseSummary;

/// Known-bad license codes published by the registry, and their fixes.
pub const BUILTIN_CORRECTIONS: &[(&str, &str)] = &[("glslangPreprocesssor", "glslangPreprocessor")];

/// Mapping from known-bad license code to its canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionTable {
    fixes: BTreeMap<String, String>,
}

impl Default for CorrectionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CorrectionTable {
    /// Table containing only [`BUILTIN_CORRECTIONS`].
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_CORRECTIONS.iter().copied())
    }

    pub fn empty() -> Self {
        Self {
            fixes: BTreeMap::new(),
        }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fixes: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parse a YAML mapping of `bad: good` entries.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SdklicError> {
        let fixes: BTreeMap<String, String> = serde_yaml::from_str(yaml).map_err(|e| {
            SdklicError::InvalidArgument(format!("corrections file is not a string mapping: {e}"))
        })?;
        Ok(Self { fixes })
    }

    /// Built-in corrections extended by the entries in a YAML file.
    /// File entries override built-in entries with the same key.
    pub fn builtin_with_file(path: &Path) -> Result<Self, SdklicError> {
        let content = std::fs::read_to_string(path)?;
        let mut table = Self::builtin();
        table.extend(Self::from_yaml_str(&content)?);
        tracing::debug!(path = %path.display(), entries = table.len(), "loaded defect corrections");
        Ok(table)
    }

    pub fn extend(&mut self, other: CorrectionTable) {
        self.fixes.extend(other.fixes);
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    /// Corrected form of `code`, or `code` itself when it is not a known defect.
    pub fn correct_code<'a>(&'a self, code: &'a str) -> &'a str {
        self.fixes.get(code).map_or(code, String::as_str)
    }

    /// Rewrite every known-bad code in `summary`. Order and all other fields
    /// are left as they were.
    pub fn correct(&self, mut summary: LicenseSummary) -> LicenseSummary {
        for code in &mut summary.license_ids {
            if let Some(fixed) = self.fixes.get(code.as_str()) {
                tracing::debug!(
                    file = %summary.shipped_file_name,
                    from = %code,
                    to = %fixed,
                    "corrected registry license code"
                );
                *code = fixed.clone();
            }
        }
        summary
    }
}
