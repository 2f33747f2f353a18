//! # Combined License Document
//!
//! Plain-text artifact aggregating every license that applies to one
//! shipped file: a generated preamble followed by one section per license,
//! in the order the license summary declares them.
//!
//! Output for identical inputs is byte-identical apart from the date line.

use chrono::{Datelike, NaiveDate};

use crate::license::LicenseText;
use crate::placeholder::substitute_placeholders;

/// Registry page listing every license text.
pub const LICENSE_INDEX_URL: &str = "https://vulkan.lunarg.com/license/";

/// Registry page with the per-release license summaries.
pub const RELEASE_SUMMARY_URL: &str = "https://vulkan.lunarg.com/license/#/release/";

/// File name of the combined document for a logical file key.
pub fn license_file_name(file_key: &str) -> String {
    format!("LICENSE_{}.txt", file_key.to_uppercase())
}

/// A combined license document under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedLicenseDocument {
    text: String,
    year: i32,
    sections: usize,
}

impl CombinedLicenseDocument {
    /// Start a document with the generation preamble.
    pub fn new(generated_on: NaiveDate, sdk_version: &str) -> Self {
        let text = [
            format!(
                "This is an automatically generated license file, created by parsing the various license files at {LICENSE_INDEX_URL}"
            ),
            format!("and the license summary at {RELEASE_SUMMARY_URL}"),
            "For the most up-to-date license information, you should consult these URLs.".to_string(),
            format!(
                "This file was generated on {} for Vulkan SDK version {sdk_version}.",
                generated_on.format("%Y/%m/%d")
            ),
            String::new(),
            String::new(),
        ]
        .join("\n");

        Self {
            text,
            year: generated_on.year(),
            sections: 0,
        }
    }

    /// Append the section for one license, substituting its placeholders.
    pub fn push_section(&mut self, license: &LicenseText, copyright_holder: &str) {
        self.text
            .push_str(&render_section(license, copyright_holder, self.year));
        self.sections += 1;
    }

    pub fn section_count(&self) -> usize {
        self.sections
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Render one license section: name, optional base license, the notice
/// label, the substituted body, and a trailing separator.
pub fn render_section(license: &LicenseText, copyright_holder: &str, year: i32) -> String {
    let mut section = String::new();
    section.push_str(&license.display_name);
    section.push('\n');
    if let Some(base) = license.base_license() {
        section.push_str(&format!("Based on: {base}\n"));
    }
    section.push_str("\nNotice:\n");
    section.push_str(&substitute_placeholders(
        &license.notice_body,
        copyright_holder,
        year,
    ));
    section.push_str("\n\n\n\n");
    section
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn text(name: &str, base: Option<&str>, body: &str) -> LicenseText {
        LicenseText {
            display_name: name.into(),
            base_license: base.map(str::to_string),
            notice_body: body.into(),
            created_date: None,
            modified_date: None,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn file_name_uppercases_key() {
        assert_eq!(license_file_name("glslangValidator"), "LICENSE_GLSLANGVALIDATOR.txt");
    }

    #[test]
    fn preamble_has_disclaimer_date_and_version() {
        let doc = CombinedLicenseDocument::new(date(), "1.3.250.1");
        let s = doc.as_str();
        assert!(s.starts_with("This is an automatically generated license file"));
        assert!(s.contains("2026/10/19"));
        assert!(s.contains("Vulkan SDK version 1.3.250.1."));
        assert!(s.ends_with(".\n\n"));
        assert_eq!(doc.section_count(), 0);
    }

    #[test]
    fn section_layout_with_base_license() {
        let out = render_section(
            &text("glslang License", Some("BSD-3-Clause"), "Copyright YYYY COPYRIGHT HOLDER"),
            "The Khronos Group Inc.",
            2026,
        );
        assert_eq!(
            out,
            "glslang License\nBased on: BSD-3-Clause\n\nNotice:\nThe Khronos Group Inc.\n\n\n\n"
        );
    }

    #[test]
    fn section_layout_without_base_license() {
        let out = render_section(&text("MIT License", Some(""), "YYYY"), "Acme", 2026);
        assert_eq!(out, "MIT License\n\nNotice:\n2026\n\n\n\n");
        assert!(!out.contains("Based on:"));
    }

    #[test]
    fn sections_use_year_of_generation_date() {
        let mut doc = CombinedLicenseDocument::new(date(), "1.3.250.1");
        doc.push_section(&text("MIT License", None, "(c) YEAR"), "Acme");
        assert!(doc.as_str().contains("(c) 2026"));
        assert_eq!(doc.section_count(), 1);
    }

    proptest! {
        #[test]
        fn sections_appear_in_push_order(names in proptest::collection::vec("[A-Z][a-z]{3,10}", 1..6)) {
            let mut doc = CombinedLicenseDocument::new(date(), "1.0.0");
            for name in &names {
                doc.push_section(&text(&format!("{name} License"), None, "body"), "Acme");
            }
            let s = doc.into_string();
            let mut cursor = 0;
            for name in &names {
                let needle = format!("{name} License\n");
                let found = s[cursor..].find(&needle);
                prop_assert!(found.is_some());
                cursor += found.unwrap_or(0) + needle.len();
            }
        }
    }
}
