//! # Document Assembler
//!
//! Turns a license summary into a combined license document:
//! correct the summary's codes, resolve every code against the catalog,
//! fetch each record, and render one section per code in declared order.
//!
//! All codes are resolved before any record is fetched, so an unknown code
//! fails the file without spending requests on the others.

use chrono::NaiveDate;

use sdklic_core::{CombinedLicenseDocument, CorrectionTable, LicenseSummary, SdklicError};

use crate::session::RegistrySession;

#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    corrections: CorrectionTable,
    generated_on: NaiveDate,
}

impl DocumentAssembler {
    /// An assembler stamping documents with `generated_on` (date line and
    /// substituted years).
    pub fn new(corrections: CorrectionTable, generated_on: NaiveDate) -> Self {
        Self {
            corrections,
            generated_on,
        }
    }

    /// An assembler stamping documents with today's local date.
    pub fn today(corrections: CorrectionTable) -> Self {
        Self::new(corrections, chrono::Local::now().date_naive())
    }

    pub fn corrections(&self) -> &CorrectionTable {
        &self.corrections
    }

    pub async fn assemble(
        &self,
        session: &mut RegistrySession,
        summary: LicenseSummary,
        version: &str,
    ) -> Result<CombinedLicenseDocument, SdklicError> {
        let summary = self.corrections.correct(summary);

        let record_ids = {
            let catalog = session.catalog().await?;
            summary
                .license_ids
                .iter()
                .map(|code| {
                    catalog
                        .resolve(code)
                        .map(|entry| entry.registry_record_id.clone())
                        .ok_or_else(|| SdklicError::UnresolvedLicense {
                            code: code.clone(),
                            file: summary.shipped_file_name.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        let mut document = CombinedLicenseDocument::new(self.generated_on, version);
        for record_id in &record_ids {
            let text = session.text(record_id).await?;
            document.push_section(text, &summary.copyright_holder);
        }

        tracing::debug!(
            file = %summary.shipped_file_name,
            sections = document.section_count(),
            "assembled combined license document"
        );
        Ok(document)
    }
}
