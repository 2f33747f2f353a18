//! # Registry Session
//!
//! One run's view of the registry. The overview and catalog do not depend
//! on the file being generated, so each is fetched at most once per run, on
//! first use. License records are memoized by record id, so a license shared
//! by several requested files is fetched once. Nothing outlives the run.

use std::collections::HashMap;

use sdklic_core::{LicenseCatalog, LicenseOverview, LicenseText, Platform, SdklicError};
use sdklic_registry::RegistryClient;

#[derive(Debug)]
pub struct RegistrySession {
    client: RegistryClient,
    platform: Platform,
    version: String,
    overview: Option<LicenseOverview>,
    catalog: Option<LicenseCatalog>,
    texts: HashMap<String, LicenseText>,
}

impl RegistrySession {
    pub fn new(client: RegistryClient, platform: Platform, version: impl Into<String>) -> Self {
        Self {
            client,
            platform,
            version: version.into(),
            overview: None,
            catalog: None,
            texts: HashMap::new(),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The release overview, fetched on first call.
    pub async fn overview(&mut self) -> Result<&LicenseOverview, SdklicError> {
        let overview = match self.overview.take() {
            Some(cached) => cached,
            None => {
                self.client
                    .fetch_overview(self.platform, &self.version)
                    .await?
            }
        };
        Ok(self.overview.insert(overview))
    }

    /// The license catalog, fetched on first call.
    pub async fn catalog(&mut self) -> Result<&LicenseCatalog, SdklicError> {
        let catalog = match self.catalog.take() {
            Some(cached) => cached,
            None => self.client.fetch_catalog().await?,
        };
        Ok(self.catalog.insert(catalog))
    }

    /// The license record with `record_id`, fetched on first request for that id.
    pub async fn text(&mut self, record_id: &str) -> Result<&LicenseText, SdklicError> {
        let text = match self.texts.remove(record_id) {
            Some(cached) => {
                tracing::debug!(record_id, "license record served from run cache");
                cached
            }
            None => self.client.fetch_text(record_id).await?,
        };
        Ok(self.texts.entry(record_id.to_string()).or_insert(text))
    }
}
