//! # sdklic-registry -- Typed client for the remote license registry
//!
//! The registry is a read-only data provider with three endpoints:
//!
//! - **Overview** (`{version}-{os}-license-detail.csv`): headerless CSV
//!   mapping each shipped file of an SDK release to its license summary.
//! - **Catalog** (`list.json`): every license the registry knows, with the
//!   record id that holds its text.
//! - **Record** (`record/{id}.json`): one license's name, base license and
//!   notice body.
//!
//! The two datasets are versioned independently and the record schema is
//! inconsistent across eras; every shape check and field normalization
//! happens here, so callers only ever see `sdklic-core` types.

pub mod catalog;
pub mod config;
pub mod error;
pub mod overview;
pub mod record;
pub mod retry;

pub use config::RegistryConfig;
pub use error::RegistryError;
pub use retry::RetryPolicy;

use std::time::Duration;

/// HTTP client for the license registry.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    config: RegistryConfig,
}

impl RegistryClient {
    /// Create a new registry client from configuration.
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("sdklic/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RegistryError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// GET `url` and return the body of a successful response.
    async fn get_body(&self, endpoint: &str, url: &str) -> Result<String, RegistryError> {
        tracing::debug!(endpoint, url, "registry request");

        let resp = retry::with_backoff(&self.config.retry, endpoint, retry::is_transient, || {
            self.http.get(url).send()
        })
        .await
            .map_err(|e| RegistryError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(RegistryError::Status {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        resp.text().await.map_err(|e| RegistryError::Http {
            endpoint: endpoint.into(),
            source: e,
        })
    }
}
