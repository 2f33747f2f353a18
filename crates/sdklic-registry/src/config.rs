//! License registry client configuration.
//!
//! Holds the registry base URL and the path templates of its three
//! endpoints. Defaults point to the production registry. Override via
//! environment variables or explicit construction for testing.

use std::time::Duration;

use sdklic_core::Platform;
use url::Url;

use crate::retry::RetryPolicy;

/// Production registry base URL.
pub const DEFAULT_REGISTRY_URL: &str = "https://vulkan.lunarg.com";

/// Overview CSV path; `{version}` and `{os}` are substituted.
pub const DEFAULT_OVERVIEW_PATH: &str = "software/license/vulkan-{version}-{os}-license-detail.csv";

/// Catalog JSON path.
pub const DEFAULT_CATALOG_PATH: &str = "software_license/list.json";

/// License record JSON path; `{id}` is substituted.
pub const DEFAULT_RECORD_PATH: &str = "software_license/record/{id}.json";

/// Configuration for connecting to the license registry.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Registry base URL. Default: <https://vulkan.lunarg.com>
    pub base_url: Url,
    pub overview_path: String,
    pub catalog_path: String,
    pub record_path: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Backoff for requests that never reached the registry.
    pub retry: RetryPolicy,
}

impl RegistryConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `SDKLIC_REGISTRY_URL` (default: `https://vulkan.lunarg.com`)
    /// - `SDKLIC_TIMEOUT_SECS` (default: 30)
    /// - `SDKLIC_MAX_RETRIES` (default: 3)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(None, |var| std::env::var(var).ok())
    }

    /// Build configuration from `env`, with `base_url` taking the place of
    /// `SDKLIC_REGISTRY_URL` when given. The variable is not read at all in
    /// that case, so a stale value cannot fail the run.
    pub fn from_lookup(
        base_url: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match base_url {
            Some(url) => Self::with_base_url(url)?,
            None => Self::with_base_url(
                &env("SDKLIC_REGISTRY_URL").unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string()),
            )?,
        };
        if let Some(secs) = env("SDKLIC_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            config.timeout_secs = secs;
        }
        if let Some(retries) = env("SDKLIC_MAX_RETRIES").and_then(|s| s.parse().ok()) {
            config.retry.max_retries = retries;
        }
        Ok(config)
    }

    /// Default paths and timeout against an explicit base URL.
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidUrl(base_url.to_string(), e.to_string()))?;
        Ok(Self {
            base_url,
            overview_path: DEFAULT_OVERVIEW_PATH.to_string(),
            catalog_path: DEFAULT_CATALOG_PATH.to_string(),
            record_path: DEFAULT_RECORD_PATH.to_string(),
            timeout_secs: 30,
            retry: RetryPolicy::default(),
        })
    }

    /// Create a configuration pointing to a local mock server (for testing).
    pub fn local_mock(uri: &str) -> Result<Self, ConfigError> {
        let mut config = Self::with_base_url(uri)?;
        config.timeout_secs = 5;
        config.retry = RetryPolicy {
            max_retries: 1,
            base_delay: Duration::from_millis(10),
        };
        Ok(config)
    }

    pub fn overview_url(&self, platform: Platform, version: &str) -> String {
        self.endpoint_url(
            &self
                .overview_path
                .replace("{version}", version)
                .replace("{os}", platform.as_str()),
        )
    }

    pub fn catalog_url(&self) -> String {
        self.endpoint_url(&self.catalog_path)
    }

    pub fn record_url(&self, record_id: &str) -> String {
        self.endpoint_url(&self.record_path.replace("{id}", record_id))
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid registry URL {0}: {1}")]
    InvalidUrl(String, String),
}
