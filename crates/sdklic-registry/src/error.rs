//! Registry client error types.

use sdklic_core::SdklicError;

/// Errors from license registry calls.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Registry returned a non-2xx status.
    #[error("registry {endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response was received but does not have the expected shape.
    #[error("malformed response from {endpoint}: {detail}")]
    Malformed { endpoint: String, detail: String },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl From<RegistryError> for SdklicError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Http { endpoint, source } => SdklicError::RegistryUnavailable {
                endpoint,
                reason: source.to_string(),
            },
            RegistryError::Status {
                endpoint, status, ..
            } => SdklicError::RegistryUnavailable {
                endpoint,
                reason: format!("HTTP status {status}"),
            },
            RegistryError::Malformed { endpoint, detail } => {
                SdklicError::MalformedData { endpoint, detail }
            }
            RegistryError::Config(e) => SdklicError::InvalidArgument(e.to_string()),
        }
    }
}
