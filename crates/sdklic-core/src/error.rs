//! # Error Taxonomy
//!
//! Structured error types for license aggregation, built with `thiserror`.
//!
//! Every failure the pipeline can produce falls into one of five classes.
//! Each variant carries enough context (endpoint, offending identifier,
//! blocked file) to diagnose the fault from the log line alone.

use thiserror::Error;

/// Top-level error type for license aggregation.
#[derive(Error, Debug)]
pub enum SdklicError {
    /// A caller-supplied parameter is outside its valid set.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Transport-level failure talking to the license registry.
    #[error("license registry unavailable at {endpoint}: {reason}")]
    RegistryUnavailable {
        /// The registry endpoint that failed.
        endpoint: String,
        /// Human-readable cause (connection error, HTTP status).
        reason: String,
    },

    /// Registry data parsed but violated the expected shape.
    #[error("malformed registry data from {endpoint}: {detail}")]
    MalformedData {
        /// The registry endpoint that produced the data.
        endpoint: String,
        /// What was wrong with it.
        detail: String,
    },

    /// A license identifier has no catalog entry after defect correction.
    #[error("license '{code}' required by '{file}' is not in the registry catalog")]
    UnresolvedLicense {
        /// The (corrected) license identifier.
        code: String,
        /// The shipped file whose document it blocks.
        file: String,
    },

    /// A requested file key has no row in the license overview.
    #[error("no license overview entry for shipped file '{file_key}'")]
    UnknownShippedFile {
        /// The logical file key, or the on-disk name it resolved to.
        file_key: String,
    },

    /// Local file-system failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SdklicError {
    /// Short, stable name of the error class, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::RegistryUnavailable { .. } => "registry_unavailable",
            Self::MalformedData { .. } => "malformed_data",
            Self::UnresolvedLicense { .. } => "unresolved_license",
            Self::UnknownShippedFile { .. } => "unknown_shipped_file",
            Self::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_license_names_code_and_file() {
        let err = SdklicError::UnresolvedLicense {
            code: "glslangPreprocessor".into(),
            file: "glslangValidator.exe".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("glslangPreprocessor"));
        assert!(msg.contains("glslangValidator.exe"));
        assert_eq!(err.kind(), "unresolved_license");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SdklicError = io.into();
        assert_eq!(err.kind(), "io");
    }
}
