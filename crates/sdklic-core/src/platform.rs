//! # Target Platform and Architecture
//!
//! The registry publishes one license overview per operating system, so the
//! platform is a closed enum. Parsing is the only way in from a string and
//! rejects anything outside the set before any network call can happen.

use serde::{Deserialize, Serialize};

use crate::error::SdklicError;

/// Operating system an SDK release targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    MacOs,
    Windows,
    Linux,
}

impl Platform {
    pub fn all() -> &'static [Platform] {
        &[Self::MacOs, Self::Windows, Self::Linux]
    }

    /// Identifier used in registry URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MacOs => "macos",
            Self::Windows => "windows",
            Self::Linux => "linux",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = SdklicError;

    /// Case-insensitive; `darwin` is accepted as an alias for `macos`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "macos" | "darwin" => Ok(Self::MacOs),
            "windows" => Ok(Self::Windows),
            "linux" => Ok(Self::Linux),
            other => Err(SdklicError::InvalidArgument(format!(
                "unknown operating system '{other}' (expected one of macos, windows, linux)"
            ))),
        }
    }
}

/// SDK binary architecture. Selects which binary directory is scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arch {
    X86,
    X86_64,
}

impl Arch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X86 => "x86",
            Self::X86_64 => "x86_64",
        }
    }

    /// Name of the binary directory under the SDK root.
    pub fn bin_dir(&self) -> &'static str {
        match self {
            Self::X86 => "Bin32",
            Self::X86_64 => "Bin",
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Arch {
    type Err = SdklicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x86" => Ok(Self::X86),
            "x86_64" => Ok(Self::X86_64),
            other => Err(SdklicError::InvalidArgument(format!(
                "unknown architecture '{other}' (expected x86 or x86_64)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn darwin_and_macos_are_the_same_platform() {
        let a: Platform = "Darwin".parse().unwrap();
        let b: Platform = "macos".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "macos");
    }

    #[test]
    fn platform_parse_is_case_insensitive() {
        assert_eq!("WINDOWS".parse::<Platform>().unwrap(), Platform::Windows);
        assert_eq!(" Linux ".parse::<Platform>().unwrap(), Platform::Linux);
    }

    #[test]
    fn unknown_platform_is_invalid_argument() {
        let err = "freebsd".parse::<Platform>().unwrap_err();
        assert!(matches!(err, SdklicError::InvalidArgument(_)));
        assert!(err.to_string().contains("freebsd"));
    }

    #[test]
    fn every_platform_round_trips_through_its_identifier() {
        for p in Platform::all() {
            assert_eq!(p.as_str().parse::<Platform>().unwrap(), *p);
        }
    }

    #[test]
    fn arch_selects_bin_dir() {
        assert_eq!("x86".parse::<Arch>().unwrap().bin_dir(), "Bin32");
        assert_eq!("x86_64".parse::<Arch>().unwrap().bin_dir(), "Bin");
        assert!("arm64".parse::<Arch>().is_err());
    }
}
