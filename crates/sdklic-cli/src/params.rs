//! # Run Parameters
//!
//! The tool is driven by `KEY=VALUE` parameters, the way the SDK packaging
//! scripts invoke it:
//!
//! ```bash
//! sdklic os=windows "files=glslangValidator;spirv-opt" arch=x86_64 dest=out/licenses
//! sdklic os=darwin files=vulkaninfo arch=x86_64 dest=out regenerate_all
//! ```
//!
//! Required: `os`, `files`, `arch`, `dest`. Optional: `regenerate_all`,
//! `sdk`, `version`, `registry`, `corrections`. Everything is validated here,
//! before any file-system or network access.

use std::collections::BTreeMap;
use std::path::PathBuf;

use sdklic_core::{Arch, Platform, SdklicError};

const REQUIRED_KEYS: &[&str] = &["os", "files", "arch", "dest"];
const OPTIONAL_KEYS: &[&str] = &["regenerate_all", "sdk", "version", "registry", "corrections"];

/// Split one command-line token into a key and value. A bare `KEY` is a
/// flag with an empty value.
pub fn parse_param(token: &str) -> Result<(String, String), String> {
    let (key, value) = token.split_once('=').unwrap_or((token, ""));
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("parameter '{token}' has an empty key"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Validated parameters for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParams {
    pub platform: Platform,
    /// Logical file keys, in request order.
    pub files: Vec<String>,
    pub arch: Arch,
    /// Directory the combined license documents are written to.
    pub dest: PathBuf,
    /// Rewrite documents that already exist.
    pub regenerate_all: bool,
    pub sdk_root: PathBuf,
    pub sdk_version: String,
    /// Registry base URL override.
    pub registry_url: Option<String>,
    /// Extra defect corrections (YAML mapping).
    pub corrections: Option<PathBuf>,
}

impl RunParams {
    /// Validate parameters, falling back to `VULKAN_SDK` and `SDK_VERSION`
    /// from the process environment.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, SdklicError> {
        Self::from_pairs_with_env(pairs, |var| std::env::var(var).ok())
    }

    /// Validate parameters with an explicit environment lookup.
    pub fn from_pairs_with_env(
        pairs: &[(String, String)],
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SdklicError> {
        let mut map = BTreeMap::new();
        for (key, value) in pairs {
            if !REQUIRED_KEYS.contains(&key.as_str()) && !OPTIONAL_KEYS.contains(&key.as_str()) {
                return Err(SdklicError::InvalidArgument(format!(
                    "unknown parameter '{key}'"
                )));
            }
            if map.insert(key.as_str(), value.as_str()).is_some() {
                return Err(SdklicError::InvalidArgument(format!(
                    "parameter '{key}' given more than once"
                )));
            }
        }

        let required = |key: &str| -> Result<&str, SdklicError> {
            map.get(key)
                .copied()
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    SdklicError::InvalidArgument(format!("missing required parameter '{key}'"))
                })
        };

        let platform: Platform = required("os")?.parse()?;
        let arch: Arch = required("arch")?.parse()?;
        let dest = PathBuf::from(required("dest")?);
        let files = split_files(required("files")?)?;

        let regenerate_all = match map.get("regenerate_all") {
            None => false,
            Some(v) => !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "no"),
        };

        let sdk_root = map
            .get("sdk")
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
            .or_else(|| env("VULKAN_SDK"))
            .map(PathBuf::from)
            .ok_or_else(|| {
                SdklicError::InvalidArgument(
                    "SDK root not given: pass sdk=<path> or set VULKAN_SDK".into(),
                )
            })?;

        let sdk_version = map
            .get("version")
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
            .or_else(|| env("SDK_VERSION"))
            .or_else(|| version_from_root(&sdk_root))
            .ok_or_else(|| {
                SdklicError::InvalidArgument(format!(
                    "SDK version not given and not derivable from {}: pass version=<x.y.z>",
                    sdk_root.display()
                ))
            })?;
        if !is_dotted_version(&sdk_version) {
            return Err(SdklicError::InvalidArgument(format!(
                "SDK version '{sdk_version}' is not a dotted numeric version"
            )));
        }

        Ok(Self {
            platform,
            files,
            arch,
            dest,
            regenerate_all,
            sdk_root,
            sdk_version,
            registry_url: map
                .get("registry")
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string()),
            corrections: map
                .get("corrections")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        })
    }
}

fn split_files(raw: &str) -> Result<Vec<String>, SdklicError> {
    let files: Vec<String> = raw
        .split(';')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect();
    if files.is_empty() {
        return Err(SdklicError::InvalidArgument(
            "parameter 'files' names no files".into(),
        ));
    }
    Ok(files)
}

/// SDK installs are rooted at a directory named after their version,
/// e.g. `/opt/VulkanSDK/1.3.250.1`.
fn version_from_root(root: &std::path::Path) -> Option<String> {
    let name = root.file_name()?.to_str()?;
    is_dotted_version(name).then(|| name.to_string())
}

fn is_dotted_version(s: &str) -> bool {
    let parts: Vec<&str> = s.split('.').collect();
    parts.len() >= 2
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(tokens: &[&str]) -> Vec<(String, String)> {
        tokens.iter().map(|t| parse_param(t).unwrap()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    const BASE: &[&str] = &[
        "os=windows",
        "files=glslangValidator;spirv-opt",
        "arch=x86_64",
        "dest=out",
        "sdk=/opt/VulkanSDK/1.3.250.1",
    ];

    #[test]
    fn parses_required_parameters() {
        let params = RunParams::from_pairs_with_env(&pairs(BASE), no_env).unwrap();
        assert_eq!(params.platform, Platform::Windows);
        assert_eq!(params.files, vec!["glslangValidator", "spirv-opt"]);
        assert_eq!(params.arch, Arch::X86_64);
        assert_eq!(params.dest, PathBuf::from("out"));
        assert!(!params.regenerate_all);
        assert_eq!(params.sdk_version, "1.3.250.1");
    }

    #[test]
    fn darwin_is_normalized_to_macos() {
        let mut tokens = BASE.to_vec();
        tokens[0] = "os=Darwin";
        let params = RunParams::from_pairs_with_env(&pairs(&tokens), no_env).unwrap();
        assert_eq!(params.platform, Platform::MacOs);
    }

    #[test]
    fn bare_regenerate_all_is_a_flag() {
        let mut tokens = BASE.to_vec();
        tokens.push("regenerate_all");
        let params = RunParams::from_pairs_with_env(&pairs(&tokens), no_env).unwrap();
        assert!(params.regenerate_all);

        let mut tokens = BASE.to_vec();
        tokens.push("regenerate_all=false");
        let params = RunParams::from_pairs_with_env(&pairs(&tokens), no_env).unwrap();
        assert!(!params.regenerate_all);
    }

    #[test]
    fn unknown_os_is_invalid_argument() {
        let mut tokens = BASE.to_vec();
        tokens[0] = "os=haiku";
        let err = RunParams::from_pairs_with_env(&pairs(&tokens), no_env).unwrap_err();
        assert!(matches!(err, SdklicError::InvalidArgument(_)));
    }

    #[test]
    fn missing_required_parameter_is_reported_by_name() {
        let err = RunParams::from_pairs_with_env(&pairs(&BASE[1..]), no_env).unwrap_err();
        assert!(err.to_string().contains("'os'"));
    }

    #[test]
    fn unknown_and_duplicate_keys_are_rejected() {
        let mut tokens = BASE.to_vec();
        tokens.push("colour=blue");
        assert!(RunParams::from_pairs_with_env(&pairs(&tokens), no_env).is_err());

        let mut tokens = BASE.to_vec();
        tokens.push("arch=x86");
        let err = RunParams::from_pairs_with_env(&pairs(&tokens), no_env).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn sdk_and_version_fall_back_to_environment() {
        let tokens = &BASE[..4];
        let env = |var: &str| match var {
            "VULKAN_SDK" => Some("/sdk".to_string()),
            "SDK_VERSION" => Some("1.4.304.0".to_string()),
            _ => None,
        };
        let params = RunParams::from_pairs_with_env(&pairs(tokens), env).unwrap();
        assert_eq!(params.sdk_root, PathBuf::from("/sdk"));
        assert_eq!(params.sdk_version, "1.4.304.0");
    }

    #[test]
    fn undeterminable_version_is_invalid_argument() {
        let mut tokens = BASE[..4].to_vec();
        tokens.push("sdk=/opt/sdk/current");
        let err = RunParams::from_pairs_with_env(&pairs(&tokens), no_env).unwrap_err();
        assert!(err.to_string().contains("version"));

        let mut tokens = BASE.to_vec();
        tokens.push("version=latest");
        assert!(RunParams::from_pairs_with_env(&pairs(&tokens), no_env).is_err());
    }

    #[test]
    fn empty_file_list_is_rejected() {
        let mut tokens = BASE.to_vec();
        tokens[1] = "files=;;";
        assert!(RunParams::from_pairs_with_env(&pairs(&tokens), no_env).is_err());
    }

    #[test]
    fn parse_param_rejects_empty_key() {
        assert!(parse_param("=value").is_err());
        assert_eq!(
            parse_param("dest=C:/out=dir").unwrap(),
            ("dest".to_string(), "C:/out=dir".to_string())
        );
    }
}
