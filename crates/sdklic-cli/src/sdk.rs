//! # SDK Directory Scanner
//!
//! Packaging scripts name binaries by logical key (`glslangValidator`); the
//! registry overview is keyed by the shipped file name (`glslangValidator.exe`
//! on Windows, no extension elsewhere). The scanner bridges the two by
//! looking the key up in the SDK's binary directory.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use sdklic_core::{Arch, SdklicError};

/// Location of an installed SDK and the architecture being packaged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkLayout {
    root: PathBuf,
    arch: Arch,
}

impl SdkLayout {
    pub fn new(root: impl Into<PathBuf>, arch: Arch) -> Self {
        Self {
            root: root.into(),
            arch,
        }
    }

    /// `<root>/Bin`, or `<root>/Bin32` for 32-bit packaging.
    pub fn bin_dir(&self) -> PathBuf {
        self.root.join(self.arch.bin_dir())
    }

    /// On-disk file name of the binary with logical key `file_key`.
    pub fn shipped_file_name(&self, file_key: &str) -> Result<String, SdklicError> {
        find_file_without_extension(&self.bin_dir(), file_key)
    }
}

/// Find the file in `dir` whose name, ignoring its extension, is `key`.
///
/// Preference order: a file named exactly `key`, then a file whose stem is
/// exactly `key`, then a case-insensitive stem match. Ties within a tier go
/// to the lexicographically first name.
pub fn find_file_without_extension(dir: &Path, key: &str) -> Result<String, SdklicError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(key, dir = %dir.display(), "binary directory does not exist");
            return Err(SdklicError::UnknownShippedFile {
                file_key: key.to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let mut names = BTreeSet::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.insert(name.to_string());
        }
    }

    let stem = |name: &str| {
        Path::new(name)
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .unwrap_or_default()
    };

    let found = names
        .iter()
        .find(|name| name.as_str() == key)
        .or_else(|| names.iter().find(|name| stem(name) == key))
        .or_else(|| {
            names
                .iter()
                .find(|name| stem(name).eq_ignore_ascii_case(key))
        });

    match found {
        Some(name) => {
            tracing::debug!(key, file = %name, dir = %dir.display(), "resolved shipped file");
            Ok(name.clone())
        }
        None => Err(SdklicError::UnknownShippedFile {
            file_key: key.to_string(),
        }),
    }
}
