//! # Generate: Write Policy and Batch Runner
//!
//! For each requested file key, decide whether its combined license
//! document must be (re)generated and, if so, generate and write it.
//!
//! ## Write Policy
//!
//! - `<dest>/LICENSE_<KEY>.txt` exists and regeneration is not forced: skip.
//!   Nothing beyond the existence check happens; no registry calls.
//! - Otherwise: locate the binary, look up its summary, assemble, and write
//!   via a temporary file in the destination directory that is renamed into
//!   place. A failure at any step leaves no new file and any existing file
//!   untouched.
//!
//! ## Failure Scope
//!
//! The overview and catalog are shared by every file, so failing to fetch
//! either aborts the run. Everything else fails only the file it concerns,
//! is logged with the file key and stage, and the batch continues.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use sdklic_core::{license_file_name, CorrectionTable, SdklicError};
use sdklic_registry::{RegistryClient, RegistryConfig};

use crate::assemble::DocumentAssembler;
use crate::params::RunParams;
use crate::sdk::SdkLayout;
use crate::session::RegistrySession;

/// Pipeline step a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LocateBinary,
    FetchOverview,
    LookupOverview,
    FetchCatalog,
    Assemble,
    Write,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::LocateBinary => "locate binary",
            Self::FetchOverview => "fetch overview",
            Self::LookupOverview => "look up overview",
            Self::FetchCatalog => "fetch catalog",
            Self::Assemble => "assemble document",
            Self::Write => "write document",
        };
        f.write_str(s)
    }
}

/// Failure generating a license document.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Shared registry data is unavailable; no file can be generated.
    #[error("run aborted at {stage} (while generating '{file_key}'): {source}")]
    Run {
        file_key: String,
        stage: Stage,
        source: SdklicError,
    },
    /// Only this file failed.
    #[error("{stage} failed for '{file_key}': {source}")]
    File {
        file_key: String,
        stage: Stage,
        source: SdklicError,
    },
}

impl GenerateError {
    pub fn file_key(&self) -> &str {
        match self {
            Self::Run { file_key, .. } | Self::File { file_key, .. } => file_key,
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            Self::Run { stage, .. } | Self::File { stage, .. } => *stage,
        }
    }

    pub fn source_error(&self) -> &SdklicError {
        match self {
            Self::Run { source, .. } | Self::File { source, .. } => source,
        }
    }

    pub fn aborts_run(&self) -> bool {
        matches!(self, Self::Run { .. })
    }
}

/// What the write policy did for one file key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The document already existed and regeneration was not forced.
    Skipped(PathBuf),
    Written(PathBuf),
}

/// Per-file results of a batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<GenerateError>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// 0 when every file was written or skipped, 1 when any file failed.
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

/// Generates combined license documents for one run.
#[derive(Debug)]
pub struct Generator {
    session: RegistrySession,
    assembler: DocumentAssembler,
    sdk: SdkLayout,
}

impl Generator {
    pub fn new(session: RegistrySession, assembler: DocumentAssembler, sdk: SdkLayout) -> Self {
        Self {
            session,
            assembler,
            sdk,
        }
    }

    /// Apply the write policy to one file key.
    pub async fn write_if_needed(
        &mut self,
        destination_dir: &Path,
        file_key: &str,
        force: bool,
    ) -> Result<WriteOutcome, GenerateError> {
        let dest_path = destination_dir.join(license_file_name(file_key));
        if !force && dest_path.exists() {
            tracing::info!("Skipping license for {file_key}: license file is already present.");
            return Ok(WriteOutcome::Skipped(dest_path));
        }

        tracing::info!("Generating license file for {file_key}...");

        let file_error = |stage: Stage| {
            move |source: SdklicError| GenerateError::File {
                file_key: file_key.to_string(),
                stage,
                source,
            }
        };
        let run_error = |stage: Stage| {
            move |source: SdklicError| GenerateError::Run {
                file_key: file_key.to_string(),
                stage,
                source,
            }
        };

        let shipped = self
            .sdk
            .shipped_file_name(file_key)
            .map_err(file_error(Stage::LocateBinary))?;

        let summary = self
            .session
            .overview()
            .await
            .map_err(run_error(Stage::FetchOverview))?
            .get(&shipped)
            .cloned()
            .ok_or_else(|| {
                file_error(Stage::LookupOverview)(SdklicError::UnknownShippedFile {
                    file_key: shipped.clone(),
                })
            })?;

        self.session
            .catalog()
            .await
            .map_err(run_error(Stage::FetchCatalog))?;

        let version = self.session.version().to_string();
        let document = self
            .assembler
            .assemble(&mut self.session, summary, &version)
            .await
            .map_err(file_error(Stage::Assemble))?;

        write_atomically(&dest_path, document.as_str()).map_err(file_error(Stage::Write))?;
        tracing::debug!(path = %dest_path.display(), "wrote combined license document");
        Ok(WriteOutcome::Written(dest_path))
    }

    /// Apply the write policy to every key in order. Per-file failures are
    /// logged and collected; a run-level failure stops the batch.
    pub async fn run_batch(
        &mut self,
        destination_dir: &Path,
        file_keys: &[String],
        force: bool,
    ) -> Result<BatchReport, GenerateError> {
        let mut report = BatchReport::default();
        for file_key in file_keys {
            match self.write_if_needed(destination_dir, file_key, force).await {
                Ok(WriteOutcome::Written(path)) => report.written.push(path),
                Ok(WriteOutcome::Skipped(path)) => report.skipped.push(path),
                Err(e) if e.aborts_run() => return Err(e),
                Err(e) => {
                    tracing::error!(
                        file = %e.file_key(),
                        stage = %e.stage(),
                        kind = e.source_error().kind(),
                        "{e}"
                    );
                    report.failed.push(e);
                }
            }
        }
        Ok(report)
    }
}

/// Write `contents` to `path` through a temporary sibling file, so `path`
/// is either fully written or untouched.
pub fn write_atomically(path: &Path, contents: &str) -> Result<(), SdklicError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Execute a full run from validated parameters.
///
/// Returns exit code: 0 when every file was written or skipped, 1 when any
/// file failed. Run-level failures are returned as errors.
pub async fn run_generate(params: &RunParams) -> Result<u8> {
    let corrections = match &params.corrections {
        Some(path) => CorrectionTable::builtin_with_file(path)
            .with_context(|| format!("failed to load corrections from {}", path.display()))?,
        None => CorrectionTable::builtin(),
    };

    let config = RegistryConfig::from_lookup(params.registry_url.as_deref(), |var| {
        std::env::var(var).ok()
    })
    .context("invalid registry configuration")?;
    let client = RegistryClient::new(config).context("failed to build registry client")?;

    tracing::debug!(
        platform = %params.platform,
        arch = %params.arch,
        version = %params.sdk_version,
        sdk = %params.sdk_root.display(),
        files = params.files.len(),
        "starting license generation"
    );

    let session = RegistrySession::new(client, params.platform, params.sdk_version.clone());
    let sdk = SdkLayout::new(&params.sdk_root, params.arch);
    let mut generator = Generator::new(session, DocumentAssembler::today(corrections), sdk);

    let report = generator
        .run_batch(&params.dest, &params.files, params.regenerate_all)
        .await?;

    tracing::info!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        "license generation finished"
    );
    Ok(report.exit_code())
}
