//! # sdklic-core -- Domain Types for SDK License Aggregation
//!
//! Everything in this crate is pure: no network, no async, and file-system
//! access only for loading an operator's corrections file. The registry
//! client (`sdklic-registry`) produces these types; the CLI
//! (`sdklic-cli`) composes them into combined license documents.
//!
//! ## Pipeline Pieces
//!
//! - [`Platform`] / [`Arch`]: validated run parameters.
//! - [`LicenseSummary`], [`LicenseCatalog`], [`LicenseText`]: the joined
//!   registry datasets.
//! - [`CorrectionTable`]: known registry identifier defects, applied to a
//!   summary before any catalog lookup.
//! - [`CombinedLicenseDocument`]: preamble plus per-license sections with
//!   copyright and year placeholders filled in.
//! - [`SdklicError`]: the error taxonomy shared by every crate.

pub mod corrections;
pub mod document;
pub mod error;
pub mod license;
pub mod placeholder;
pub mod platform;

pub use corrections::CorrectionTable;
pub use document::{license_file_name, CombinedLicenseDocument};
pub use error::SdklicError;
pub use license::{
    LicenseCatalog, LicenseCatalogEntry, LicenseOverview, LicenseSummary, LicenseText,
};
pub use placeholder::substitute_placeholders;
pub use platform::{Arch, Platform};
