//! Collection report output.
//!
//! [`ReportBuilder::generate`] writes the records of a run as one JSON
//! document, moving any previous output aside first, and validates the file
//! it wrote. [`summarize`] reads a written report back into aggregate
//! statistics.

mod backup;
mod document;
mod error;
mod statistics;
mod validate;

pub use backup::{backup_existing, backup_path};
pub use document::{CollectionReport, ReportMetadata, GITHUB_API_VERSION};
pub use error::{ReportError, ValidationError};
pub use statistics::{
    ReportSummary, StarredRepository, StatusBreakdown, TOP_LANGUAGES, TOP_STARRED, UNLICENSED,
};
pub use validate::validate_document;

use crate::record::RepositoryRecord;
use crate::reporter::SharedReporter;
use chrono::Utc;
use statistics::SummaryView;
use std::fs::Permissions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Component name used in reported events.
const COMPONENT: &str = "report";

/// Mode of a newly created report file.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Writes collection reports.
pub struct ReportBuilder {
    tool_version: String,
    reporter: SharedReporter,
}

impl ReportBuilder {
    /// Creates a builder stamping reports with this crate's version.
    pub fn new(reporter: SharedReporter) -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            reporter,
        }
    }

    /// Overrides the tool version written into report metadata.
    #[must_use]
    pub fn with_tool_version(mut self, tool_version: impl Into<String>) -> Self {
        self.tool_version = tool_version.into();
        self
    }

    /// Builds the in-memory document for `records`.
    pub fn build(&self, org: &str, records: Vec<RepositoryRecord>) -> CollectionReport {
        CollectionReport::new(org, &self.tool_version, Utc::now(), records)
    }

    /// Writes the report for `records` to `path` and validates it.
    ///
    /// With `backup` set, an existing file at `path` is first renamed to a
    /// timestamped sibling; a failed backup is reported and the write goes
    /// ahead. The document reaches `path` in a single rename, so readers
    /// never observe a partial file.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if serialization, writing, re-reading or
    /// validation fails.
    pub fn generate(
        &self,
        org: &str,
        records: Vec<RepositoryRecord>,
        path: &Path,
        backup: bool,
    ) -> Result<CollectionReport, ReportError> {
        let report = self.build(org, records);
        let mut bytes = serde_json::to_vec_pretty(&report).map_err(ReportError::Serialize)?;
        bytes.push(b'\n');
        let permissions = target_permissions(path);

        if backup {
            match backup_existing(path) {
                Ok(Some(target)) => self.reporter.info(
                    COMPONENT,
                    None,
                    &format!("Previous file backed up to: {}", target.display()),
                ),
                Ok(None) => {}
                Err(e) => self.reporter.warn(
                    COMPONENT,
                    None,
                    &format!("Could not backup previous file: {e}"),
                ),
            }
        }

        if let Err(e) = write_atomically(path, &bytes, permissions) {
            self.reporter
                .error(COMPONENT, None, &format!("Failed to write output file: {e}"));
            return Err(e);
        }

        self.reporter.info(
            COMPONENT,
            None,
            &format!("Output written to: {}", path.display()),
        );
        self.reporter.info(
            COMPONENT,
            None,
            &format!("File size: {:.2} KB", bytes.len() as f64 / 1024.0),
        );

        match validate_output(path) {
            Ok(()) => {
                self.reporter.info(COMPONENT, None, "JSON validation passed");
                Ok(report)
            }
            Err(e) => {
                self.reporter
                    .error(COMPONENT, None, &format!("JSON validation failed: {e}"));
                Err(e)
            }
        }
    }
}

/// Re-reads the file at `path` and checks its structure.
///
/// # Errors
///
/// Returns [`ReportError::Io`] or [`ReportError::Parse`] if the file cannot
/// be read, or [`ReportError::Validation`] if its shape is wrong.
pub fn validate_output(path: &Path) -> Result<(), ReportError> {
    let document: serde_json::Value = read_json(path)?;
    validate_document(&document)?;
    Ok(())
}

/// Computes summary statistics for the report at `path`.
///
/// # Errors
///
/// Returns [`ReportError::Io`] or [`ReportError::Parse`] if the file cannot
/// be read or lacks the fields the summary needs.
pub fn summarize(path: &Path) -> Result<ReportSummary, ReportError> {
    let view: SummaryView = read_json(path)?;
    Ok(view.summarize())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ReportError> {
    let content = std::fs::read(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&content).map_err(|source| ReportError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Permissions the written report should carry: those of the file being
/// replaced, or the usual mode for a new file.
fn target_permissions(path: &Path) -> Option<Permissions> {
    match std::fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => new_file_permissions(),
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(NEW_FILE_MODE))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

/// Writes `bytes` to a temporary file beside `path`, then renames it over
/// `path`. Temporary files are created owner-only, so `permissions` are
/// applied before the rename.
fn write_atomically(
    path: &Path,
    bytes: &[u8],
    permissions: Option<Permissions>,
) -> Result<(), ReportError> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let io_error = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = NamedTempFile::new_in(&directory).map_err(io_error)?;
    file.write_all(bytes).map_err(io_error)?;
    if let Some(permissions) = permissions {
        file.as_file()
            .set_permissions(permissions)
            .map_err(io_error)?;
    }
    file.as_file().sync_all().map_err(io_error)?;
    file.persist(path).map_err(|e| io_error(e.error))?;
    Ok(())
}
