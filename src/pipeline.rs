//! Report run
//!
//! Discovers permission files, optionally collects labels, turns each file
//! into a sheet report and writes the workbook. A file that cannot be read or
//! parsed is skipped; it never stops the other files.

use permsheet_core::{document_rows, sanitize_sheet_name, DocumentError, FlattenOptions, LabelIndex};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use crate::config::{EntityType, ReportConfig};
use crate::discovery::discover_permission_files;
use crate::error::ReportError;
use crate::labels::collect_labels;
use crate::workbook::{write_workbook, SheetReport};

/// Why a permission file produced no sheet
#[derive(Debug, thiserror::Error)]
pub enum SkipReason {
    #[error("cannot read file: {0}")]
    Unreadable(#[from] std::io::Error),

    #[error("malformed document: {0}")]
    Malformed(#[from] DocumentError),

    #[error("root element is neither PermissionSet nor Profile")]
    UnrecognizedRoot,

    #[error("no permissions found")]
    NoPermissions,
}

/// Result of processing one permission file
#[derive(Debug)]
pub enum FileOutcome {
    Report(SheetReport),
    Skipped(SkipReason),
}

/// What a completed run did
#[derive(Debug)]
pub struct RunSummary {
    /// Permission files matched by discovery
    pub files_found: usize,

    /// Worksheet names written, in file order
    pub sheets: Vec<String>,

    /// Files that produced no sheet
    pub skipped: Vec<(PathBuf, SkipReason)>,

    /// Workbook written
    pub output: PathBuf,

    /// Wall time of the whole run
    pub duration: Duration,
}

/// Parse, merge and flatten one permission file.
pub fn process_file(path: &Path, entity: EntityType, options: &FlattenOptions<'_>) -> FileOutcome {
    match build_report(path, entity, options) {
        Ok(report) => FileOutcome::Report(report),
        Err(reason) => FileOutcome::Skipped(reason),
    }
}

fn build_report(
    path: &Path,
    entity: EntityType,
    options: &FlattenOptions<'_>,
) -> Result<SheetReport, SkipReason> {
    let xml = fs::read_to_string(path)?;
    let (carrier, rows) = document_rows(&xml, options)?;
    if carrier.is_none() {
        return Err(SkipReason::UnrecognizedRoot);
    }
    if rows.is_empty() {
        return Err(SkipReason::NoPermissions);
    }
    Ok(SheetReport {
        source: path.to_path_buf(),
        sheet_name: sanitize_sheet_name(&entity.base_name(path)),
        rows,
    })
}

/// Run a full report described by `config`.
pub fn run(config: &ReportConfig) -> Result<RunSummary, ReportError> {
    let started = Instant::now();
    let entity = config.entity_type;
    let pattern = format!("{}/{}", config.path.display(), config.glob);

    info!("Searching for permission files with pattern: {}", pattern);
    let files = discover_permission_files(&config.path, &config.glob, entity)?;
    if files.is_empty() {
        return Err(ReportError::NoFilesFound {
            entity: entity.to_string(),
            pattern,
        });
    }
    info!("Found {} {}.", files.len(), entity);

    let labels = match &config.label_source {
        Some(source) => {
            info!("Collecting object and field labels...");
            let labels = collect_labels(source)?;
            info!("Labels collected successfully.");
            Some(labels)
        }
        None => None,
    };

    let (reports, skipped) = process_all(&files, config, labels.as_ref());

    if reports.is_empty() {
        return Err(ReportError::NoPermissions {
            entity: entity.to_string(),
            files: files.len(),
        });
    }

    let sheets = write_workbook(&reports, &config.output).map_err(|source| ReportError::Workbook {
        path: config.output.clone(),
        source,
    })?;
    info!("Excel file generated successfully: {}", config.output.display());

    let duration = started.elapsed();

    Ok(RunSummary {
        files_found: files.len(),
        sheets,
        skipped,
        output: config.output.clone(),
        duration,
    })
}

fn process_all(
    files: &[PathBuf],
    config: &ReportConfig,
    labels: Option<&LabelIndex>,
) -> (Vec<SheetReport>, Vec<(PathBuf, SkipReason)>) {
    let entity = config.entity_type;
    let mut options = FlattenOptions::new(&config.icons);
    if let Some(labels) = labels {
        options = options.with_labels(labels);
    }

    let mut reports = Vec::new();
    let mut skipped = Vec::new();

    for path in files {
        let name = sanitize_sheet_name(&entity.base_name(path));
        info!("Processing {}: {}", entity.singular(), name);

        match process_file(path, entity, &options) {
            FileOutcome::Report(report) => reports.push(report),
            FileOutcome::Skipped(reason) => {
                match &reason {
                    SkipReason::Unreadable(_) | SkipReason::Malformed(_) => {
                        error!(path = %path.display(), "Error processing file: {}", reason)
                    }
                    SkipReason::UnrecognizedRoot | SkipReason::NoPermissions => {
                        warn!("No permissions found in {}: {} ({})", entity.singular(), name, reason)
                    }
                }
                skipped.push((path.clone(), reason));
            }
        }
    }

    (reports, skipped)
}
