//! permsheet - Salesforce permission metadata to an Excel report
//!
//! Reads PermissionSet or Profile source files, merges object and field
//! grants per object, and writes one worksheet per file. The row model lives
//! in `permsheet-core`; this crate adds configuration, file discovery, label
//! collection and the workbook writer.

pub mod config;
pub mod discovery;
pub mod error;
pub mod labels;
pub mod pipeline;
pub mod workbook;

pub use config::{EffectiveConfig, EntityType, ReportConfig};
pub use error::ReportError;
pub use pipeline::{process_file, run, FileOutcome, RunSummary, SkipReason};
pub use workbook::{write_workbook, SheetReport};
