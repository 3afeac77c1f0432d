//! Run-level errors
//!
//! Anything here ends the run. Problems with a single permission file or
//! label definition are logged and skipped instead.

use std::path::PathBuf;

use crate::config::ConfigError;
use crate::discovery::DiscoveryError;
use crate::workbook::WorkbookError;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("No {entity} found matching the pattern: {pattern}")]
    NoFilesFound { entity: String, pattern: String },

    #[error("None of the {files} {entity} contained permissions")]
    NoPermissions { entity: String, files: usize },

    #[error("Workbook error writing {}: {source}", .path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: WorkbookError,
    },
}
