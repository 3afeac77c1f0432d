//! Label collection from object and field definitions
//!
//! Source layout:
//!
//! ```text
//! objects/Invoice__c/Invoice__c.object-meta.xml
//! objects/Invoice__c/fields/Amount__c.field-meta.xml
//! ```
//!
//! The object key is the definition's folder name; the field key is the
//! object folder plus the field file name.

use permsheet_core::{field_label, object_label, DocumentError, Element, LabelError, LabelIndex};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

use crate::discovery::{find_files, DiscoveryError};

const OBJECT_PATTERN: &str = "**/*.object-meta.xml";
const FIELD_PATTERN: &str = "**/fields/*.field-meta.xml";
const FIELD_SUFFIX: &str = ".field-meta.xml";

/// Why one label definition was skipped
#[derive(Debug, thiserror::Error)]
pub enum LabelSourceError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("{0}")]
    Document(#[from] DocumentError),

    #[error("{0}")]
    Label(#[from] LabelError),

    #[error("cannot derive an API name from the path")]
    UnkeyedPath,
}

/// Scan `root` for object and field definitions.
///
/// A definition that cannot be used is logged and skipped; only a failure to
/// walk the directory is an error.
pub fn collect_labels(root: &Path) -> Result<LabelIndex, DiscoveryError> {
    let mut builder = LabelIndex::builder();

    for path in find_files(root, OBJECT_PATTERN)? {
        match read_object_label(&path) {
            Ok((object, label)) => {
                builder.object(object, label);
            }
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to parse object metadata file"),
        }
    }

    for path in find_files(root, FIELD_PATTERN)? {
        match read_field_label(&path) {
            Ok((object, field, label)) => {
                builder.field(&object, &field, label);
            }
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to parse field metadata file"),
        }
    }

    let labels = builder.build();
    debug!(
        objects = labels.object_count(),
        fields = labels.field_count(),
        "Labels collected"
    );
    Ok(labels)
}

fn read_object_label(path: &Path) -> Result<(String, String), LabelSourceError> {
    let object = dir_name(path.parent()).ok_or(LabelSourceError::UnkeyedPath)?;
    let doc = Element::parse(&fs::read_to_string(path)?)?;
    Ok((object, object_label(&doc)?))
}

fn read_field_label(path: &Path) -> Result<(String, String, String), LabelSourceError> {
    let object = dir_name(path.parent().and_then(Path::parent)).ok_or(LabelSourceError::UnkeyedPath)?;
    let field = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_suffix(FIELD_SUFFIX))
        .ok_or(LabelSourceError::UnkeyedPath)?
        .to_string();
    let doc = Element::parse(&fs::read_to_string(path)?)?;
    Ok((object, field, field_label(&doc)?))
}

fn dir_name(dir: Option<&Path>) -> Option<String> {
    dir?.file_name().map(|n| n.to_string_lossy().into_owned())
}
