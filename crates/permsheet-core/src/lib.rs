//! Permission metadata to report rows.
//!
//! Turns one PermissionSet or Profile document into an ordered sequence of
//! report rows: parse the field and object grants, merge them into one record
//! per object, optionally swap API names for labels, then flatten.
//!
//! Nothing in this crate touches the file system.

mod document;
mod flatten;
mod labels;
mod merge;
mod ordered;
mod parser;
mod permission;
mod sheet;

pub use document::{DocumentError, Element};
pub use flatten::{flatten, FlatRow, FlattenOptions, IconSet, REPORT_COLUMNS};
pub use labels::{field_label, object_label, LabelError, LabelIndex, LabelIndexBuilder};
pub use merge::{merge, MergedPermissionRecord};
pub use ordered::OrderedIndex;
pub use parser::{parse_permissions, CarrierKind, PermissionIndex};
pub use permission::{FieldPermission, ObjectAccess, ObjectPermission};
pub use sheet::{sanitize_sheet_name, MAX_SHEET_NAME_LEN};

/// Parse, merge and flatten one permission document.
///
/// Returns the carrier kind (`None` when the root element is neither a
/// PermissionSet nor a Profile) together with the flattened rows.
pub fn document_rows(
    xml: &str,
    options: &FlattenOptions<'_>,
) -> Result<(Option<CarrierKind>, Vec<FlatRow>), DocumentError> {
    let doc = Element::parse(xml)?;
    let index = parse_permissions(&doc);
    let records = merge(&index);
    Ok((index.carrier, flatten(&records, options)))
}
