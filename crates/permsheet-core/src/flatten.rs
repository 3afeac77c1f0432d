//! Report rows from merged records.

use crate::labels::LabelIndex;
use crate::merge::MergedPermissionRecord;

/// Report header, one entry per column.
pub const REPORT_COLUMNS: [&str; 8] = [
    "Object",
    "Field",
    "Edit",
    "Read",
    "Create",
    "Delete",
    "Modify All",
    "View All",
];

/// Cell text for granted and denied permissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSet {
    pub true_icon: String,
    pub false_icon: String,
}

impl IconSet {
    pub fn new(true_icon: impl Into<String>, false_icon: impl Into<String>) -> Self {
        Self {
            true_icon: true_icon.into(),
            false_icon: false_icon.into(),
        }
    }

    pub fn render(&self, granted: bool) -> &str {
        if granted {
            &self.true_icon
        } else {
            &self.false_icon
        }
    }
}

impl Default for IconSet {
    fn default() -> Self {
        Self::new("✔", "✖")
    }
}

/// How records are rendered into rows.
#[derive(Debug, Clone, Copy)]
pub struct FlattenOptions<'a> {
    pub icons: &'a IconSet,
    /// Substitute labels for API names when set.
    pub labels: Option<&'a LabelIndex>,
}

impl<'a> FlattenOptions<'a> {
    pub fn new(icons: &'a IconSet) -> Self {
        Self {
            icons,
            labels: None,
        }
    }

    pub fn with_labels(mut self, labels: &'a LabelIndex) -> Self {
        self.labels = Some(labels);
        self
    }
}

/// One report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlatRow {
    /// Object header: Edit, Read, Create, Delete, Modify All, View All.
    Object { object: String, cells: [String; 6] },
    /// Field detail: Edit, Read.
    Field { field: String, cells: [String; 2] },
    /// Blank row closing an object's block.
    Separator,
}

impl FlatRow {
    /// Positional cell values starting at the Object column.
    ///
    /// Object rows fill all eight columns, field rows the first four, and
    /// separators none.
    pub fn cells(&self) -> Vec<&str> {
        match self {
            FlatRow::Object { object, cells } => {
                let mut out = Vec::with_capacity(REPORT_COLUMNS.len());
                out.push(object.as_str());
                out.push("");
                out.extend(cells.iter().map(String::as_str));
                out
            }
            FlatRow::Field { field, cells } => {
                let mut out = Vec::with_capacity(4);
                out.push("");
                out.push(field.as_str());
                out.extend(cells.iter().map(String::as_str));
                out
            }
            FlatRow::Separator => Vec::new(),
        }
    }
}

/// Flatten records into rows: per record one object row, its field rows in
/// order, and a separator. A record with N fields yields N + 2 rows.
pub fn flatten(records: &[MergedPermissionRecord], options: &FlattenOptions<'_>) -> Vec<FlatRow> {
    let icons = options.icons;
    let rows_needed = records
        .iter()
        .map(|r| r.field_permissions().len() + 2)
        .sum::<usize>();
    let mut rows = Vec::with_capacity(rows_needed);

    for record in records {
        let object = match options.labels {
            Some(labels) => labels.resolve_object(record.name()),
            None => record.name(),
        };
        rows.push(FlatRow::Object {
            object: object.to_string(),
            cells: record
                .access()
                .report_order()
                .map(|granted| icons.render(granted).to_string()),
        });

        for permission in record.field_permissions() {
            let field = match options.labels {
                Some(labels) => labels.resolve_field(record.name(), &permission.field),
                None => permission.field.as_str(),
            };
            rows.push(FlatRow::Field {
                field: field.to_string(),
                cells: [
                    icons.render(permission.editable).to_string(),
                    icons.render(permission.readable).to_string(),
                ],
            });
        }

        rows.push(FlatRow::Separator);
    }

    rows
}
