//! Excel workbook output
//!
//! One worksheet per report, each holding a single table with the report
//! columns and a header row.

use permsheet_core::{FlatRow, MAX_SHEET_NAME_LEN, REPORT_COLUMNS};
use rust_xlsxwriter::{ColNum, RowNum, Table, TableColumn, TableStyle, Workbook, XlsxError};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

const TABLE_NAME: &str = "Permissions";
const COLUMN_WIDTH: f64 = 20.0;
const FALLBACK_SHEET_NAME: &str = "Sheet";
const RESERVED_SHEET_NAME: &str = "History";

/// Errors while writing the workbook
#[derive(Debug, thiserror::Error)]
pub enum WorkbookError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("XLSX error: {0}")]
    XlsxError(#[from] XlsxError),
}

/// Rows for one worksheet
#[derive(Debug, Clone)]
pub struct SheetReport {
    /// Permission file the rows came from
    pub source: PathBuf,

    /// Sanitized sheet name; may still collide with another report's
    pub sheet_name: String,

    pub rows: Vec<FlatRow>,
}

/// Hands out unique worksheet names.
///
/// Excel compares sheet names case-insensitively. A taken name gets a `~N`
/// suffix, shortening the base so the result stays within the length limit.
/// Names may not start or end with `'`, and `History` is reserved.
#[derive(Debug, Default)]
pub struct SheetNames {
    taken: HashSet<String>,
}

impl SheetNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, wanted: &str) -> String {
        let trimmed = wanted.trim_matches('\'');
        let base = if trimmed.is_empty() { FALLBACK_SHEET_NAME } else { trimmed };
        if !base.eq_ignore_ascii_case(RESERVED_SHEET_NAME) && self.taken.insert(base.to_lowercase()) {
            return base.to_string();
        }

        let mut n = 2usize;
        loop {
            let suffix = format!("~{}", n);
            let keep = MAX_SHEET_NAME_LEN.saturating_sub(suffix.chars().count());
            let candidate: String = base.chars().take(keep).chain(suffix.chars()).collect();
            if self.taken.insert(candidate.to_lowercase()) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Write all reports to `output`, creating its directory if needed.
///
/// Returns the sheet names actually used, in report order.
pub fn write_workbook(reports: &[SheetReport], output: &Path) -> Result<Vec<String>, WorkbookError> {
    let mut workbook = Workbook::new();
    let mut names = SheetNames::new();
    let mut used = Vec::with_capacity(reports.len());

    for (i, report) in reports.iter().enumerate() {
        let sheet_name = names.claim(&report.sheet_name);
        debug!(source = %report.source.display(), sheet = %sheet_name, rows = report.rows.len(), "Writing worksheet");
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet_name)?;

        for (r, row) in report.rows.iter().enumerate() {
            let row_num = (r + 1) as RowNum;
            for (c, value) in row.cells().into_iter().enumerate() {
                if !value.is_empty() {
                    worksheet.write_string(row_num, c as ColNum, value)?;
                }
            }
        }

        let table = Table::new()
            .set_name(table_name(i))
            .set_style(TableStyle::Medium2)
            .set_columns(&table_columns());
        let last_col = (REPORT_COLUMNS.len() - 1) as ColNum;
        worksheet.add_table(0, 0, report.rows.len() as RowNum, last_col, &table)?;

        for col in 0..REPORT_COLUMNS.len() {
            worksheet.set_column_width(col as ColNum, COLUMN_WIDTH)?;
        }

        used.push(sheet_name);
    }

    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    workbook.save(output)?;
    Ok(used)
}

fn table_columns() -> Vec<TableColumn> {
    REPORT_COLUMNS
        .iter()
        .map(|header| TableColumn::new().set_header(*header))
        .collect()
}

/// Table names are workbook-wide, so only the first table gets the bare name.
fn table_name(index: usize) -> String {
    if index == 0 {
        TABLE_NAME.to_string()
    } else {
        format!("{}{}", TABLE_NAME, index + 1)
    }
}
