//! Worksheet name normalization.

/// Longest worksheet name Excel accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;

const FORBIDDEN: &[char] = &['\\', '/', '*', '?', ':', '[', ']'];

/// Drop characters Excel rejects in sheet names and cap the length at
/// [`MAX_SHEET_NAME_LEN`] characters.
///
/// The result may be empty and is not unique across files.
pub fn sanitize_sheet_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| !FORBIDDEN.contains(c))
        .take(MAX_SHEET_NAME_LEN)
        .collect()
}
