//! Duplicate-submission matching over values read back from the sheet.
//!
//! Pure logic only; reading the sheet is the store's job.

use crate::types::SessionId;

/// Default header of the identifier column for full-record scans.
pub const DEFAULT_IDENTIFIER_HEADER: &str = "user_id";

/// Whether `id` appears in a scanned identifier column.
///
/// The header cell, if any, is scanned like any other value; it cannot
/// collide with a generated UUID.
pub fn column_contains(values: &[String], id: &SessionId) -> bool {
    values.iter().any(|v| v.trim() == id.as_str())
}

/// Whether any record (rows after the header row) carries `id` under `header`.
///
/// An empty worksheet holds no records, so nothing matches. Returns `None`
/// when the first row has no such column.
pub fn records_contain(rows: &[Vec<String>], header: &str, id: &SessionId) -> Option<bool> {
    let Some((header_row, records)) = rows.split_first() else {
        return Some(false);
    };
    let column = header_row.iter().position(|h| h.trim() == header)?;

    Some(
        records
            .iter()
            .filter_map(|row| row.get(column))
            .any(|v| v.trim() == id.as_str()),
    )
}
