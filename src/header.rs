//! Header row detection
//!
//! Spreadsheets exported by other tools often carry a title line or a few
//! blank rows before the real column names. The detector scans the top of
//! the occupied range and takes the first row holding any value.

use crate::types::{HeaderRow, Worksheet};
use tracing::debug;

/// Number of rows examined when looking for a header
pub const DEFAULT_SCAN_ROWS: u32 = 5;

/// Placeholder name for an unnamed column (1-based, absolute column)
pub fn placeholder_name(col: u32) -> String {
    format!("Column{}", col + 1)
}

/// Detect the header row within the first [`DEFAULT_SCAN_ROWS`] rows
pub fn detect_header(sheet: &Worksheet) -> HeaderRow {
    detect_header_with(sheet, DEFAULT_SCAN_ROWS)
}

/// Detect the header row within the first `scan_rows` rows.
///
/// The first row with at least one non-blank cell wins. If none of the
/// scanned rows qualifies, every column gets a placeholder name and the
/// header is anchored at the first row of the range.
pub fn detect_header_with(sheet: &Worksheet, scan_rows: u32) -> HeaderRow {
    let range = sheet.range();
    let last_scanned = range
        .first_row
        .saturating_add(scan_rows.max(1) - 1)
        .min(range.last_row);

    for row in range.first_row..=last_scanned {
        let mut names = Vec::with_capacity(range.column_count());
        let mut non_empty = 0usize;

        for col in range.first_col..=range.last_col {
            let text = sheet.cell_text(row, col);
            let value = text.trim();
            if value.is_empty() {
                names.push(placeholder_name(col));
            } else {
                non_empty += 1;
                names.push(value.to_string());
            }
        }

        if non_empty > 0 {
            debug!(row, columns = names.len(), "header row detected");
            return HeaderRow {
                names,
                row,
                first_col: range.first_col,
            };
        }
    }

    debug!(
        row = range.first_row,
        "no header in scanned rows, using placeholder names"
    );
    HeaderRow {
        names: (range.first_col..=range.last_col)
            .map(placeholder_name)
            .collect(),
        row: range.first_row,
        first_col: range.first_col,
    }
}
