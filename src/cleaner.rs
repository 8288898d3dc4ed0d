//! Column extraction and character stripping

use crate::error::{ScrubError, ScrubResult};
use crate::header::{detect_header_with, DEFAULT_SCAN_ROWS};
use crate::types::{HeaderRow, Worksheet};
use tracing::debug;

/// Character removed from every value unless configured otherwise
pub const DEFAULT_STRIP_CHAR: char = '@';

/// Options shared by header detection and cleaning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanOptions {
    pub strip_char: char,
    pub header_scan_rows: u32,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            strip_char: DEFAULT_STRIP_CHAR,
            header_scan_rows: DEFAULT_SCAN_ROWS,
        }
    }
}

/// Remove every occurrence of `target` from `value`
pub fn strip_char(value: &str, target: char) -> String {
    value.chars().filter(|c| *c != target).collect()
}

/// Resolve a column name to its absolute worksheet column
pub fn resolve_column(header: &HeaderRow, column: &str) -> ScrubResult<u32> {
    header
        .column_index(column)
        .ok_or_else(|| ScrubError::ColumnNotFound {
            column: column.to_string(),
            available: header.names.clone(),
        })
}

/// Detect the header, then clean `column` for every data row below it
pub fn clean_column(
    sheet: &Worksheet,
    column: &str,
    options: &CleanOptions,
) -> ScrubResult<Vec<String>> {
    let header = detect_header_with(sheet, options.header_scan_rows);
    clean_column_with_header(sheet, &header, column, options.strip_char)
}

/// Clean `column` using an already detected header.
///
/// One value per present row strictly below the header row, in row order.
/// Rows missing the target cell contribute an empty string; rows absent
/// from the sheet contribute nothing.
pub fn clean_column_with_header(
    sheet: &Worksheet,
    header: &HeaderRow,
    column: &str,
    target: char,
) -> ScrubResult<Vec<String>> {
    let col = resolve_column(header, column)?;

    let values: Vec<String> = sheet
        .rows_below(header.row)
        .map(|row| strip_char(&sheet.cell_text(row, col), target))
        .collect();

    debug!(column, col, rows = values.len(), "column cleaned");
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::Data;
    use pretty_assertions::assert_eq;

    fn email_sheet() -> Worksheet {
        Worksheet::from_rows(
            "s",
            vec![
                vec!["Name", "Email"],
                vec!["A", "x@y.com"],
                vec!["B", "z@@w.com"],
            ],
        )
    }

    #[test]
    fn test_strip_char_removes_all_occurrences() {
        assert_eq!(strip_char("@a@b@@c@", '@'), "abc");
        assert_eq!(strip_char("no-target", '@'), "no-target");
        assert_eq!(strip_char("", '@'), "");
        assert_eq!(strip_char("ünï@cödé", '@'), "ünïcödé");
    }

    #[test]
    fn test_clean_email_column() {
        let values = clean_column(&email_sheet(), "Email", &CleanOptions::default()).unwrap();
        assert_eq!(values, vec!["xy.com", "zw.com"]);
    }

    #[test]
    fn test_column_not_found() {
        let result = clean_column(&email_sheet(), "email", &CleanOptions::default());
        match result {
            Err(ScrubError::ColumnNotFound { column, available }) => {
                assert_eq!(column, "email");
                assert_eq!(available, vec!["Name", "Email"]);
            }
            other => panic!("Expected ColumnNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_short_rows_yield_empty_strings() {
        let sheet = Worksheet::from_rows(
            "s",
            vec![
                vec!["Name", "Email"],
                vec!["A"],
                vec!["B", "b@c"],
            ],
        );
        let values = clean_column(&sheet, "Email", &CleanOptions::default()).unwrap();
        assert_eq!(values, vec!["", "bc"]);
    }

    #[test]
    fn test_absent_rows_are_skipped() {
        let sheet = Worksheet::from_rows(
            "s",
            vec![
                vec!["Name", "Email"],
                vec!["", ""],
                vec!["B", "b@c"],
            ],
        );
        let values = clean_column(&sheet, "Email", &CleanOptions::default()).unwrap();
        assert_eq!(values, vec!["bc"]);
    }

    #[test]
    fn test_rows_above_header_are_ignored() {
        let sheet = Worksheet::from_rows(
            "s",
            vec![
                vec!["", ""],
                vec!["Name", "Email"],
                vec!["A", "a@b"],
            ],
        );
        let values = clean_column(&sheet, "Email", &CleanOptions::default()).unwrap();
        assert_eq!(values, vec!["ab"]);
    }

    #[test]
    fn test_non_string_cells_are_stringified() {
        let mut sheet = Worksheet::new("s");
        sheet.set_cell(0, 0, Data::String("Qty".to_string()));
        sheet.set_cell(1, 0, Data::Int(7));
        sheet.set_cell(2, 0, Data::Float(2.5));
        sheet.set_cell(3, 0, Data::Bool(false));
        let values = clean_column(&sheet, "Qty", &CleanOptions::default()).unwrap();
        assert_eq!(values, vec!["7", "2.5", "false"]);
    }

    #[test]
    fn test_custom_strip_char() {
        let options = CleanOptions {
            strip_char: '#',
            ..CleanOptions::default()
        };
        let sheet = Worksheet::from_rows("s", vec![vec!["Tag"], vec!["#a@b#"]]);
        let values = clean_column(&sheet, "Tag", &options).unwrap();
        assert_eq!(values, vec!["a@b"]);
    }

    #[test]
    fn test_placeholder_column_is_selectable() {
        let sheet = Worksheet::from_rows("s", vec![vec!["Name", ""], vec!["A", "a@b"]]);
        let values = clean_column(&sheet, "Column2", &CleanOptions::default()).unwrap();
        assert_eq!(values, vec!["ab"]);
    }

    #[test]
    fn test_cleaning_is_idempotent_over_same_sheet() {
        let sheet = email_sheet();
        let first = clean_column(&sheet, "Email", &CleanOptions::default()).unwrap();
        let second = clean_column(&sheet, "Email", &CleanOptions::default()).unwrap();
        assert_eq!(first, second);
    }
}
