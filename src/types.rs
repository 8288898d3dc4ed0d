use calamine::{Data, Range};
use serde::Serialize;
use std::collections::BTreeMap;

//==============================================================================
// Cell ranges
//==============================================================================

/// Occupied range of a worksheet, inclusive on both ends, zero-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellRange {
    pub first_row: u32,
    pub last_row: u32,
    pub first_col: u32,
    pub last_col: u32,
}

impl CellRange {
    /// Range covering exactly one cell
    pub fn single(row: u32, col: u32) -> Self {
        Self {
            first_row: row,
            last_row: row,
            first_col: col,
            last_col: col,
        }
    }

    pub fn column_count(&self) -> usize {
        (self.last_col - self.first_col) as usize + 1
    }

    pub fn row_count(&self) -> usize {
        (self.last_row - self.first_row) as usize + 1
    }

    /// Grow the range so that it contains (row, col)
    fn include(&mut self, row: u32, col: u32) {
        self.first_row = self.first_row.min(row);
        self.last_row = self.last_row.max(row);
        self.first_col = self.first_col.min(col);
        self.last_col = self.last_col.max(col);
    }
}

//==============================================================================
// Worksheet
//==============================================================================

/// Sparse in-memory grid for one sheet of a tabular file.
///
/// Only non-empty cells are stored, so a row without any value is absent.
/// Cells are addressed by absolute zero-based (row, column).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Worksheet {
    name: String,
    rows: BTreeMap<u32, BTreeMap<u32, Data>>,
    range: Option<CellRange>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: BTreeMap::new(),
            range: None,
        }
    }

    /// Build a worksheet of string cells anchored at A1.
    ///
    /// The declared range spans every row and the widest row, including
    /// blank fields, the same way a delimited text file is laid out.
    pub fn from_rows<I, R, S>(name: impl Into<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sheet = Self::new(name);
        let mut height = 0u32;
        let mut width = 0u32;

        for (row_idx, row) in rows.into_iter().enumerate() {
            let row_idx = row_idx as u32;
            let mut row_width = 0u32;
            for (col_idx, value) in row.into_iter().enumerate() {
                sheet.set_cell(row_idx, col_idx as u32, Data::String(value.into()));
                row_width = col_idx as u32 + 1;
            }
            width = width.max(row_width);
            height = row_idx + 1;
        }

        if height > 0 && width > 0 {
            sheet.declare_range(CellRange {
                first_row: 0,
                last_row: height - 1,
                first_col: 0,
                last_col: width - 1,
            });
        }
        sheet
    }

    /// Build a worksheet from a calamine range, keeping its declared bounds
    pub fn from_range(name: impl Into<String>, range: &Range<Data>) -> Self {
        let mut sheet = Self::new(name);
        if let (Some(start), Some(end)) = (range.start(), range.end()) {
            for (row, col, value) in range.used_cells() {
                sheet.set_cell(start.0 + row as u32, start.1 + col as u32, value.clone());
            }
            sheet.declare_range(CellRange {
                first_row: start.0,
                last_row: end.0,
                first_col: start.1,
                last_col: end.1,
            });
        }
        sheet
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store a cell value. Empty values are dropped.
    pub fn set_cell(&mut self, row: u32, col: u32, value: Data) {
        let empty = match &value {
            Data::Empty => true,
            Data::String(s) => s.is_empty(),
            _ => false,
        };
        if empty {
            return;
        }

        self.rows.entry(row).or_default().insert(col, value);
        match self.range.as_mut() {
            Some(range) => range.include(row, col),
            None => self.range = Some(CellRange::single(row, col)),
        }
    }

    /// Widen the occupied range to at least `declared`
    pub fn declare_range(&mut self, declared: CellRange) {
        match self.range.as_mut() {
            Some(range) => {
                range.include(declared.first_row, declared.first_col);
                range.include(declared.last_row, declared.last_col);
            }
            None => self.range = Some(declared),
        }
    }

    /// Occupied range; an empty worksheet degenerates to A1
    pub fn range(&self) -> CellRange {
        self.range.unwrap_or_else(|| CellRange::single(0, 0))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&Data> {
        self.rows.get(&row).and_then(|cells| cells.get(&col))
    }

    /// Cell value as text: absent cells read as "", non-strings use their
    /// display form
    pub fn cell_text(&self, row: u32, col: u32) -> String {
        match self.cell(row, col) {
            None => String::new(),
            Some(Data::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Indices of present rows strictly below `row`, in order
    pub fn rows_below(&self, row: u32) -> impl Iterator<Item = u32> + '_ {
        self.rows
            .range(row.saturating_add(1)..)
            .map(|(idx, _)| *idx)
            .filter(move |idx| *idx > row)
    }
}

//==============================================================================
// Header row
//==============================================================================

/// Detected column names and the row they were read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderRow {
    pub names: Vec<String>,
    pub row: u32,
    /// Absolute column index of `names[0]`
    pub first_col: u32,
}

impl HeaderRow {
    /// Position of an exactly matching name (case and whitespace sensitive)
    pub fn position(&self, column: &str) -> Option<usize> {
        self.names.iter().position(|name| name == column)
    }

    /// Absolute worksheet column for an exactly matching name
    pub fn column_index(&self, column: &str) -> Option<u32> {
        self.position(column).map(|pos| self.first_col + pos as u32)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
