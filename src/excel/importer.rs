//! Sheet importer - CSV/TSV/XLSX/XLS → Worksheet

use crate::error::{ScrubError, ScrubResult};
use crate::types::Worksheet;
use calamine::{open_workbook_auto_from_rs, Reader};
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// Input format, chosen from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated text
    Csv,
    /// Tab-separated text
    Tsv,
    /// Binary or zipped workbook (xlsx, xlsm, xlsb, xls, ods)
    Workbook,
    /// Unknown extension: try a workbook first, then CSV
    Unknown,
}

impl SourceFormat {
    pub fn from_name(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("csv") => SourceFormat::Csv,
            Some("tsv") | Some("tab") => SourceFormat::Tsv,
            Some("xlsx") | Some("xlsm") | Some("xlsb") | Some("xls") | Some("ods") => {
                SourceFormat::Workbook
            }
            _ => SourceFormat::Unknown,
        }
    }
}

/// An uploaded file held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read the whole file in one shot
    pub fn read<P: AsRef<Path>>(path: P) -> ScrubResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        debug!(file = %path.display(), bytes = bytes.len(), "file read");
        Ok(Self::new(name, bytes))
    }

    /// Identity of the file contents, used as a cache key
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.name.hash(&mut hasher);
        self.bytes.hash(&mut hasher);
        hasher.finish()
    }

    pub fn format(&self) -> SourceFormat {
        SourceFormat::from_name(&self.name)
    }
}

/// Parses the first sheet of an uploaded file
pub struct SheetImporter;

impl SheetImporter {
    /// Parse `source` into a worksheet. Only the first sheet of a
    /// workbook is read.
    pub fn import(source: &SourceFile) -> ScrubResult<Worksheet> {
        let sheet = match source.format() {
            SourceFormat::Csv => Self::import_delimited(source, b',')?,
            SourceFormat::Tsv => Self::import_delimited(source, b'\t')?,
            SourceFormat::Workbook => Self::import_workbook(source)?,
            SourceFormat::Unknown => match Self::import_workbook(source) {
                Ok(sheet) => sheet,
                Err(e) => {
                    debug!(error = %e, "not a workbook, falling back to CSV");
                    Self::import_delimited(source, b',')?
                }
            },
        };

        let range = sheet.range();
        info!(
            file = %source.name,
            sheet = sheet.name(),
            rows = range.row_count(),
            columns = range.column_count(),
            "worksheet loaded"
        );
        Ok(sheet)
    }

    fn import_delimited(source: &SourceFile, delimiter: u8) -> ScrubResult<Worksheet> {
        let bytes = source.bytes.as_slice();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false) // header row is detected, not assumed
            .flexible(true)
            .from_reader(bytes);

        // The reader skips blank lines; they still occupy a row so that row
        // indices match the file's lines the way a workbook keeps empty rows.
        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut record = csv::StringRecord::new();
        let mut consumed = 0usize;
        while reader.read_record(&mut record)? {
            for _ in 0..skipped_blank_lines(bytes, consumed) {
                rows.push(Vec::new());
            }
            rows.push(record.iter().map(str::to_string).collect());
            consumed = reader.position().byte() as usize;
        }

        Ok(Worksheet::from_rows("Sheet1", rows))
    }

    fn import_workbook(source: &SourceFile) -> ScrubResult<Worksheet> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(source.bytes.clone()))?;

        let name = workbook
            .sheet_names()
            .first()
            .cloned()
            .unwrap_or_else(|| "Sheet1".to_string());

        match workbook.worksheet_range_at(0) {
            Some(range) => Ok(Worksheet::from_range(name, &range?)),
            None => Err(ScrubError::Parse("workbook contains no sheets".to_string())),
        }
    }
}

/// Number of blank lines between the end of the previous record (at byte
/// `consumed`) and the start of the next one.
fn skipped_blank_lines(bytes: &[u8], consumed: usize) -> usize {
    let mut i = consumed.min(bytes.len());

    if consumed == 0 {
        if bytes.starts_with(b"\xEF\xBB\xBF") {
            i = 3;
        }
    } else {
        // Finish the previous record's terminator if the reader stopped
        // part way through it
        match (bytes[consumed - 1], bytes.get(i)) {
            (b'\r', Some(b'\n')) => i += 1,
            (b'\r' | b'\n', _) => {}
            (_, Some(b'\r')) => {
                i += 1;
                if bytes.get(i) == Some(&b'\n') {
                    i += 1;
                }
            }
            (_, Some(b'\n')) => i += 1,
            _ => {}
        }
    }

    let mut lines = 0;
    while let Some(byte) = bytes.get(i) {
        match byte {
            b'\n' => i += 1,
            b'\r' => {
                i += 1;
                if bytes.get(i) == Some(&b'\n') {
                    i += 1;
                }
            }
            _ => break,
        }
        lines += 1;
    }
    lines
}
