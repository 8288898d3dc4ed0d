//! Session state for one interactive cleaning run
//!
//! Holds the loaded file, the selected column, the row limit and the batch
//! offset. The parsed worksheet lives as long as the file does; the cleaned
//! sequence is cached per (file, column, limit) and dropped whenever the
//! column or the limit changes.

use crate::batch::{Batch, BatchCursor};
use crate::cleaner::{clean_column, CleanOptions};
use crate::error::{ScrubError, ScrubResult};
use crate::excel::{SheetImporter, SourceFile};
use crate::header::detect_header_with;
use crate::types::{HeaderRow, Worksheet};
use std::path::Path;
use tracing::{debug, info};

/// A parsed upload
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub name: String,
    pub fingerprint: u64,
    pub sheet: Worksheet,
    pub header: HeaderRow,
}

#[derive(Debug, Clone)]
struct CachedSequence {
    fingerprint: u64,
    column: String,
    limit: usize,
    values: Vec<String>,
}

/// Snapshot of where a session stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    pub file: Option<String>,
    pub column: Option<String>,
    pub row_limit: usize,
    pub offset: usize,
    pub total_rows: Option<usize>,
}

pub struct Session {
    options: CleanOptions,
    file: Option<LoadedFile>,
    column: Option<String>,
    cursor: BatchCursor,
    cache: Option<CachedSequence>,
}

impl Session {
    pub fn new(options: CleanOptions, row_limit: usize) -> ScrubResult<Self> {
        Ok(Self {
            options,
            file: None,
            column: None,
            cursor: BatchCursor::new(row_limit)?,
            cache: None,
        })
    }

    /// Read and load a file from disk
    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> ScrubResult<&HeaderRow> {
        self.discard_file();
        let source = SourceFile::read(path)?;
        self.load_file(source)
    }

    /// Load an uploaded file, discarding all previous state
    pub fn load_file(&mut self, source: SourceFile) -> ScrubResult<&HeaderRow> {
        self.discard_file();

        let sheet = SheetImporter::import(&source)?;
        let header = detect_header_with(&sheet, self.options.header_scan_rows);
        if header.is_empty() {
            return Err(ScrubError::NoColumns);
        }

        info!(
            file = %source.name,
            header_row = header.row,
            columns = header.len(),
            "file loaded"
        );

        let loaded = self.file.insert(LoadedFile {
            name: source.name.clone(),
            fingerprint: source.fingerprint(),
            sheet,
            header,
        });
        Ok(&loaded.header)
    }

    fn discard_file(&mut self) {
        self.file = None;
        self.column = None;
        self.cache = None;
        self.cursor.reset();
    }

    pub fn file(&self) -> Option<&LoadedFile> {
        self.file.as_ref()
    }

    pub fn headers(&self) -> Option<&HeaderRow> {
        self.file.as_ref().map(|f| &f.header)
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn row_limit(&self) -> usize {
        self.cursor.limit()
    }

    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    /// Select the column to clean. A different column resets the offset.
    pub fn select_column(&mut self, column: &str) -> ScrubResult<()> {
        let file = self.file.as_ref().ok_or(ScrubError::NoFile)?;
        if file.header.position(column).is_none() {
            return Err(ScrubError::ColumnNotFound {
                column: column.to_string(),
                available: file.header.names.clone(),
            });
        }

        if self.column.as_deref() != Some(column) {
            debug!(column, "column selected, resetting offset");
            self.column = Some(column.to_string());
            self.cache = None;
            self.cursor.reset();
        }
        Ok(())
    }

    /// Change the batch size. A different limit resets the offset.
    pub fn set_row_limit(&mut self, limit: usize) -> ScrubResult<()> {
        if limit != self.cursor.limit() {
            debug!(limit, "row limit changed, resetting offset");
            self.cursor = BatchCursor::new(limit)?;
            self.cache = None;
        }
        Ok(())
    }

    /// Cleaned values for the selected column, computed once per
    /// (file, column, limit)
    pub fn cleaned_values(&mut self) -> ScrubResult<&[String]> {
        self.ensure_cache()?;
        match self.cache.as_ref() {
            Some(cache) => Ok(&cache.values),
            None => Err(ScrubError::NoColumnSelected),
        }
    }

    fn ensure_cache(&mut self) -> ScrubResult<()> {
        let file = self.file.as_ref().ok_or(ScrubError::NoFile)?;
        let column = self.column.as_deref().ok_or(ScrubError::NoColumnSelected)?;
        let limit = self.cursor.limit();

        let fresh = self.cache.as_ref().is_some_and(|c| {
            c.fingerprint == file.fingerprint && c.column == column && c.limit == limit
        });
        if fresh {
            debug!(column, "using cached cleaned values");
            return Ok(());
        }

        let values = clean_column(&file.sheet, column, &self.options)?;
        debug!(column, rows = values.len(), "cleaned values computed");
        self.cache = Some(CachedSequence {
            fingerprint: file.fingerprint,
            column: column.to_string(),
            limit,
            values,
        });
        Ok(())
    }

    /// Produce the next batch for the selected column
    pub fn next_batch(&mut self) -> ScrubResult<Batch> {
        self.ensure_cache()?;
        let cache = self.cache.as_ref().ok_or(ScrubError::NoColumnSelected)?;

        if cache.values.is_empty() {
            return Err(ScrubError::NoData {
                column: cache.column.clone(),
            });
        }

        let batch = self.cursor.next_batch(&cache.values, &cache.column)?;
        info!(
            column = %cache.column,
            batch = batch.number,
            rows = batch.len(),
            offset = self.cursor.offset(),
            "batch ready"
        );
        Ok(batch)
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            file: self.file.as_ref().map(|f| f.name.clone()),
            column: self.column.clone(),
            row_limit: self.cursor.limit(),
            offset: self.cursor.offset(),
            total_rows: self.cache.as_ref().map(|c| c.values.len()),
        }
    }
}
