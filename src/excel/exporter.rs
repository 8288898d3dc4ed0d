//! Batch exporter - one .xlsx file per batch

use crate::batch::Batch;
use crate::error::{ScrubError, ScrubResult};
use rust_xlsxwriter::{Format, Workbook};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes cleaned batches as single-sheet workbooks
pub struct BatchExporter {
    output_dir: PathBuf,
}

impl BatchExporter {
    /// Create a new exporter writing into `output_dir`
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File name for a batch: `cleaned_<column>_batch_<n>.xlsx`
    pub fn file_name(column: &str, number: usize) -> String {
        let safe_column: String = column
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        format!("cleaned_{}_batch_{}.xlsx", safe_column, number)
    }

    /// Write `batch` with `column` as the header cell, returning the path
    pub fn export(&self, column: &str, batch: &Batch) -> ScrubResult<PathBuf> {
        if !self.output_dir.as_os_str().is_empty() && !self.output_dir.exists() {
            std::fs::create_dir_all(&self.output_dir)?;
        }

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let header_format = Format::new().set_bold();

        worksheet
            .write_string_with_format(0, 0, column, &header_format)
            .map_err(|e| ScrubError::Export(format!("Failed to write header: {}", e)))?;

        for (idx, value) in batch.values.iter().enumerate() {
            worksheet
                .write_string(idx as u32 + 1, 0, value)
                .map_err(|e| ScrubError::Export(format!("Failed to write value: {}", e)))?;
        }

        let path = self.output_dir.join(Self::file_name(column, batch.number));
        workbook
            .save(&path)
            .map_err(|e| ScrubError::Export(format!("Failed to save Excel file: {}", e)))?;

        info!(
            file = %path.display(),
            batch = batch.number,
            rows = batch.len(),
            "batch exported"
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook, Data, Reader, Xlsx};
    use tempfile::TempDir;

    #[test]
    fn test_file_name() {
        assert_eq!(
            BatchExporter::file_name("Email", 3),
            "cleaned_Email_batch_3.xlsx"
        );
        assert_eq!(
            BatchExporter::file_name("in/out\\x", 1),
            "cleaned_in_out_x_batch_1.xlsx"
        );
    }

    #[test]
    fn test_export_writes_header_and_values() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = BatchExporter::new(temp_dir.path());
        let batch = Batch {
            number: 2,
            offset: 2,
            values: vec!["xy.com".to_string(), "".to_string(), "zw.com".to_string()],
        };

        let path = exporter.export("Email", &batch).unwrap();
        assert_eq!(path, temp_dir.path().join("cleaned_Email_batch_2.xlsx"));
        assert!(path.exists());

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range_at(0).unwrap().unwrap();
        assert_eq!(
            range.get_value((0, 0)),
            Some(&Data::String("Email".to_string()))
        );
        assert_eq!(
            range.get_value((1, 0)),
            Some(&Data::String("xy.com".to_string()))
        );
        assert_eq!(
            range.get_value((3, 0)),
            Some(&Data::String("zw.com".to_string()))
        );
    }

    #[test]
    fn test_export_creates_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("out").join("batches");
        let exporter = BatchExporter::new(&nested);
        assert_eq!(exporter.output_dir(), nested.as_path());
        let batch = Batch {
            number: 1,
            offset: 0,
            values: vec!["a".to_string()],
        };
        let path = exporter.export("c", &batch).unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }
}
