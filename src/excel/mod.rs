//! Spreadsheet import/export
//!
//! - Import: CSV/TSV/XLSX/XLS → in-memory worksheet (first sheet only)
//! - Export: cleaned batch → single-column .xlsx

mod exporter;
mod importer;

pub use exporter::BatchExporter;
pub use importer::{SheetImporter, SourceFile, SourceFormat};
