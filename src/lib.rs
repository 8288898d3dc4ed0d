//! Sheet Scrub - strip a character from one spreadsheet column
//!
//! This library loads a tabular file (CSV, TSV, XLSX, XLS), detects its
//! header row, strips a character (`@` by default) from every value of one
//! column and hands the cleaned values out in fixed-size batches, each of
//! which can be written as its own `.xlsx` file.
//!
//! # Example
//!
//! ```no_run
//! use sheet_scrub::cleaner::CleanOptions;
//! use sheet_scrub::excel::BatchExporter;
//! use sheet_scrub::session::Session;
//!
//! let mut session = Session::new(CleanOptions::default(), 500)?;
//! let header = session.load_path("contacts.xlsx")?;
//! println!("Columns: {:?}", header.names);
//!
//! session.select_column("Email")?;
//! let batch = session.next_batch()?;
//! BatchExporter::new(".").export("Email", &batch)?;
//! # Ok::<(), sheet_scrub::error::ScrubError>(())
//! ```

pub mod batch;
pub mod cleaner;
pub mod cli;
pub mod config;
pub mod error;
pub mod excel;
pub mod header;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use error::{ScrubError, ScrubResult};
pub use types::{CellRange, HeaderRow, Worksheet};
