//! Runtime configuration
//!
//! Values come from an optional YAML file; command-line flags (and their
//! environment variables) override whatever the file sets.
//!
//! ```yaml
//! strip_char: "@"
//! row_limit: 500
//! header_scan_rows: 5
//! output_dir: ./batches
//! ```

use crate::cleaner::{CleanOptions, DEFAULT_STRIP_CHAR};
use crate::error::{ScrubError, ScrubResult};
use crate::header::DEFAULT_SCAN_ROWS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_ROW_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrubConfig {
    pub strip_char: char,
    pub row_limit: usize,
    pub header_scan_rows: u32,
    pub output_dir: PathBuf,
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self {
            strip_char: DEFAULT_STRIP_CHAR,
            row_limit: DEFAULT_ROW_LIMIT,
            header_scan_rows: DEFAULT_SCAN_ROWS,
            output_dir: PathBuf::from("."),
        }
    }
}

impl ScrubConfig {
    /// Load and validate a YAML config file
    pub fn load<P: AsRef<Path>>(path: P) -> ScrubResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ScrubError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> ScrubResult<Self> {
        let config: ScrubConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// File config when a path is given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> ScrubResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> ScrubResult<()> {
        if self.row_limit == 0 {
            return Err(ScrubError::Config(
                "row_limit must be a positive number".to_string(),
            ));
        }
        if self.header_scan_rows == 0 {
            return Err(ScrubError::Config(
                "header_scan_rows must be a positive number".to_string(),
            ));
        }
        Ok(())
    }

    pub fn clean_options(&self) -> CleanOptions {
        CleanOptions {
            strip_char: self.strip_char,
            header_scan_rows: self.header_scan_rows,
        }
    }
}
