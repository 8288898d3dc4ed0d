use thiserror::Error;

pub type ScrubResult<T> = Result<T, ScrubError>;

#[derive(Error, Debug)]
pub enum ScrubError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse file: {0}")]
    Parse(String),

    #[error("No columns detected in the uploaded file")]
    NoColumns,

    #[error("Column '{column}' not found (available: {})", available.join(", "))]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    #[error("No data found in column '{column}'")]
    NoData { column: String },

    #[error("No more rows to process in column '{column}'")]
    NoMoreRows { column: String },

    #[error("Invalid row limit: {0}")]
    InvalidRowLimit(String),

    #[error("No file loaded")]
    NoFile,

    #[error("No column selected")]
    NoColumnSelected,

    #[error("Export error: {0}")]
    Export(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<csv::Error> for ScrubError {
    fn from(e: csv::Error) -> Self {
        ScrubError::Parse(e.to_string())
    }
}

impl From<calamine::Error> for ScrubError {
    fn from(e: calamine::Error) -> Self {
        ScrubError::Parse(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ScrubError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        ScrubError::Export(e.to_string())
    }
}

impl From<serde_yaml::Error> for ScrubError {
    fn from(e: serde_yaml::Error) -> Self {
        ScrubError::Config(e.to_string())
    }
}

