//! Error types for the data-loader crate.
//!
//! Loading is the only fallible step in this crate. Once a [`MovieCatalog`]
//! exists every query on it is infallible.
//!
//! [`MovieCatalog`]: crate::MovieCatalog

use thiserror::Error;

/// Errors that can occur while loading or preprocessing movie data
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading or writing a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader or writer rejected the data
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// A record couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A column the operation cannot work without is absent from the header
    #[error("Missing column {column} in {file}")]
    MissingColumn { file: String, column: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
