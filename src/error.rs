//! Error types for the bankstmt library.
//!
//! Only the I/O edges fail: row inference itself never returns an error.

use std::io;
use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading statements and writing tables.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error occurred during read or write operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading or writing CSV.
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// The PDF could not be turned into text.
    #[error("PDF extraction error: {0}")]
    PdfError(String),

    /// The reference CSV carries no column names.
    #[error("Expected schema is empty: {0}")]
    EmptySchema(String),

    /// Invalid layout specified.
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// Two tables do not share the same columns.
    #[error("Schema mismatch: expected [{expected}], found [{found}]")]
    SchemaMismatch { expected: String, found: String },
}

impl From<pdf_extract::OutputError> for Error {
    fn from(err: pdf_extract::OutputError) -> Self {
        Error::PdfError(err.to_string())
    }
}
