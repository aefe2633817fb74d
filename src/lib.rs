//! Bank statement table extraction
//!
//! Turns the text layer of a bank-statement PDF into a transaction table that
//! follows a bank's reference CSV schema.
//!
//! # Pipeline
//!
//! - **Line extraction** ([`extract`]): PDF or text -> ordered, trimmed lines
//! - **Role resolution** ([`schema`]): reference columns -> Date/Description/
//!   Debit/Credit/Amount/Balance
//! - **Row inference** ([`inference`]): CR/DR flagged grammar, then the
//!   column-aligned grammar, line by line
//! - **Output** ([`csv_format`]): rows written in the reference column order
//!
//! # Examples
//!
//! ## Inferring rows from extracted lines
//!
//! ```
//! use bankstmt::{infer_rows, ExpectedSchema, InferenceConfig};
//!
//! let schema = ExpectedSchema::new(["Date", "Description", "Debit Amt", "Credit Amt", "Balance"]);
//! let lines = ["01-02-2024 Salary Credit CR 5,000.00 10,000.00"];
//!
//! let table = infer_rows(&schema, &lines, InferenceConfig::detect(&lines));
//! assert_eq!(table.rows[0].number("Credit Amt"), Some(5000.0));
//! ```
//!
//! ## Converting a PDF
//!
//! ```no_run
//! use std::fs::File;
//! use bankstmt::{csv_format, extract::StatementText, InferenceConfig, RowInferencer};
//!
//! let mut reference = File::open("reference.csv")?;
//! let schema = csv_format::read_schema(&mut reference)?;
//! let text = StatementText::from_pdf("statement.pdf")?;
//!
//! let inferencer = RowInferencer::new(schema, InferenceConfig::detect(&text.lines));
//! let table = inferencer.infer(&text.lines);
//!
//! let mut output = File::create("result.csv")?;
//! csv_format::write_table(&table, &mut output)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod types;
pub mod normalize;
pub mod schema;
pub mod routing;
pub mod flagged_format;
pub mod tabular_format;
pub mod inference;
pub mod extract;
pub mod csv_format;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use inference::{infer_rows, InferenceConfig, Layout, RowInferencer};
pub use normalize::{normalize_date, parse_amount};
pub use schema::{ColumnRoles, ExpectedSchema};
pub use types::{CellValue, DebitCredit, OutputTable, ParsedRow, Role};
