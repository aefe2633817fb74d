//! CSV reference tables and output writing.
//!
//! A bank's reference CSV supplies the expected schema through its header;
//! inferred tables are written back out in exactly that column order.

use crate::error::{Error, Result};
use crate::schema::ExpectedSchema;
use crate::types::OutputTable;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// A CSV file loaded as header plus raw string records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CsvTable {
    /// Header row.
    pub columns: Vec<String>,

    /// Data rows, as written.
    pub records: Vec<Vec<String>>,
}

impl CsvTable {
    /// Parse a CSV table from any source implementing `Read`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::fs::File;
    /// use bankstmt::csv_format::CsvTable;
    ///
    /// let mut file = File::open("reference.csv")?;
    /// let table = CsvTable::from_read(&mut file)?;
    /// println!("columns: {:?}", table.columns);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);

        let columns = csv_reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let mut records = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            records.push(record.iter().map(str::to_string).collect());
        }

        Ok(CsvTable { columns, records })
    }

    /// Open and parse a CSV file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        Self::from_read(&mut file)
    }

    /// The header as an expected schema.
    pub fn schema(&self) -> Result<ExpectedSchema> {
        if self.columns.iter().all(|c| c.trim().is_empty()) {
            return Err(Error::EmptySchema("reference CSV has no header".to_string()));
        }
        Ok(ExpectedSchema::new(self.columns.iter().cloned()))
    }

    /// Fail unless this table has exactly the given columns, in order.
    pub fn ensure_columns(&self, columns: &[String]) -> Result<()> {
        if self.columns == columns {
            Ok(())
        } else {
            Err(Error::SchemaMismatch {
                expected: columns.join(", "),
                found: self.columns.join(", "),
            })
        }
    }
}

impl From<&OutputTable> for CsvTable {
    fn from(table: &OutputTable) -> Self {
        let records = table
            .rows
            .iter()
            .map(|row| {
                row.ordered(&table.columns)
                    .iter()
                    .map(|cell| cell.to_string())
                    .collect()
            })
            .collect();

        CsvTable {
            columns: table.columns.clone(),
            records,
        }
    }
}

/// Read only the header of a reference CSV as the expected schema.
pub fn read_schema<R: Read>(reader: &mut R) -> Result<ExpectedSchema> {
    let mut csv_reader = ReaderBuilder::new().from_reader(reader);
    let columns: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();

    CsvTable {
        columns,
        records: Vec::new(),
    }
    .schema()
}

/// Write an inferred table as CSV: header in schema order, one record per row.
pub fn write_table<W: Write>(table: &OutputTable, writer: &mut W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    csv_writer.write_record(&table.columns)?;
    for row in &table.rows {
        csv_writer.serialize(row.ordered(&table.columns))?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellValue, ParsedRow};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn sample_table() -> OutputTable {
        let columns: Vec<String> = ["Date", "Description", "Debit Amt", "Credit Amt", "Balance"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let mut row = ParsedRow::with_columns(columns.iter().map(String::as_str));
        row.set("Date", CellValue::Text("2024-02-01".into()));
        row.set("Description", CellValue::Text("Salary, Feb".into()));
        row.set("Debit Amt", CellValue::Number(0.0));
        row.set("Credit Amt", CellValue::Number(5000.0));
        row.set("Balance", CellValue::Number(10000.5));

        let mut table = OutputTable::new(columns);
        table.push(row);
        table
    }

    #[test]
    fn test_read_schema() {
        let mut input = Cursor::new("Date,Description,Debit Amt,Credit Amt,Balance\n01-08-2024,x,1,,2\n");
        let schema = read_schema(&mut input).unwrap();
        assert_eq!(
            schema.columns(),
            &["Date", "Description", "Debit Amt", "Credit Amt", "Balance"]
        );
    }

    #[test]
    fn test_read_schema_empty() {
        let mut input = Cursor::new("");
        assert!(matches!(read_schema(&mut input), Err(Error::EmptySchema(_))));
    }

    #[test]
    fn test_write_table() {
        let mut out = Vec::new();
        write_table(&sample_table(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Date,Description,Debit Amt,Credit Amt,Balance\n2024-02-01,\"Salary, Feb\",0.0,5000.0,10000.5\n"
        );
    }

    #[test]
    fn test_write_empty_table_keeps_header() {
        let table = OutputTable::new(vec!["Date".into(), "Amount".into()]);
        let mut out = Vec::new();
        write_table(&table, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Date,Amount\n");
    }

    #[test]
    fn test_table_from_output() {
        let csv = CsvTable::from(&sample_table());
        assert_eq!(csv.records, vec![vec!["2024-02-01", "Salary, Feb", "0.0", "5000.0", "10000.5"]]);
    }

    #[test]
    fn test_from_read_and_ensure_columns() {
        let mut input = Cursor::new("Date,Amount\n2024-02-01,5.0\n2024-02-02,6.0\n");
        let table = CsvTable::from_read(&mut input).unwrap();

        assert_eq!(table.records.len(), 2);
        assert!(table.ensure_columns(&["Date".to_string(), "Amount".to_string()]).is_ok());
        assert!(matches!(
            table.ensure_columns(&["Amount".to_string(), "Date".to_string()]),
            Err(Error::SchemaMismatch { .. })
        ));
    }
}
