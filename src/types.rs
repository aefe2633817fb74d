//! Common types shared by the schema resolver, the row grammars and the writers.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Semantic role a schema column can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// Transaction date.
    Date,
    /// Narration / transaction details.
    Description,
    /// Outgoing amount column.
    Debit,
    /// Incoming amount column.
    Credit,
    /// Single signed or unsigned amount column.
    Amount,
    /// Running balance.
    Balance,
}

impl Role {
    /// All roles, in resolution order.
    pub const ALL: [Role; 6] = [
        Role::Date,
        Role::Description,
        Role::Debit,
        Role::Credit,
        Role::Amount,
        Role::Balance,
    ];

    /// Whether cells in this role carry numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Role::Debit | Role::Credit | Role::Amount | Role::Balance)
    }
}

/// Debit/Credit indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebitCredit {
    /// Debit transaction (outgoing).
    Debit,
    /// Credit transaction (incoming).
    Credit,
}

impl FromStr for DebitCredit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DR" | "D" | "DEBIT" => Ok(DebitCredit::Debit),
            "CR" | "C" | "CREDIT" => Ok(DebitCredit::Credit),
            _ => Err(format!("Invalid debit/credit indicator: {}", s)),
        }
    }
}

/// One cell of an output row.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Date or description text.
    Text(String),
    /// Numeric role value.
    Number(f64),
    /// Column without a role, or a role the line did not fill.
    #[default]
    Empty,
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::Empty => Ok(()),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_str(""),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

/// Render a float with at least one fractional digit (`5000.0`, `1234.5`).
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 {
        format!("{:.1}", n)
    } else {
        n.to_string()
    }
}

/// A single recognised transaction line, keyed by column name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedRow {
    cells: BTreeMap<String, CellValue>,
}

impl ParsedRow {
    /// Create a row with every column present and empty.
    pub fn with_columns<'a, I>(columns: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let cells = columns
            .into_iter()
            .map(|c| (c.to_string(), CellValue::Empty))
            .collect();
        Self { cells }
    }

    /// Set a cell. Unknown columns are ignored so rows never grow extra columns.
    pub fn set(&mut self, column: &str, value: CellValue) {
        if let Some(cell) = self.cells.get_mut(column) {
            *cell = value;
        }
    }

    /// Write `0.0` into any of the given columns that is still empty.
    pub fn fill_missing_numbers(&mut self, columns: &[&str]) {
        for column in columns {
            if let Some(cell) = self.cells.get_mut(*column) {
                if cell.is_empty() {
                    *cell = CellValue::Number(0.0);
                }
            }
        }
    }

    /// Whether any of the given columns holds a non-zero number.
    pub fn has_nonzero(&self, columns: &[&str]) -> bool {
        columns
            .iter()
            .any(|c| self.number(c).is_some_and(|n| n != 0.0))
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// Numeric value of a column, `None` when the cell is empty or text.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(CellValue::as_number)
    }

    pub fn text(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(CellValue::as_text)
    }

    /// Column names held by this row.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Cells in the given column order.
    pub fn ordered<'a>(&'a self, columns: &'a [String]) -> Vec<&'a CellValue> {
        static EMPTY: CellValue = CellValue::Empty;
        columns
            .iter()
            .map(|c| self.cells.get(c).unwrap_or(&EMPTY))
            .collect()
    }
}

/// Ordered rows over a fixed column list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputTable {
    /// Column names, in the expected schema's order.
    pub columns: Vec<String>,

    /// Rows, in the order of the lines they came from.
    pub rows: Vec<ParsedRow>,
}

impl OutputTable {
    /// Create an empty table for the given columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: ParsedRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
