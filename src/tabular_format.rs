//! Row grammar for column-aligned statements without CR/DR tokens.
//!
//! A line is cut into fields on runs of two or more whitespace characters:
//! date first, description second, then amounts with the running balance last.

use crate::flagged_format::MONEY_BODY;
use crate::normalize::{normalize_date, parse_amount};
use crate::routing::{route_by_keywords, route_or_debit};
use crate::schema::{ColumnRoles, ExpectedSchema};
use crate::types::{CellValue, DebitCredit, ParsedRow};
use once_cell::sync::Lazy;
use regex::Regex;

/// Magnitudes below this count as an empty amount cell.
pub const ZERO_EPSILON: f64 = 1e-9;

static FIELD_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

static DATE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[0-9]{2}[-/][0-9]{2}[-/][0-9]{4}|[0-9]{4}[-/][0-9]{2}[-/][0-9]{2})$").unwrap());

static MONEY_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(&format!("^{}$", MONEY_BODY)).unwrap());

/// Whether a field is a bare date token.
pub fn is_date_token(field: &str) -> bool {
    DATE_TOKEN.is_match(field.trim())
}

/// Whether a field is an amount token such as `1,234.00` or `(50.00)`.
pub fn is_money_token(field: &str) -> bool {
    MONEY_TOKEN.is_match(field.trim())
}

fn is_zero(value: f64) -> bool {
    value.abs() < ZERO_EPSILON
}

/// Fields of a line that starts with a date and has at least three columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularLine {
    /// Raw date token.
    pub date: String,
    pub description: String,
    /// Amount-like fields after the description, left to right.
    pub numbers: Vec<f64>,
}

impl TabularLine {
    pub fn parse(line: &str) -> Option<Self> {
        let fields: Vec<&str> = FIELD_SEPARATOR.split(line.trim()).collect();
        if fields.len() < 3 || !is_date_token(fields[0]) {
            return None;
        }

        let numbers = fields[2..]
            .iter()
            .map(|f| f.trim())
            .filter(|f| is_money_token(f))
            .map(parse_amount)
            .collect();

        Some(TabularLine {
            date: fields[0].trim().to_string(),
            description: fields.get(1).map(|d| d.trim()).unwrap_or_default().to_string(),
            numbers,
        })
    }

    /// Trailing number, read as the running balance.
    pub fn balance(&self) -> Option<f64> {
        self.numbers.last().copied()
    }

    /// Numbers before the balance.
    pub fn remaining(&self) -> &[f64] {
        match self.numbers.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    /// Lay the fields out over the schema; `None` when every numeric cell is zero.
    pub fn into_row(self, schema: &ExpectedSchema, roles: &ColumnRoles) -> Option<ParsedRow> {
        let mut row = ParsedRow::with_columns(schema.columns().iter().map(String::as_str));

        if let Some(col) = roles.date.as_deref() {
            row.set(col, CellValue::Text(normalize_date(&self.date)));
        }
        if let Some(col) = roles.description.as_deref() {
            row.set(col, CellValue::Text(self.description.clone()));
        }

        if let (Some(col), Some(balance)) = (roles.balance.as_deref(), self.balance()) {
            row.set(col, CellValue::Number(balance));
        }

        if roles.tabular_uses_amount() {
            if let (Some(col), Some(amount)) = (roles.amount.as_deref(), self.remaining().first()) {
                row.set(col, CellValue::Number(*amount));
            }
        } else {
            // Keywords only count when the schema keeps a description column.
            let description = if roles.description.is_some() {
                self.description.as_str()
            } else {
                ""
            };
            let (debit, credit) = split_debit_credit(self.remaining(), description);
            if let Some(col) = roles.debit.as_deref() {
                row.set(col, CellValue::Number(debit));
            }
            if let Some(col) = roles.credit.as_deref() {
                row.set(col, CellValue::Number(credit));
            }
        }

        let numeric = roles.numeric_columns();
        row.fill_missing_numbers(&numeric);
        row.has_nonzero(&numeric).then_some(row)
    }
}

/// Decide `(debit, credit)` from the amounts that precede the balance.
///
/// * one amount: keyword routing, debit when nothing matches
/// * two amounts with exactly one zero: the other one, routed the same way
/// * two non-zero amounts: a negative one goes to debit as its magnitude;
///   otherwise a credit keyword sends the larger to credit, and anything
///   else sends the first to debit
///
/// Only the first two amounts are read; any further ones are ignored.
pub fn split_debit_credit(remaining: &[f64], description: &str) -> (f64, f64) {
    let place = |direction: DebitCredit, value: f64| match direction {
        DebitCredit::Debit => (value, 0.0),
        DebitCredit::Credit => (0.0, value),
    };

    match remaining {
        [] => (0.0, 0.0),
        [value] => place(route_or_debit(description), *value),
        [a, b, ..] => {
            let (a, b) = (*a, *b);
            if is_zero(a) && !is_zero(b) {
                place(route_or_debit(description), b)
            } else if is_zero(b) && !is_zero(a) {
                place(route_or_debit(description), a)
            } else if a < 0.0 || b < 0.0 {
                let negative = if a < 0.0 { a } else { b };
                (negative.abs(), 0.0)
            } else {
                match route_by_keywords(description) {
                    Some(DebitCredit::Credit) => (0.0, a.max(b)),
                    // A debit keyword takes the first amount, not the larger one as in the
                    // older extractor.
                    _ => (a, 0.0),
                }
            }
        }
    }
}

/// Tabular grammar: `None` for lines that are not dated rows or carry no amounts.
pub fn parse_tabular_row(line: &str, schema: &ExpectedSchema, roles: &ColumnRoles) -> Option<ParsedRow> {
    TabularLine::parse(line)?.into_row(schema, roles)
}
