//! Row grammar for statements that mark each transaction with a CR/DR token.
//!
//! Three whole-line shapes are tried in order, first match wins:
//!
//! ```text
//! 31-01-2024  <description>  CR|DR  <amount>  <balance>
//! 2024-01-31  <description>  CR|DR  <amount>  <balance>
//! 31-01-2024  <description>  <amount>  CR|DR  <balance>
//! ```

use crate::normalize::{normalize_date, parse_amount};
use crate::schema::{ColumnRoles, ExpectedSchema};
use crate::types::{CellValue, DebitCredit, ParsedRow};
use once_cell::sync::Lazy;
use regex::Regex;

const DAY_FIRST_DATE: &str = r"(?P<date>[0-9]{2}[-/][0-9]{2}[-/][0-9]{4})";
const YEAR_FIRST_DATE: &str = r"(?P<date>[0-9]{4}[-/][0-9]{2}[-/][0-9]{2})";
const TYPE_FLAG: &str = r"(?P<kind>[Cc][Rr]|[Dd][Rr])";

/// Amount token body: optional parentheses, grouped or plain ASCII digits, optional cents.
pub(crate) const MONEY_BODY: &str = r"[\(\)]?(?:[0-9]{1,3}(?:,[0-9]{3})*|[0-9]+)(?:\.[0-9]{2})?[\(\)]?";

static FLAGGED_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let amount = format!("(?P<amount>{})", MONEY_BODY);
    let balance = format!("(?P<balance>{})", MONEY_BODY);

    [
        format!(r"(?i)^{DAY_FIRST_DATE}\s+(?P<desc>.+?)\s+{TYPE_FLAG}\s+{amount}\s+{balance}$"),
        format!(r"(?i)^{YEAR_FIRST_DATE}\s+(?P<desc>.+?)\s+{TYPE_FLAG}\s+{amount}\s+{balance}$"),
        format!(r"(?i)^{DAY_FIRST_DATE}\s+(?P<desc>.+?)\s+{amount}\s+{TYPE_FLAG}\s+{balance}$"),
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Fields captured from a flagged line.
#[derive(Debug, Clone, PartialEq)]
pub struct FlaggedLine {
    /// Raw date token.
    pub date: String,
    pub description: String,
    pub direction: DebitCredit,
    pub amount: f64,
    pub balance: f64,
}

impl FlaggedLine {
    /// Match a line against the flagged shapes.
    pub fn parse(line: &str) -> Option<Self> {
        FLAGGED_PATTERNS.iter().find_map(|re| {
            let caps = re.captures(line)?;
            let direction = caps["kind"].parse::<DebitCredit>().ok()?;

            Some(FlaggedLine {
                date: caps["date"].to_string(),
                description: caps["desc"].trim().to_string(),
                direction,
                amount: parse_amount(&caps["amount"]),
                balance: parse_amount(&caps["balance"]),
            })
        })
    }

    /// Lay the captured fields out over the schema.
    pub fn into_row(self, schema: &ExpectedSchema, roles: &ColumnRoles) -> ParsedRow {
        let mut row = ParsedRow::with_columns(schema.columns().iter().map(String::as_str));

        if let Some(col) = roles.date.as_deref() {
            row.set(col, CellValue::Text(normalize_date(&self.date)));
        }
        if let Some(col) = roles.description.as_deref() {
            row.set(col, CellValue::Text(self.description));
        }

        if roles.flagged_uses_amount() {
            if let Some(col) = roles.amount.as_deref() {
                row.set(col, CellValue::Number(self.amount));
            }
        } else {
            let (active, other) = match self.direction {
                DebitCredit::Credit => (roles.credit.as_deref(), roles.debit.as_deref()),
                DebitCredit::Debit => (roles.debit.as_deref(), roles.credit.as_deref()),
            };
            if let Some(col) = active {
                row.set(col, CellValue::Number(self.amount));
            }
            if let Some(col) = other {
                row.set(col, CellValue::Number(0.0));
            }
        }

        if let Some(col) = roles.balance.as_deref() {
            row.set(col, CellValue::Number(self.balance));
        }

        row.fill_missing_numbers(&roles.numeric_columns());
        row
    }
}

/// Flagged grammar: a recognised line always yields a row.
pub fn parse_flagged_row(line: &str, schema: &ExpectedSchema, roles: &ColumnRoles) -> Option<ParsedRow> {
    FlaggedLine::parse(line).map(|m| m.into_row(schema, roles))
}
