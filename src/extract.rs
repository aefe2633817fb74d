//! Line extraction from statement PDFs and plain text dumps.
//!
//! The extractor does no interpretation: it hands the row inferencer an
//! ordered list of trimmed, non-empty lines. Optionally it can pre-split
//! lines into whitespace row candidates (`date desc.. debit credit balance`)
//! for statements whose text layer collapses column gaps to single spaces.

use crate::error::Result;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Minimum whitespace tokens for a line to become a row candidate.
const MIN_CANDIDATE_TOKENS: usize = 5;

/// Ordered lines of one statement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatementText {
    pub lines: Vec<String>,
}

impl StatementText {
    /// Extract the text layer of a PDF.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bankstmt::extract::StatementText;
    ///
    /// let text = StatementText::from_pdf("statement.pdf")?;
    /// println!("{} lines", text.lines.len());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_pdf<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = pdf_extract::extract_text(path)?;
        let text = Self::from_text(&raw);
        debug!(path = %path.display(), lines = text.lines.len(), "extracted PDF text");
        Ok(text)
    }

    /// Read already extracted text from any source implementing `Read`.
    pub fn from_read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        Ok(Self::from_text(&raw))
    }

    /// Split text into trimmed, non-empty lines. Page breaks count as line breaks.
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .split(['\n', '\r', '\u{000C}'])
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { lines }
    }

    /// Whole statement text, one line per row.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Whitespace row candidates, duplicates removed keeping the first.
    pub fn row_candidates(&self) -> Vec<RowCandidate> {
        let mut seen = HashSet::new();
        self.lines
            .iter()
            .filter_map(|line| RowCandidate::from_line(line))
            .filter(|candidate| seen.insert(candidate.clone()))
            .collect()
    }

    /// Row candidates rendered back into column-separated lines.
    pub fn candidate_lines(&self) -> Vec<String> {
        self.row_candidates().iter().map(RowCandidate::to_line).collect()
    }
}

/// A line split as `date, description.., debit, credit, balance`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowCandidate {
    pub date: String,
    pub description: String,
    pub debit: String,
    pub credit: String,
    pub balance: String,
}

impl RowCandidate {
    /// Split a line on whitespace. Header lines starting with `Date` are skipped.
    pub fn from_line(line: &str) -> Option<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let n = tokens.len();
        if n < MIN_CANDIDATE_TOKENS || tokens[0] == "Date" {
            return None;
        }

        Some(RowCandidate {
            date: tokens[0].to_string(),
            description: tokens[1..n - 3].join(" "),
            debit: tokens[n - 3].to_string(),
            credit: tokens[n - 2].to_string(),
            balance: tokens[n - 1].to_string(),
        })
    }

    /// Render with two-space gaps so the tabular grammar sees five fields.
    pub fn to_line(&self) -> String {
        [
            self.date.as_str(),
            self.description.as_str(),
            self.debit.as_str(),
            self.credit.as_str(),
            self.balance.as_str(),
        ]
        .join("  ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn test_from_text_trims_and_drops_blank_lines() {
        let text = StatementText::from_text("  Statement of Account \n\n\r\n 01-02-2024  Fee  50.00 \u{000C}Page 2\n   ");
        assert_eq!(
            text.lines,
            vec!["Statement of Account", "01-02-2024  Fee  50.00", "Page 2"]
        );
        assert_eq!(text.text(), "Statement of Account\n01-02-2024  Fee  50.00\nPage 2");
    }

    #[test]
    fn test_from_read() {
        let mut input = Cursor::new("a\n\nb\n");
        let text = StatementText::from_read(&mut input).unwrap();
        assert_eq!(text.lines, vec!["a", "b"]);
    }

    #[test]
    fn test_row_candidate_split() {
        let candidate = RowCandidate::from_line("01-02-2024 ATM Cash Withdrawal 2,000.00 0.00 8,000.00").unwrap();
        assert_eq!(
            candidate,
            RowCandidate {
                date: "01-02-2024".into(),
                description: "ATM Cash Withdrawal".into(),
                debit: "2,000.00".into(),
                credit: "0.00".into(),
                balance: "8,000.00".into(),
            }
        );
        assert_eq!(candidate.to_line(), "01-02-2024  ATM Cash Withdrawal  2,000.00  0.00  8,000.00");
    }

    #[test]
    fn test_row_candidate_rejects() {
        assert!(RowCandidate::from_line("Date Description Debit Amt Credit Amt Balance").is_none());
        assert!(RowCandidate::from_line("Page 1 of 2").is_none());
    }

    #[test]
    fn test_row_candidates_dedup_keeps_order() {
        let text = StatementText::from_text(
            "01-02-2024 Fee x 1.00 0.00 9.00\n02-02-2024 Fee y 2.00 0.00 7.00\n01-02-2024 Fee x 1.00 0.00 9.00",
        );
        let lines = text.candidate_lines();
        assert_eq!(
            lines,
            vec!["01-02-2024  Fee x  1.00  0.00  9.00", "02-02-2024  Fee y  2.00  0.00  7.00"]
        );
    }
}
