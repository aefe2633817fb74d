//! Bank statement compare - CLI tool checking an extracted CSV against the bank's reference CSV.

use bankstmt::{csv_format::CsvTable, logging, Result};
use clap::Parser;
use tracing::debug;

/// Numeric cells closer than this are considered equal.
const NUMERIC_TOLERANCE: f64 = 1e-6;

#[derive(Parser)]
#[command(name = "bankstmt_compare")]
#[command(about = "Compare an extracted statement CSV with a reference CSV", long_about = None)]
struct Cli {
    /// Extracted CSV
    #[arg(long)]
    actual: String,

    /// Reference CSV
    #[arg(long)]
    expected: String,

    /// Increase log detail (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let actual = CsvTable::from_path(&cli.actual)?;
    let expected = CsvTable::from_path(&cli.expected)?;
    debug!(
        actual_rows = actual.records.len(),
        expected_rows = expected.records.len(),
        "tables loaded"
    );

    let differences = compare_tables(&actual, &expected);
    if differences.is_empty() {
        println!(
            "The transaction records in '{}' and '{}' are identical.",
            cli.actual, cli.expected
        );
        return Ok(true);
    }

    let mut result = String::from("Differences found:\n");
    for diff in differences {
        result.push_str("  - ");
        result.push_str(&diff);
        result.push('\n');
    }
    print!("{}", result);
    Ok(false)
}

fn compare_tables(actual: &CsvTable, expected: &CsvTable) -> Vec<String> {
    let mut differences = Vec::new();

    // Column list must match exactly; cell comparison is meaningless otherwise
    if let Err(e) = actual.ensure_columns(&expected.columns) {
        differences.push(e.to_string());
        return differences;
    }

    if actual.records.len() != expected.records.len() {
        differences.push(format!(
            "Number of rows differs: {} vs {}",
            actual.records.len(),
            expected.records.len()
        ));
    }

    let min_len = std::cmp::min(actual.records.len(), expected.records.len());
    for i in 0..min_len {
        let row1 = &actual.records[i];
        let row2 = &expected.records[i];

        for (col, name) in expected.columns.iter().enumerate() {
            let cell1 = row1.get(col).map(String::as_str).unwrap_or("");
            let cell2 = row2.get(col).map(String::as_str).unwrap_or("");
            if !cells_match(cell1, cell2) {
                differences.push(format!(
                    "Row {} column '{}' differs: '{}' vs '{}'",
                    i + 1,
                    name,
                    cell1,
                    cell2
                ));
            }
        }
    }

    differences
}

fn cells_match(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => (x - y).abs() < NUMERIC_TOLERANCE,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], records: &[&[&str]]) -> CsvTable {
        CsvTable {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            records: records
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_cells_match() {
        assert!(cells_match("5000.0", "5000"));
        assert!(cells_match(" Salary ", "Salary"));
        assert!(!cells_match("1.0", "1.1"));
        assert!(cells_match("", ""));
        assert!(!cells_match("", "0.0"));
    }

    #[test]
    fn test_identical_tables() {
        let a = table(&["Date", "Balance"], &[&["2024-02-01", "10.0"]]);
        let b = table(&["Date", "Balance"], &[&["2024-02-01", "10"]]);
        assert!(compare_tables(&a, &b).is_empty());
    }

    #[test]
    fn test_column_mismatch_stops_comparison() {
        let a = table(&["Date", "Amount"], &[&["2024-02-01", "1"]]);
        let b = table(&["Date", "Balance"], &[]);
        let diffs = compare_tables(&a, &b);
        assert_eq!(diffs.len(), 1);
        assert!(diffs[0].contains("Schema mismatch"));
    }

    #[test]
    fn test_cell_and_count_differences() {
        let a = table(&["Date", "Balance"], &[&["2024-02-01", "10.0"], &["2024-02-02", "9.0"]]);
        let b = table(&["Date", "Balance"], &[&["2024-02-01", "11.0"]]);
        let diffs = compare_tables(&a, &b);
        assert_eq!(diffs.len(), 2);
        assert!(diffs[0].starts_with("Number of rows differs: 2 vs 1"));
        assert!(diffs[1].contains("column 'Balance'"));
    }
}
