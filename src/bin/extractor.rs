//! Bank statement extractor - CLI tool turning statement PDFs into reference-shaped CSV.

use bankstmt::{
    csv_format::{self, CsvTable},
    extract::StatementText,
    logging, InferenceConfig, Layout, Result, RowInferencer,
};
use clap::Parser;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "bankstmt_extract")]
#[command(about = "Extract the transaction table of a bank statement PDF into CSV", long_about = None)]
struct Cli {
    /// Statement file (.pdf, or already extracted text)
    #[arg(short, long)]
    input: String,

    /// Reference CSV whose header defines the output columns
    #[arg(short, long)]
    schema: String,

    /// Output file path (or stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Statement layout (auto, flagged, tabular)
    #[arg(long, default_value = "auto")]
    layout: String,

    /// Re-split lines on single spaces into date/description/debit/credit/balance
    #[arg(long = "split-rows")]
    split_rows: bool,

    /// Increase log detail (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let layout = cli.layout.parse::<Layout>()?;
    let schema = CsvTable::from_path(&cli.schema)?.schema()?;

    let text = read_statement(Path::new(&cli.input))?;
    let lines = if cli.split_rows {
        text.candidate_lines()
    } else {
        text.lines
    };

    let config = InferenceConfig::for_layout(layout, &lines);
    let inferencer = RowInferencer::new(schema, config);
    let table = inferencer.infer(&lines);

    info!(
        input = %cli.input,
        layout = %layout,
        flagged = config.try_flagged,
        lines = lines.len(),
        rows = table.len(),
        "statement parsed"
    );
    if table.is_empty() {
        warn!(input = %cli.input, "no transaction rows recognised");
    }

    if let Some(ref output_path) = cli.output {
        let mut file = File::create(output_path)?;
        csv_format::write_table(&table, &mut file)?;
    } else {
        let mut stdout = io::stdout().lock();
        csv_format::write_table(&table, &mut stdout)?;
        stdout.flush()?;
    }

    Ok(())
}

fn read_statement(path: &Path) -> Result<StatementText> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        StatementText::from_pdf(path)
    } else {
        let mut file = File::open(path)?;
        StatementText::from_read(&mut file)
    }
}
