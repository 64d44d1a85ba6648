//! Example: clean a survey file and walk it through a few operations.
//!
//! Usage:
//!   cargo run --example prep_survey -- <file_path>
//!
//! Example:
//!   cargo run --example prep_survey -- tests/data/survey_sample.csv

use std::env;
use std::path::Path;

use surveyprep::profile::MissingSummary;
use surveyprep::transform::{EncodeMethod, MissingMethod, NormalizeMethod};
use surveyprep::{Operation, SurveyPrep};

fn main() -> surveyprep::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example prep_survey -- <file_path>");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Survey preprocessing: {}", path.display());
    println!("{}", separator);
    println!();

    let prep = SurveyPrep::new();
    let (state, source) = prep.ingest_file(path)?;

    println!("## Source");
    println!("  Hash: {}", source.hash);
    println!("  Encoding: {}", source.encoding);
    println!("  Rows: {}", source.row_count);
    println!("  Columns: {}", source.column_count);
    println!();

    println!("## Columns after cleaning");
    for column in state.table.columns() {
        println!(
            "  {:32} {:16} missing: {}",
            column.name,
            column.kind.to_string(),
            column.missing_count()
        );
    }
    println!();

    let missing = MissingSummary::of(&state.table);
    println!(
        "## Missing cells: {} in {} columns",
        missing.total_missing, missing.columns_with_missing
    );
    println!();

    let steps = [
        Operation::HandleMissing {
            column: "*".into(),
            method: Some(MissingMethod::Mode),
            custom_value: None,
        },
        Operation::Discretize {
            column: "Age".into(),
            bin_count: 4,
        },
        Operation::Normalize {
            method: Some(NormalizeMethod::Minmax),
        },
        Operation::Encode {
            method: Some(EncodeMethod::Label),
        },
        Operation::Split {
            test_fraction: 0.2,
            seed: 7,
        },
    ];

    println!("## Operations");
    let mut state = state;
    for step in &steps {
        state = state.apply(step);
        println!("  {:40} {:?}: {}", step.description(), state.status.level, state.status.message);
    }
    println!();

    println!("## Preview");
    let preview = prep.preview(&state.table);
    println!("  {}", preview.column_names().join(", "));
    for row in 0..preview.row_count() {
        let cells: Vec<String> = preview.columns().map(|c| c.values[row].to_string()).collect();
        println!("  {}", cells.join(", "));
    }

    Ok(())
}
