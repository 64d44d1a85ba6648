//! Run command - apply a scripted list of operations and export the result.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use surveyprep::{SurveyPrep, export};

pub fn run(
    file: PathBuf,
    ops: PathBuf,
    output: Option<PathBuf>,
    fail_fast: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let script = fs::read_to_string(&ops)
        .map_err(|e| format!("Cannot read operations file {}: {}", ops.display(), e))?;
    let operations: Vec<serde_json::Value> = serde_json::from_str(&script)?;

    let (mut state, _source) = super::ingest(&SurveyPrep::new(), &file)?;

    println!(
        "{} {} operations",
        "Applying".cyan().bold(),
        operations.len().to_string().white().bold()
    );
    let mut failures = 0;
    for (i, operation) in operations.into_iter().enumerate() {
        if verbose {
            println!("  {} {}", format!("#{}", i + 1).dimmed(), operation);
        }
        state = state.apply_json(operation);
        super::print_status(&state);
        if state.status.is_error() {
            failures += 1;
            if fail_fast {
                return Err(format!("Operation #{} failed: {}", i + 1, state.status.message).into());
            }
        }
    }

    let output_path = output.unwrap_or_else(|| super::sibling_path(&file, "processed", "csv"));
    export::to_csv_file(&state.table, &output_path)?;

    println!();
    if failures > 0 {
        println!(
            "{} {} operations failed and left the table unchanged",
            "Warning:".yellow().bold(),
            failures
        );
    }
    println!(
        "{} {} rows and {} columns to {}",
        "Wrote".green().bold(),
        state.table.row_count(),
        state.table.column_count(),
        output_path.display().to_string().cyan()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_run_applies_script() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("survey.csv");
        fs::write(&input, "Age,Gender,Country\n30,M,Canada\n,female,Canada\n").unwrap();
        let ops = dir.path().join("ops.json");
        fs::write(
            &ops,
            r#"[
                {"op": "drop_columns", "columns": ["Country"]},
                {"op": "discretize", "column": "Gender", "bin_count": 2},
                {"op": "handle_missing", "column": "Age", "method": "zero"}
            ]"#,
        )
        .unwrap();
        let output = dir.path().join("out.csv");

        run(input, ops, Some(output.clone()), false, false).unwrap();

        let out = fs::read_to_string(output).unwrap();
        assert_eq!(out, "Age,Gender\n30,Male\n0,Female\n");
    }

    #[test]
    fn test_run_fail_fast() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("survey.csv");
        fs::write(&input, "Age\n30\n").unwrap();
        let ops = dir.path().join("ops.json");
        fs::write(&ops, r#"[{"op": "drop_columns", "columns": []}]"#).unwrap();

        assert!(run(input, ops, None, true, false).is_err());
    }
}
