//! Clean command - ingest a survey file and write the cleaned table.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use surveyprep::{ParserConfig, PrepConfig, SurveyPrep, export, table};

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    json: bool,
    detect_delimiter: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let parser = if detect_delimiter {
        ParserConfig::auto_detect()
    } else {
        ParserConfig::default()
    };
    let prep = SurveyPrep::with_config(PrepConfig {
        parser,
        ..PrepConfig::default()
    });

    let (state, _source) = super::ingest(&prep, &file)?;
    let table = &state.table;

    if verbose {
        println!();
        println!("{}", "Columns:".yellow().bold());
        for column in table.columns() {
            println!(
                "  {:40} {:16} {} missing",
                column.name,
                column.kind.to_string(),
                column.missing_count()
            );
        }
        println!();
    }

    let output_path = output.unwrap_or_else(|| {
        super::sibling_path(&file, "clean", if json { "json" } else { "csv" })
    });
    if json {
        fs::write(&output_path, table::to_json(table)?)?;
    } else {
        export::to_csv_file(table, &output_path)?;
    }

    println!(
        "{} {} ({} missing cells)",
        "Wrote".green().bold(),
        output_path.display().to_string().cyan(),
        table.missing_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_clean_writes_csv_next_to_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("survey.csv");
        fs::write(&input, "Age,Gender\n30,M\n200,female\n").unwrap();

        run(input, None, false, false, false).unwrap();

        let out = fs::read_to_string(dir.path().join("survey_clean.csv")).unwrap();
        assert_eq!(out, "Age,Gender\n30,Male\n,Female\n");
    }

    #[test]
    fn test_clean_missing_file() {
        let dir = tempdir().unwrap();
        assert!(run(dir.path().join("absent.csv"), None, false, false, false).is_err());
    }
}
