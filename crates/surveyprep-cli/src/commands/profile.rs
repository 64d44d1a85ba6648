//! Profile command - print missing-value, type and column reports.

use std::path::PathBuf;

use colored::Colorize;
use surveyprep::SurveyPrep;
use surveyprep::profile::{ColumnStats, CorrelationMatrix, DtypeSummary, MissingSummary};

pub fn run(
    file: PathBuf,
    column: Option<String>,
    json: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    let (state, source) = SurveyPrep::new().ingest_file(&file)?;
    let table = &state.table;

    if let Some(name) = column {
        let stats = ColumnStats::of(table, &name)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            print_column(&name, &stats);
        }
        return Ok(());
    }

    let missing = MissingSummary::of(table);
    let dtypes = DtypeSummary::of(table);
    let correlation = CorrelationMatrix::of(table);

    if json {
        let report = serde_json::json!({
            "source": source,
            "missing": missing,
            "dtypes": dtypes,
            "correlation": correlation,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows, {} columns)",
        "Profile of".cyan().bold(),
        file.display().to_string().white(),
        table.row_count(),
        table.column_count()
    );
    println!();

    println!("{}", "Columns:".yellow().bold());
    for (dtype, gap) in dtypes.columns.iter().zip(&missing.columns) {
        let missing_text = if gap.missing > 0 {
            format!("{} missing ({:.2}%)", gap.missing, gap.percentage).red()
        } else {
            "complete".green()
        };
        println!(
            "  {:40} {:16} {:>6} non-null  {}",
            dtype.column,
            dtype.dtype.to_string(),
            dtype.non_null,
            missing_text
        );
    }
    println!();
    println!(
        "Missing cells: {} across {} columns",
        missing.total_missing.to_string().white().bold(),
        missing.columns_with_missing
    );

    if correlation.columns.len() > 1 {
        println!();
        println!("{}", "Correlation:".yellow().bold());
        for (i, a) in correlation.columns.iter().enumerate() {
            for (j, b) in correlation.columns.iter().enumerate().skip(i + 1) {
                match correlation.values[i][j] {
                    Some(r) => println!("  {} ~ {}: {:.3}", a, b, r),
                    None => println!("  {} ~ {}: {}", a, b, "n/a".dimmed()),
                }
            }
        }
    }
    Ok(())
}

fn print_column(name: &str, stats: &ColumnStats) {
    println!("{} {}", "Column".cyan().bold(), name.white().bold());
    match stats {
        ColumnStats::Numeric(s) => {
            println!("  Count:     {}", s.count);
            println!("  Mean:      {:.2}", s.mean);
            println!("  Median:    {:.2}", s.median);
            match s.std {
                Some(std) => println!("  Std Dev:   {:.2}", std),
                None => println!("  Std Dev:   {}", "n/a".dimmed()),
            }
            println!("  Min:       {:.2}", s.min);
            println!("  Max:       {:.2}", s.max);
            println!("  Q1:        {:.2}", s.q1);
            println!("  Q3:        {:.2}", s.q3);
            println!("  Missing:   {} ({:.2}%)", s.missing, s.missing_pct);
        }
        ColumnStats::Categorical(s) => {
            println!("  Total:     {}", s.total);
            println!("  Valid:     {}", s.valid);
            println!("  Unique:    {}", s.unique);
            println!(
                "  Most common: {} ({})",
                s.most_common.value.white().bold(),
                s.most_common.count
            );
            println!("  Missing:   {} ({:.2}%)", s.missing, s.missing_pct);
            println!();
            for entry in &s.distribution {
                println!("  {:40} {:>6}  {:>6.2}%", entry.value, entry.count, entry.percentage);
            }
        }
        ColumnStats::Empty { missing } => {
            println!("  {} every one of {} values is missing", "Empty:".yellow(), missing);
        }
    }
}
