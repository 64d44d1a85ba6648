//! CLI command implementations.

pub mod clean;
pub mod profile;
pub mod run;
pub mod serve;

use std::path::{Path, PathBuf};

use colored::Colorize;
use surveyprep::{PipelineState, SourceMetadata, StatusLevel, SurveyPrep};

/// `<stem>_<suffix>.<ext>` next to `file`.
pub(crate) fn sibling_path(file: &Path, suffix: &str, ext: &str) -> PathBuf {
    let stem = file.file_stem().unwrap_or_default().to_string_lossy();
    file.with_file_name(format!("{}_{}.{}", stem, suffix, ext))
}

/// Ingest `file`, printing a one-line summary.
pub(crate) fn ingest(
    prep: &SurveyPrep,
    file: &Path,
) -> Result<(PipelineState, SourceMetadata), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    println!(
        "{} {}",
        "Ingesting".cyan().bold(),
        file.display().to_string().white()
    );
    let (state, source) = prep.ingest_file(file)?;
    println!(
        "Loaded {} rows and {} columns ({}, {})",
        source.row_count.to_string().white().bold(),
        source.column_count.to_string().white().bold(),
        source.encoding,
        source.format
    );
    Ok((state, source))
}

/// Print a pipeline status line.
pub(crate) fn print_status(state: &PipelineState) {
    let label = match state.status.level {
        StatusLevel::Success => "ok".green().bold(),
        StatusLevel::Warning => "warning".yellow().bold(),
        StatusLevel::Error => "error".red().bold(),
    };
    println!("  [{}] {}", label, state.status.message);
}
