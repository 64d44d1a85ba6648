//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// surveyprep: clean and preprocess survey tables
#[derive(Parser)]
#[command(name = "surveyprep")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest and clean a survey file
    Clean {
        /// Path to the survey file (CSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: <file>.clean.csv, or .clean.json with --json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the table as wire-format JSON instead of CSV
        #[arg(long)]
        json: bool,

        /// Detect the delimiter instead of assuming a comma
        #[arg(long)]
        detect_delimiter: bool,
    },

    /// Apply a list of preprocessing operations and export the result
    Run {
        /// Path to the survey file (CSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// JSON file holding an array of operations
        #[arg(long, value_name = "OPS.json")]
        ops: PathBuf,

        /// Output path for the processed CSV (default: <file>.processed.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Stop at the first operation that fails
        #[arg(long)]
        fail_fast: bool,
    },

    /// Print missing-value, type and column statistics
    Profile {
        /// Path to the survey file (CSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Describe a single column
        #[arg(short, long)]
        column: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP session server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for the server
        #[arg(short, long, default_value = "3141")]
        port: u16,

        /// Largest accepted upload, in megabytes
        #[arg(long, default_value = "50")]
        max_upload_mb: usize,
    },
}
