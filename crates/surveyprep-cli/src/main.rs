//! surveyprep CLI - survey cleaning and preprocessing.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Clean {
            file,
            output,
            json,
            detect_delimiter,
        } => commands::clean::run(file, output, json, detect_delimiter, cli.verbose),

        Commands::Run {
            file,
            ops,
            output,
            fail_fast,
        } => commands::run::run(file, ops, output, fail_fast, cli.verbose),

        Commands::Profile { file, column, json } => {
            commands::profile::run(file, column, json, cli.verbose)
        }

        Commands::Serve {
            host,
            port,
            max_upload_mb,
        } => commands::serve::run(host, port, max_upload_mb, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise warnings, or debug with `-v`.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "surveyprep=debug,surveyprep_cli=debug"
    } else {
        "surveyprep=warn,surveyprep_cli=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}
