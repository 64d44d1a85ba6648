//! Serve command - start the HTTP session server.

use colored::Colorize;

use crate::server::{app, state::AppState};

pub fn run(
    host: String,
    port: u16,
    max_upload_mb: usize,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(max_upload_mb * 1024 * 1024);

    let url = format!("http://{}:{}", host, port);
    println!();
    println!(
        "{} {}",
        "Starting session server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Upload limit: {} MB", max_upload_mb);
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            println!();
            println!("{}", "Shutting down...".yellow());
            std::process::exit(0);
        });

        app::run_server(state, &host, port).await
    })
}
