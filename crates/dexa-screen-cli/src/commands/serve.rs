//! Serve command - web front end for uploads and log download.

use std::path::PathBuf;

use colored::Colorize;
use dexa_screen::{RotatingFileLog, Screener, ScreenerConfig};

use crate::cli::LogArgs;
use crate::server::{app, state::AppState};

pub fn run(
    port: u16,
    no_open: bool,
    log: LogArgs,
    config: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let detector = super::detector_config(config.as_ref())?;
    let screener = Screener::with_config(ScreenerConfig {
        detector,
        ..ScreenerConfig::default()
    });
    let log = RotatingFileLog::with_config(log.to_config());
    let log_path = log.path().to_path_buf();

    let state = AppState::new(screener, log);

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting screening server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Log: {}", log_path.display());
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if !no_open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        tokio::select! {
            result = app::run_server(state, port) => {
                if let Err(e) = result {
                    eprintln!("Server error: {}", e);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("{}", "Shutting down...".yellow());
            }
        }
    });

    Ok(())
}
