//! dexa-screen CLI - duplicate-record screening for DEXA exports.

mod cli;
mod commands;
mod server;
mod web;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "dexa_screen=debug,dexa_screen_cli=debug,tower_http=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match cli.command {
        Commands::Check {
            file,
            log,
            prefix,
            config,
            delimiter,
            json,
            show_log,
        } => commands::check::run(commands::check::CheckOptions {
            file,
            log,
            prefix,
            config,
            delimiter,
            json,
            show_log,
        }),

        Commands::Log { log } => commands::log::run(log),

        Commands::Serve {
            port,
            no_open,
            log,
            config,
        } => commands::serve::run(port, no_open, log, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
