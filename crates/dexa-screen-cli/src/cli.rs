//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use dexa_screen::{DEFAULT_LOG_FILE, LogConfig};

/// dexa-screen: find disagreeing duplicate records in DEXA exports
#[derive(Parser)]
#[command(name = "dexa-screen")]
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
    /// Screen a CSV export for disagreeing duplicate records
    Check {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        log: LogArgs,

        /// Prefix identifying parameter columns
        #[arg(long)]
        prefix: Option<String>,

        /// JSON file with detector configuration
        #[arg(long)]
        config: Option<PathBuf>,

        /// Field delimiter ("tab" or a single character; default: auto-detect)
        #[arg(short, long, value_parser = parse_delimiter)]
        delimiter: Option<u8>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Print the log file contents after screening
        #[arg(long)]
        show_log: bool,
    },

    /// Print the current log file contents
    Log {
        #[command(flatten)]
        log: LogArgs,
    },

    /// Start the web front end for uploads and log download
    Serve {
        /// Port for web server
        #[arg(short, long, default_value = "8501")]
        port: u16,

        /// Don't automatically open browser
        #[arg(long)]
        no_open: bool,

        #[command(flatten)]
        log: LogArgs,

        /// JSON file with detector configuration
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Log file location and rotation limits.
#[derive(Args, Clone, Debug)]
pub struct LogArgs {
    /// Path of the screening log
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_FILE, env = "DEXA_SCREEN_LOG")]
    pub log_file: PathBuf,

    /// Rotate the log once it reaches this many bytes (0 = never)
    #[arg(long, default_value_t = 10_000)]
    pub max_bytes: u64,

    /// Number of rotated log generations to keep
    #[arg(long, default_value_t = 2)]
    pub backups: usize,
}

impl LogArgs {
    pub fn to_config(&self) -> LogConfig {
        LogConfig {
            path: self.log_file.clone(),
            max_bytes: self.max_bytes,
            backup_count: self.backups,
        }
    }
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => match s.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(format!(
                "Invalid delimiter: {}. Use \"tab\" or a single ASCII character.",
                s
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert!(parse_delimiter("ab").is_err());
    }

    #[test]
    fn test_check_defaults() {
        let cli = Cli::try_parse_from(["dexa-screen", "check", "export.csv"]).unwrap();
        match cli.command {
            Commands::Check { log, json, .. } => {
                assert!(!json);
                assert_eq!(log.max_bytes, 10_000);
                assert_eq!(log.backups, 2);
            }
            _ => panic!("expected check command"),
        }
    }
}
