//! Check command - screen a data file and append discrepancies to the log.

use std::path::PathBuf;

use colored::Colorize;
use dexa_screen::{ParserConfig, RotatingFileLog, Screener, ScreenerConfig};
use tracing::debug;

use crate::cli::LogArgs;

pub struct CheckOptions {
    pub file: PathBuf,
    pub log: LogArgs,
    pub prefix: Option<String>,
    pub config: Option<PathBuf>,
    pub delimiter: Option<u8>,
    pub json: bool,
    pub show_log: bool,
}

pub fn run(options: CheckOptions) -> Result<(), Box<dyn std::error::Error>> {
    if !options.file.exists() {
        return Err(format!("File not found: {}", options.file.display()).into());
    }

    let mut detector = super::detector_config(options.config.as_ref())?;
    if let Some(prefix) = options.prefix {
        detector.parameter_prefix = prefix;
    }
    let config = ScreenerConfig {
        parser: ParserConfig {
            delimiter: options.delimiter,
            ..ParserConfig::default()
        },
        detector,
    };
    debug!("Screener configuration: {:?}", config);

    let screener = Screener::with_config(config);
    let mut log = RotatingFileLog::with_config(options.log.to_config());
    let report = screener.screen(&options.file, &mut log)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Screened".cyan().bold(),
        options.file.display().to_string().white()
    );
    println!(
        "  {} rows, {} parameters, {} duplicate groups ({} compared, {} skipped)",
        report.summary.total_rows,
        report.parameters.len(),
        report.summary.duplicate_groups,
        report.summary.groups_compared,
        report.summary.groups_skipped.to_string().yellow()
    );
    if report.summary.rows_missing_metadata > 0 {
        println!(
            "  {} rows not grouped: missing metadata",
            report.summary.rows_missing_metadata.to_string().yellow()
        );
    }
    println!();

    if report.is_clean() {
        println!("{}", "No discrepancies between duplicate records.".green());
    } else {
        println!(
            "Found {} discrepancies",
            report.discrepancies.len().to_string().red().bold()
        );
        for discrepancy in &report.discrepancies {
            println!("  {}", discrepancy);
        }
    }

    println!();
    println!(
        "{} Check {} for details.",
        "Data screening completed.".green().bold(),
        log.path().display().to_string().white()
    );

    if options.show_log {
        println!();
        println!("{}", "Log contents:".yellow().bold());
        print!("{}", log.contents()?);
    }

    Ok(())
}
