//! Log command - print the current screening log.

use colored::Colorize;
use dexa_screen::RotatingFileLog;

use crate::cli::LogArgs;

pub fn run(args: LogArgs) -> Result<(), Box<dyn std::error::Error>> {
    let log = RotatingFileLog::with_config(args.to_config());
    let contents = log.contents()?;

    if contents.is_empty() {
        println!(
            "{} {} is empty or does not exist yet",
            "Note:".yellow(),
            log.path().display()
        );
    } else {
        print!("{}", contents);
    }

    Ok(())
}
