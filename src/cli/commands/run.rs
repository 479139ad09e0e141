use anyhow::Result;
use clap::Args;
use colored::*;
use std::path::PathBuf;

use crate::config::Config;
use crate::geodata::FileWorkspace;
use crate::logging;
use crate::refresh::run_refresh;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Path to the run configuration
    #[arg(short, long, value_name = "FILE", env = "FIELDPACK_CONFIG")]
    pub config: PathBuf,
}

pub fn run(args: RunArgs) -> Result<()> {
    let config = Config::load(&args.config)?;
    logging::init(&config.log_file_path())?;

    let workspace = FileWorkspace::new();
    let report = run_refresh(&config, &workspace);

    // Partial completion is by far preferable to a hard stop here: failed
    // items are in the report and the log, so the process still exits 0.
    let failed = report.total_failed();
    println!("----------------------------------------------");
    if failed == 0 {
        println!(
            "{} {} items refreshed, output database: {}",
            "Refresh complete.".green().bold(),
            report.total_succeeded(),
            config.output_database_path().display()
        );
    } else {
        println!(
            "{} {} item(s) failed; see {}",
            "Refresh finished with errors.".yellow().bold(),
            failed,
            config.log_file_path().display()
        );
    }
    println!("----------------------------------------------");
    Ok(())
}
