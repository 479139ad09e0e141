use clap::Parser;
use colored::*;
use std::process;

use fieldpack::cli::{Cli, Commands};
use fieldpack::FieldpackError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        // Exit codes distinguish error categories for the scheduler
        let exit_code = match e.downcast_ref::<FieldpackError>() {
            Some(FieldpackError::Config(_)) => 2,
            Some(FieldpackError::Io(_)) => 3,
            Some(FieldpackError::Workspace(_)) => 5,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Run(args) => fieldpack::cli::commands::run::run(args),
        Commands::Init(args) => fieldpack::cli::commands::init::run(args),
    }
}
