pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fieldpack",
    version,
    about = "Refreshes a portable geodatabase extract for offline field map viewers"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full refresh sequence against a configuration
    Run(commands::run::RunArgs),
    /// Write a documented example configuration file
    Init(commands::init::InitArgs),
}
