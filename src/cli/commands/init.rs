use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::config::SAMPLE_CONFIG;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Where to write the example configuration
    #[arg(short, long, value_name = "FILE", default_value = "fieldpack.toml")]
    pub config: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    if args.config.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            args.config.display()
        );
    }
    std::fs::write(&args.config, SAMPLE_CONFIG)?;
    println!("Wrote example configuration to {}", args.config.display());
    Ok(())
}
