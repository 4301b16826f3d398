//! Group Data Packager
//!
//! Packages segmented texts into groups for group-level comparison.
//!
//! # Usage
//!
//! ```bash
//! group-packager pack [--input PATH] [--output PATH] [--pretty]
//! group-packager batch [--input PATH] [--output PATH]
//! group-packager show-config
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Default config file (~/.config/group-packager/config.toml)
//! 3. Config file given with --config
//! 4. Environment variables (GROUPPACK_*)
//! 5. CLI flags
//!
//! File output is written only after packaging succeeds.

use anyhow::Result;
use clap::Parser;

use group_cli::{
    init_logging, load_settings, open_input, open_output, run_batch, run_pack, show_config, Cli,
    Commands,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref(), cli.log_level.as_deref())?;
    init_logging(&settings)?;

    match cli.command {
        Commands::Pack {
            input,
            output,
            pretty,
        } => {
            let reader = open_input(input.as_deref())?;
            let mut sink = open_output(output.as_deref())?;
            run_pack(reader, &mut sink, pretty || settings.pretty)?;
            sink.commit()?;
        }
        Commands::Batch { input, output } => {
            let reader = open_input(input.as_deref())?;
            let mut sink = open_output(output.as_deref())?;
            run_batch(reader, &mut sink)?;
            sink.commit()?;
        }
        Commands::ShowConfig => {
            print!("{}", show_config(&settings)?);
        }
    }

    Ok(())
}
