//! CLI argument parsing for the group packager.
//!
//! CLI flags override all other config sources.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Group Data Packager
///
/// Packages segmented texts into groups for group-level comparison.
#[derive(Parser, Debug)]
#[command(name = "group-packager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/group-packager/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Packager commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Package a single JSON payload
    Pack {
        /// Input file (default: stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Package a JSON Lines stream, one payload per line
    Batch {
        /// Input file (default: stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    ShowConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pack_defaults() {
        let cli = Cli::parse_from(["group-packager", "pack"]);
        match cli.command {
            Commands::Pack {
                input,
                output,
                pretty,
            } => {
                assert!(input.is_none());
                assert!(output.is_none());
                assert!(!pretty);
            }
            _ => panic!("Expected Pack command"),
        }
    }

    #[test]
    fn test_parse_pack_with_paths() {
        let cli = Cli::parse_from([
            "group-packager",
            "pack",
            "--input",
            "in.json",
            "-o",
            "out.json",
            "--pretty",
        ]);
        match cli.command {
            Commands::Pack {
                input,
                output,
                pretty,
            } => {
                assert_eq!(input, Some(PathBuf::from("in.json")));
                assert_eq!(output, Some(PathBuf::from("out.json")));
                assert!(pretty);
            }
            _ => panic!("Expected Pack command"),
        }
    }

    #[test]
    fn test_parse_batch() {
        let cli = Cli::parse_from(["group-packager", "batch", "-i", "rows.jsonl"]);
        assert!(matches!(
            cli.command,
            Commands::Batch { input: Some(_), output: None }
        ));
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "group-packager",
            "show-config",
            "--config",
            "/tmp/gp.toml",
            "--log-level",
            "debug",
        ]);
        assert!(matches!(cli.command, Commands::ShowConfig));
        assert_eq!(cli.config.as_deref(), Some("/tmp/gp.toml"));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["group-packager"]).is_err());
    }
}
