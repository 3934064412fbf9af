//! Command-line interface definition.

use crate::logging::LogFormat;
use clap::{Args, Parser, Subcommand};
use pp_common::OutputFormat;
use std::path::PathBuf;

/// Turn pitch-tracking captures into per-pitch biomechanical features.
#[derive(Parser, Debug)]
#[command(name = "pitch-path", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Pipeline configuration file (JSON)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Joint catalog file (JSON)
    #[arg(long, global = true, value_name = "PATH")]
    pub joints: Option<PathBuf>,

    /// Override the leg-lift window from the configuration
    #[arg(long, global = true)]
    pub window: Option<usize>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log line format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Run summary format on stdout
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Summary)]
    pub format: OutputFormat,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process a long-format capture file into processed and feature tables
    Process {
        /// Long-format Parquet capture file
        input: PathBuf,
        /// Root directory for output tables
        #[arg(long, value_name = "DIR")]
        output_root: PathBuf,
        /// Replace existing output files
        #[arg(long)]
        overwrite: bool,
        /// Skip and log failing pitches instead of aborting
        #[arg(long)]
        skip_invalid: bool,
    },
    /// Rebuild features from a processed (segmented) table
    Features {
        /// Processed Parquet file
        processed: PathBuf,
        /// Root directory for output tables
        #[arg(long, value_name = "DIR")]
        output_root: PathBuf,
        /// Replace existing output files
        #[arg(long)]
        overwrite: bool,
        /// Skip and log failing pitches instead of aborting
        #[arg(long)]
        skip_invalid: bool,
    },
    /// Inspect or validate configuration
    Config(ConfigArgs),
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the resolved configuration and where it came from
    Show,
    /// Validate a pipeline configuration file (default: the resolved one)
    Validate {
        /// Pipeline configuration file to check
        path: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_process_with_globals() {
        let cli = Cli::try_parse_from([
            "pitch-path",
            "process",
            "raw.parquet",
            "--output-root",
            "out",
            "--window",
            "12",
            "--format",
            "json",
            "--skip-invalid",
        ])
        .unwrap();
        assert_eq!(cli.global.window, Some(12));
        assert_eq!(cli.global.format, OutputFormat::Json);
        match cli.command {
            Commands::Process {
                input,
                skip_invalid,
                overwrite,
                ..
            } => {
                assert_eq!(input, PathBuf::from("raw.parquet"));
                assert!(skip_invalid);
                assert!(!overwrite);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_output_root_is_required() {
        assert!(Cli::try_parse_from(["pitch-path", "process", "raw.parquet"]).is_err());
    }
}
