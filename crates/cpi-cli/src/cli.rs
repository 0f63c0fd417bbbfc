//! CLI argument definitions for the CPI pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cpi-pipeline",
    version,
    about = "CPI Pipeline - Convert consumer price index sheet exports to tidy CSV datasets",
    long_about = "Convert PCBS consumer price index sheet exports to tidy CSV datasets.\n\n\
                  Reads the major-groups and major-divisions sheet exports plus the\n\
                  curated name lookups, and writes three long-format and two\n\
                  wide-format CSV files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Process an input folder and generate the five CSV datasets.
    Process(ProcessArgs),

    /// Show the built-in sheet layouts and wide-format ordering rules.
    Layouts,
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Path to the folder containing the sheet exports and lookup files.
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Output directory for generated files (default: <INPUT_DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// JSON file overriding the built-in layouts and ordering rules.
    ///
    /// Any field left out of the file keeps its built-in default, so a
    /// config only needs to state what differs from the PCBS workbook.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fail on unparseable month headers instead of skipping the column.
    ///
    /// By default a header cell that cannot be read as a month is logged
    /// and its column ignored. Use this flag when a silent skip would be
    /// worse than a failed run.
    #[arg(long = "strict-months")]
    pub strict_months: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
