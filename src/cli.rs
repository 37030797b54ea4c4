//! CLI argument parsing module for license-inventory

use crate::config::SelectionMode;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Third-party dependency license inventory
#[derive(Parser, Debug, Clone)]
#[command(
    name = "license-inventory",
    version,
    about = "Inventory third-party dependencies and resolve their licenses"
)]
pub struct CliArgs {
    /// Directory searched for manifests (default: current directory)
    pub path: Option<PathBuf>,

    /// Output directory for downloaded documents, license and error files
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Manifest filename to search for (can be specified multiple times)
    #[arg(long = "file", action = ArgAction::Append)]
    pub files: Vec<String>,

    /// Consecutive failures tolerated per platform before it is halted
    #[arg(long)]
    pub max_errors: Option<usize>,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Dependencies to process
    #[arg(long, value_enum)]
    pub mode: Option<SelectionMode>,

    // Output options
    /// Output the run report in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}
