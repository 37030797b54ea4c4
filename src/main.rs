//! license-inventory - Third-party dependency license inventory CLI tool
//!
//! This tool finds dependency manifests under a directory and resolves the
//! license of every declared dependency:
//! - Gradle (build.gradle, build.gradle.kts)
//! - npm (package.json)
//! - Cargo (Cargo.lock)
//! - Go (go.mod)
//! - Flutter (pubspec.yaml)
//! - Swift (Package.swift)
//! - CocoaPods (Podfile)

use clap::Parser;
use license_inventory::cli::CliArgs;
use license_inventory::config::InventoryConfig;
use license_inventory::orchestrator::Inventory;
use license_inventory::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over the `--verbose` default
fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let config = InventoryConfig::from_cli(&args)?;

    if args.verbose {
        eprintln!("license-inventory v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Source: {}", config.source_dir.display());
        eprintln!("Output: {}", config.output_dir.display());
        eprintln!("Mode: {:?}", config.mode);
    }

    let inventory = Inventory::new(config)?;
    let report = inventory
        .run_with_progress(!args.quiet && !args.json)
        .await?;

    // Output the run report
    let formatter = create_formatter(OutputConfig::from_cli(args.json, args.verbose, args.quiet));
    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    if report.has_failures() {
        // Partial success - some dependencies or manifests need attention
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
