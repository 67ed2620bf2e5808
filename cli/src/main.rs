//! CLI for the template indexer.
//!
//! Lists an organization's template repositories and writes one XML index
//! per configured platform version.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use template_index::{IndexConfig, RepositoryOutcome, RunSummary, Runner, RunnerError};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Configuration file picked up from the working directory when present.
const DEFAULT_CONFIG_FILE: &str = "template-index.toml";

/// Template Index - Aggregate template manifests into version indexes.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, disable_version_flag = true)]
struct Args {
    /// Path to the configuration file.
    #[arg(long, env = "TEMPLATE_INDEX_CONFIG")]
    config: Option<PathBuf>,

    /// Organization whose repositories are indexed.
    #[arg(long)]
    organization: Option<String>,

    /// Base URL of the hosting JSON API.
    #[arg(long)]
    api_url: Option<String>,

    /// Directory the index files are written to.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Platform version to build an index for, oldest first. Repeatable.
    #[arg(long = "version", value_name = "VERSION")]
    versions: Vec<String>,
}

fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args) {
        Ok(summary) => {
            print_summary(&summary);

            if summary.has_failures() {
                ExitCode::from(1)
            } else {
                ExitCode::from(0)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let config = load_config(args)?;
    let runner = Runner::new(config)?;
    runner.run()
}

/// Layers the command line over the configuration file over the defaults.
fn load_config(args: Args) -> Result<IndexConfig, RunnerError> {
    let mut config = match args.config {
        Some(path) => IndexConfig::load(&path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            IndexConfig::load(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => IndexConfig::default(),
    };

    if let Some(organization) = args.organization {
        config.organization = organization;
    }
    if let Some(api_url) = args.api_url {
        config.api_base_url = api_url;
    }
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }
    if !args.versions.is_empty() {
        config.versions = args.versions;
    }

    Ok(config)
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Repositories discovered: {}",
        summary.repositories_discovered
    );
    println!("  Templates indexed: {}", summary.indexed);
    println!("  Repositories skipped: {}", summary.skipped);
    println!("  Unknown minimum versions: {}", summary.unknown_versions);
    println!("  Failed: {}", summary.failed);

    for outcome in &summary.outcomes {
        match outcome {
            RepositoryOutcome::UnknownVersion {
                repository,
                version,
            } => println!("    {repository}: unknown minimum version '{version}'"),
            RepositoryOutcome::Failed { repository, error } => {
                println!("    {repository}: {error}")
            }
            _ => {}
        }
    }

    for path in &summary.indexes_written {
        println!("  Wrote {}", path.display());
    }
}
