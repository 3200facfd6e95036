//! types-publisher - plan @types publishes and deprecations
//!
//! Reads a versions diff, checks the npm registry for every not-needed
//! package being deprecated, and prints what has to be published.

use anyhow::Context;
use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;
use types_publisher::changed::read_changed_packages;
use types_publisher::cli::CliArgs;
use types_publisher::output::{create_formatter, OutputConfig};
use types_publisher::packages::PackageIndex;
use types_publisher::planner::Planner;
use types_publisher::registry::{CachedNpmInfoClient, HttpClient, NpmAdapter};
use types_publisher::resolver::TracingLogger;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level())),
        )
        .with_writer(io::stderr)
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<()> {
    info!("types-publisher v{}", env!("CARGO_PKG_VERSION"));

    let mut client = if args.offline {
        CachedNpmInfoClient::offline()
    } else {
        let http = HttpClient::new()?;
        CachedNpmInfoClient::new(Box::new(NpmAdapter::with_base_url(http, &args.registry)))
    };

    if let Some(ref cache_file) = args.cache_file {
        client.load_cache_file(cache_file).await?;
    }

    let index = PackageIndex::read(&args.packages).await?;
    info!(
        "Package index: {} typings, {} not-needed",
        index.typings_count(),
        index.not_needed_count()
    );
    let changed = read_changed_packages(&args.versions, &index).await?;

    let mut planner = Planner::new(client).with_progress(args.show_progress());
    let plan = planner.plan(&changed, &mut TracingLogger).await?;

    if let Some(ref cache_file) = args.cache_file {
        if !planner.client().is_offline() {
            planner
                .client()
                .save_cache_file(cache_file)
                .await
                .with_context(|| format!("saving registry cache to {}", cache_file.display()))?;
        }
    }

    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet)
        .with_color(io::stdout().is_terminal());
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&plan, &mut stdout)?;
    stdout.flush()?;

    Ok(())
}
