//! CLI argument parsing module for types-publisher

use crate::changed::VERSIONS_FILE_NAME;
use crate::registry::NPM_REGISTRY_URL;
use clap::Parser;
use std::path::PathBuf;

/// Plan @types publishes and deprecations from a versions diff
#[derive(Parser, Debug, Clone)]
#[command(
    name = "types-publisher",
    version,
    about = "Plan @types publishes and deprecations from a versions diff"
)]
pub struct CliArgs {
    /// Versions diff listing changed typings and not-needed packages
    #[arg(default_value = VERSIONS_FILE_NAME)]
    pub versions: PathBuf,

    /// Package index holding every typings and not-needed package
    #[arg(short, long)]
    pub packages: PathBuf,

    /// Registry info cache, loaded before planning and saved afterwards
    #[arg(long)]
    pub cache_file: Option<PathBuf>,

    /// Never contact the registry; rely on the cache file only
    #[arg(long)]
    pub offline: bool,

    /// npm registry base URL
    #[arg(long, default_value = NPM_REGISTRY_URL)]
    pub registry: String,

    // Output options
    /// Output the plan in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - summary only
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Default log filter when `RUST_LOG` is unset
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "info"
        } else {
            "warn"
        }
    }

    /// Whether a progress bar may be drawn on stderr
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }
}
