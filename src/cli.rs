//! CLI argument parsing module for modcheck

use crate::registry::DEFAULT_PROXY_URL;
use clap::Parser;
use std::path::PathBuf;

/// Go module update checker
#[derive(Parser, Debug, Clone)]
#[command(
    name = "modcheck",
    version,
    about = "Checks go.mod manifests for available module updates"
)]
pub struct CliArgs {
    /// Project directories containing a go.mod file (default: current directory)
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Base URL of the Go module proxy server
    #[arg(long, default_value = DEFAULT_PROXY_URL)]
    pub proxy: String,

    /// Number of modules to check at once (0 = twice the CPU count)
    #[arg(short = 't', long, default_value_t = 0)]
    pub concurrency: usize,

    /// Be more verbose about what we are doing
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,
}
