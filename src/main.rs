//! modcheck - Go module update checker CLI tool
//!
//! Reads go.mod from each given project directory, asks a Go module proxy
//! for the latest version of every required module, and reports the ones
//! with newer versions available. Never modifies any manifest.

use clap::Parser;
use modcheck::checker::UpdateChecker;
use modcheck::cli::CliArgs;
use modcheck::orchestrator::Orchestrator;
use modcheck::output::{self, OutputFormat};
use modcheck::registry::GoProxyClient;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("modcheck v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Proxy: {}", args.proxy);
    }

    let registry = Arc::new(GoProxyClient::new(&args.proxy)?);
    let checker = UpdateChecker::new(registry, args.concurrency);

    let show_progress = !args.quiet && !args.json;
    let orchestrator = Orchestrator::new(checker, args.paths.clone(), args.verbose, show_progress);
    let outcomes = orchestrator.run().await;

    let format = OutputFormat::from_cli(args.json);
    let mut stdout = io::stdout().lock();
    output::render(&outcomes, format, args.quiet, &mut stdout)?;
    stdout.flush()?;

    // Every failed path is reported; one bad path does not hide the others
    let mut failed = false;
    for outcome in &outcomes {
        if let Err(e) = &outcome.result {
            failed = true;
            eprintln!("{}: {}", outcome.path.display(), e);
        }
    }

    // Non-zero only on failure; finding updates is a successful check
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
