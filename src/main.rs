// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Compile the file and line filters (bad regex = exit 2 before any fetch)
// 3. Build the GitHub client and stitch every reference
// 4. Write the document and exit with proper code
//    (0 = success, 1 = some references failed or run cancelled, 2 = error)
//
// Rust concepts used:
// - async/await: Because every reference needs network requests
// - Result<T, E>: For error handling
// - CancellationToken: Ctrl-C stops new fetches but keeps what finished
// =============================================================================

use std::future::Future;

use anyhow::{anyhow, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use codestitch::cli::Cli;
use codestitch::output;
use codestitch::{GitHubClient, Stitcher};

// The #[tokio::main] attribute transforms our async main into a real main function
#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = everything resolved
//   Ok(1) = at least one reference failed, or the run was cancelled
//   Err = configuration or I/O error (exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let inputs = cli.read_inputs()?;
    if inputs.is_empty() {
        return Err(anyhow!(
            "No references given. Pass them as arguments or with --input-file"
        ));
    }

    // Compile once, up front; a typo in a pattern should not cost any requests
    let file_filter = cli.file_filter().compile()?;
    let line_filter = cli.line_filter().compile()?;

    let config = cli.config();
    tracing::debug!(?config, "configuration");
    let client = GitHubClient::new(&config)?;

    // Ctrl-C: stop issuing requests and return what we have
    // A second Ctrl-C quits without waiting for requests still in flight
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if let Some(code) = watch_interrupts(tokio::signal::ctrl_c, on_signal).await {
            std::process::exit(code);
        }
    });

    if !cli.quiet {
        eprintln!("🧵 Stitching {} reference(s)...", inputs.len());
    }

    let result = Stitcher::new(&client)
        .with_filters(file_filter, line_filter)
        .with_concurrency(config.concurrency)
        .with_cancellation(cancel)
        .process(&inputs)
        .await;

    output::write_result(&result, cli.json, cli.output.as_deref())?;

    if !cli.quiet {
        output::print_summary(&result, inputs.len(), cli.output.as_deref());
    }

    if result.had_errors || result.cancelled {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Exit code used when a second interrupt aborts the run
const ABORTED_EXIT_CODE: i32 = 1;

// First interrupt cancels the run; a second one returns the exit code to quit
// with. None if the signal source fails.
async fn watch_interrupts<F, Fut>(mut interrupt: F, cancel: CancellationToken) -> Option<i32>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<()>>,
{
    interrupt().await.ok()?;
    cancel.cancel();
    tracing::warn!("cancelling; press Ctrl-C again to quit immediately");

    interrupt().await.ok()?;
    tracing::error!("aborted");
    Some(ABORTED_EXIT_CODE)
}

// Logs go to stderr; RUST_LOG wins over the flags when it is set
fn init_tracing(verbose: bool, quiet: bool) {
    let default = if verbose {
        "codestitch=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
