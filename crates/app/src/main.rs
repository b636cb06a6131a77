//! Pokecheck - Main Entry Point
//!
//! Runs the PokéAPI suite once, prints the report to stdout and exits 0
//! only if every scenario passed.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use pokecheck::{interrupted, pokeapi_suite};
use pokecheck_application::RunSuite;
use pokecheck_infrastructure::{ReqwestHttpClient, Settings, TextReporter, init_tracing};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "run aborted");
            eprintln!("pokecheck: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    info!(
        base_url = %settings.base_url,
        timeout_ms = settings.timeout_ms(),
        "pokecheck v{}",
        env!("CARGO_PKG_VERSION")
    );

    let client = ReqwestHttpClient::new(&settings)?;
    let runner = RunSuite::new(Arc::new(client));
    let suite = pokeapi_suite();
    let mut reporter = TextReporter::new(io::stdout());

    let report = tokio::select! {
        report = runner.execute_with_progress(&suite, |result| {
            if let Err(e) = reporter.scenario(result) {
                warn!(error = %e, "failed to write report line");
            }
        }) => Some(report?),
        () = interrupted(tokio::signal::ctrl_c()) => None,
    };

    let Some(report) = report else {
        warn!("interrupted");
        eprintln!("\npokecheck: interrupted");
        return Ok(ExitCode::FAILURE);
    };

    reporter.summary(&report)?;
    Ok(ExitCode::from(report.exit_code()))
}
